use std::fmt::Display;

use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::group::GroupId;

use super::closure::ClosureMatrix;

/// Groups that reach themselves through a path of length at least one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarNodes {
    filter: BitVec,
}

impl StarNodes {
    /// Reads the diagonal of the closure.
    pub fn detect(closure: &ClosureMatrix) -> Self {
        let filter = (0..closure.n_groups())
            .map(|i| closure.is_reachable(GroupId(i), GroupId(i)))
            .collect();
        StarNodes { filter }
    }

    pub fn contains(&self, group: GroupId) -> bool {
        self.filter.get(group.0).is_some_and(|b| *b)
    }

    pub fn iter(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.filter.iter_ones().map(GroupId)
    }

    pub fn len(&self) -> usize {
        self.filter.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.filter.not_any()
    }
}

impl Display for StarNodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        algorithms::{closure::ClosureStrategy, projection::AdjacencyMatrix},
        group::Modulus,
    };

    use super::*;

    fn stars(pairs: &[(i64, i64)], n: i64) -> StarNodes {
        let adjacency = AdjacencyMatrix::project(pairs, Modulus::new(n).unwrap());
        StarNodes::detect(&ClosureMatrix::compute(&adjacency, ClosureStrategy::Fixpoint))
    }

    #[test]
    fn acyclic_has_no_stars() {
        let s = stars(&[(0, 1), (0, 3)], 2);
        assert!(s.is_empty());
        assert_eq!(s.to_string(), "{}");
    }

    #[test]
    fn every_group_on_a_cycle_is_a_star() {
        let s = stars(&[(0, 1), (1, 2), (2, 3), (3, 4)], 4);
        assert_eq!(
            s.iter().collect::<Vec<_>>(),
            vec![GroupId(0), GroupId(1), GroupId(2), GroupId(3)]
        );
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn tail_into_a_cycle_is_not_a_star() {
        // 0 -> 1 -> 2 -> 1
        let s = stars(&[(0, 1), (1, 2), (2, 4)], 3);
        assert!(!s.contains(GroupId(0)));
        assert!(s.contains(GroupId(1)));
        assert!(s.contains(GroupId(2)));
        assert_eq!(s.to_string(), "{1,2}");
    }
}

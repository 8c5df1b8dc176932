use std::fmt::Display;

use ahash::{HashSet, HashSetExt};
use itertools::Itertools;

use crate::group::GroupId;

/// One canonical JOIN pair: a source group, a concrete target value, and
/// whether the target value stands for its whole congruence class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairRep {
    pub a: GroupId,
    pub b: i64,
    pub star: bool,
}

impl PairRep {
    pub fn plain(a: GroupId, b: i64) -> Self {
        PairRep { a, b, star: false }
    }

    pub fn starred(a: GroupId, b: i64) -> Self {
        PairRep { a, b, star: true }
    }
}

impl Display for PairRep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.a, self.b)?;
        if self.star {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// The deduplicated output of the pair projection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalPairs(HashSet<PairRep>);

impl CanonicalPairs {
    pub fn new() -> Self {
        CanonicalPairs(HashSet::new())
    }

    /// Returns `true` if the pair was not present yet.
    pub fn insert(&mut self, pair: PairRep) -> bool {
        self.0.insert(pair)
    }

    pub fn contains(&self, pair: &PairRep) -> bool {
        self.0.contains(pair)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PairRep> {
        self.0.iter()
    }

    /// Pairs ordered by `(a, b, star)`.
    pub fn sorted(&self) -> Vec<PairRep> {
        self.0.iter().copied().sorted().collect()
    }
}

impl FromIterator<PairRep> for CanonicalPairs {
    fn from_iter<T: IntoIterator<Item = PairRep>>(iter: T) -> Self {
        CanonicalPairs(iter.into_iter().collect())
    }
}

impl Extend<PairRep> for CanonicalPairs {
    fn extend<T: IntoIterator<Item = PairRep>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl Display for CanonicalPairs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sorted().iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_marker_is_appended() {
        assert_eq!(PairRep::plain(GroupId(0), 3).to_string(), "(0,3)");
        assert_eq!(PairRep::starred(GroupId(1), -2).to_string(), "(1,-2)*");
    }

    #[test]
    fn duplicates_collapse_on_all_fields() {
        let pairs: CanonicalPairs = [
            PairRep::plain(GroupId(0), 1),
            PairRep::plain(GroupId(0), 1),
            PairRep::starred(GroupId(0), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.to_string(), "(0,1)\n(0,1)*");
    }
}

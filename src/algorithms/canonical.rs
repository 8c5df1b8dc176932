//! Projection of the closure onto canonical [`PairRep`]s.
//!
//! For a source group `a` and a different target group `g` with a non-empty
//! closure cell:
//! - if `g` reaches itself, every value of the class of `g` is eventually
//!   reachable from `a`, so the cell collapses to one starred pair carrying
//!   its smallest witness;
//! - otherwise each witness is emitted on its own, unstarred.
//!
//! Self relations never come out of that loop. Each star node `x` instead
//! contributes the fixed pair `(x, x + n)*`.

use tracing::trace;

use crate::pair::{CanonicalPairs, PairRep};

use super::{closure::ClosureMatrix, cycle::StarNodes};

pub fn canonical_pairs(closure: &ClosureMatrix, stars: &StarNodes) -> CanonicalPairs {
    let modulus = closure.modulus();
    let mut pairs = CanonicalPairs::new();

    for (a, g, cell) in closure.cells().iter() {
        if a == g {
            continue;
        }
        if stars.contains(g) {
            if let Some(min) = cell.min() {
                pairs.insert(PairRep::starred(a, min));
            }
        } else {
            pairs.extend(cell.iter().map(|b| PairRep::plain(a, b)));
        }
    }

    pairs.extend(
        stars
            .iter()
            .map(|x| PairRep::starred(x, modulus.self_cycle_value(x))),
    );

    trace!(pairs = pairs.len(), stars = stars.len(), "projected canonical pairs");
    pairs
}

#[cfg(test)]
mod tests {
    use crate::{
        algorithms::{closure::ClosureStrategy, projection::AdjacencyMatrix},
        group::{GroupId, Modulus},
    };

    use super::*;

    fn join(pairs: &[(i64, i64)], n: i64) -> CanonicalPairs {
        let adjacency = AdjacencyMatrix::project(pairs, Modulus::new(n).unwrap());
        let closure = ClosureMatrix::compute(&adjacency, ClosureStrategy::Fixpoint);
        let stars = StarNodes::detect(&closure);
        canonical_pairs(&closure, &stars)
    }

    #[test]
    fn no_cycle_keeps_every_witness() {
        let pairs = join(&[(0, 1), (0, 3)], 2);
        assert_eq!(
            pairs.sorted(),
            vec![PairRep::plain(GroupId(0), 1), PairRep::plain(GroupId(0), 3)]
        );
    }

    #[test]
    fn cyclic_targets_collapse_to_their_minimum() {
        let pairs = join(&[(0, 1), (0, 3), (1, 2)], 2);
        insta::assert_snapshot!(pairs, @r"
        (0,1)*
        (0,2)*
        (1,2)*
        (1,3)*
        ");
    }

    #[test]
    fn self_cycle_pair_ignores_actual_witnesses() {
        // Group 1 loops on itself through 7, but the representative is 1 + n.
        let pairs = join(&[(1, 7)], 3);
        assert_eq!(pairs.sorted(), vec![PairRep::starred(GroupId(1), 4)]);
    }

    #[test]
    fn mixed_star_and_plain_targets() {
        // n = 4: 0 -> 1 (values 5, 9), 0 -> 2 (value 6), 2 -> 2 (value 10).
        let pairs = join(&[(0, 5), (0, 9), (0, 6), (2, 10)], 4);
        insta::assert_snapshot!(pairs, @r"
        (0,5)
        (0,6)*
        (0,9)
        (2,6)*
        ");
    }
}

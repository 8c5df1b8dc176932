//! # Witness-preserving transitive closure
//!
//! The closure is computed over the group-level graph, but unlike a boolean
//! reachability matrix every cell keeps the set of concrete witness values
//! that can label a path from group `i` to group `j`.
//!
//! ## Merge rule
//!
//! Whenever `C(i, k)` and `C(k, j)` are both non-empty, every witness of
//! `C(k, j)` is added to `C(i, j)`. Witnesses always come from the last hop:
//! a value belongs to its own target group and is never combined with the
//! values of the hops before it.
//!
//! ## Strategies
//!
//! - [`ClosureStrategy::Fixpoint`]: repeated Floyd-Warshall style `(k, i, j)`
//!   passes until a whole pass adds nothing. Every pass only adds witnesses
//!   drawn from the finite input, so the loop terminates.
//! - [`ClosureStrategy::Propagation`]: for each source group `i`, a
//!   breadth-first search finds every group `k` reachable with a path of
//!   length at least one, then
//!   `C(i, j) = A(i, j) ∪ ⋃_k A(k, j)`.
//!
//! Both produce the least fixpoint of the merge rule, and therefore
//! identical cells.

use std::{collections::VecDeque, fmt::Display, ops::Index, str::FromStr};

use bitvec::{bitvec, order::Lsb0, vec::BitVec};
use tracing::debug;

use crate::{
    error::JoinError,
    group::{GroupId, Modulus},
    matrix::GroupMatrix,
    witness::WitnessSet,
};

use super::projection::AdjacencyMatrix;

/// How [`ClosureMatrix::compute`] reaches the fixpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClosureStrategy {
    /// Repeat full triple passes until nothing changes.
    #[default]
    Fixpoint,
    /// One breadth-first propagation per source group.
    Propagation,
}

impl Display for ClosureStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosureStrategy::Fixpoint => write!(f, "fixpoint"),
            ClosureStrategy::Propagation => write!(f, "propagation"),
        }
    }
}

impl FromStr for ClosureStrategy {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixpoint" => Ok(ClosureStrategy::Fixpoint),
            "propagation" => Ok(ClosureStrategy::Propagation),
            other => Err(JoinError::UnknownStrategy(other.to_string())),
        }
    }
}

/// The closed group matrix. Always a superset of the adjacency it was
/// computed from, cell by cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosureMatrix {
    modulus: Modulus,
    cells: GroupMatrix<WitnessSet>,
    strategy: ClosureStrategy,
    passes: usize,
}

impl ClosureMatrix {
    pub fn compute(adjacency: &AdjacencyMatrix, strategy: ClosureStrategy) -> Self {
        let (cells, passes) = match strategy {
            ClosureStrategy::Fixpoint => fixpoint(adjacency),
            ClosureStrategy::Propagation => propagation(adjacency),
        };

        debug!(
            groups = adjacency.n_groups(),
            %strategy,
            passes,
            "computed witness closure"
        );

        ClosureMatrix {
            modulus: adjacency.modulus(),
            cells,
            strategy,
            passes,
        }
    }

    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    pub fn n_groups(&self) -> usize {
        self.cells.n_groups()
    }

    pub fn cells(&self) -> &GroupMatrix<WitnessSet> {
        &self.cells
    }

    pub fn strategy(&self) -> ClosureStrategy {
        self.strategy
    }

    /// Number of full passes the fixpoint strategy ran, including the final
    /// pass that added nothing. The propagation strategy always reports 1.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Whether `j` is reachable from `i` by a path of length at least one.
    pub fn is_reachable(&self, i: GroupId, j: GroupId) -> bool {
        !self.cells[(i, j)].is_empty()
    }

    pub fn entry(&self, i: GroupId, j: GroupId) -> ClosureEntry<'_> {
        let cell = &self.cells[(i, j)];
        if i == j && !cell.is_empty() {
            ClosureEntry::Cycle
        } else {
            ClosureEntry::Witnesses(cell)
        }
    }

    /// Text grid where self-reaching diagonal cells show as `*` and every
    /// other cell shows its witness set.
    pub fn display(&self) -> ClosureDisplay<'_> {
        ClosureDisplay(self)
    }

    /// Reachability view of the closure: `0`, `1`, or `*` on the diagonal
    /// of a group that reaches itself.
    pub fn join_matrix(&self) -> JoinMatrix {
        JoinMatrix(self.cells.map(|i, j, c| {
            if c.is_empty() {
                JoinMark::Unreachable
            } else if i == j {
                JoinMark::Cycle
            } else {
                JoinMark::Reachable
            }
        }))
    }
}

impl Index<(GroupId, GroupId)> for ClosureMatrix {
    type Output = WitnessSet;
    fn index(&self, idx: (GroupId, GroupId)) -> &Self::Output {
        &self.cells[idx]
    }
}

fn fixpoint(adjacency: &AdjacencyMatrix) -> (GroupMatrix<WitnessSet>, usize) {
    let n = adjacency.n_groups();
    let mut cells = adjacency.cells().clone();
    let mut passes = 0;

    loop {
        passes += 1;
        let mut added = 0;

        for k in (0..n).map(GroupId) {
            for i in (0..n).map(GroupId) {
                // C(k, j) into itself is a no-op.
                if i == k || cells[(i, k)].is_empty() {
                    continue;
                }
                for j in (0..n).map(GroupId) {
                    if let Some((dst, src)) = cells.split_pair((i, j), (k, j)) {
                        added += dst.absorb(src);
                    }
                }
            }
        }

        debug!(pass = passes, added, "fixpoint pass");
        if added == 0 {
            return (cells, passes);
        }
    }
}

fn propagation(adjacency: &AdjacencyMatrix) -> (GroupMatrix<WitnessSet>, usize) {
    let n = adjacency.n_groups();
    let mut cells = adjacency.cells().clone();

    for i in (0..n).map(GroupId) {
        let reach = reachable_from(adjacency, i);
        // Row i already starts out as A(i, _).
        for k in reach.iter_ones().map(GroupId).filter(|&k| k != i) {
            for j in (0..n).map(GroupId) {
                cells[(i, j)].absorb(&adjacency[(k, j)]);
            }
        }
    }

    (cells, 1)
}

/// Groups reachable from `source` by a path of length at least one.
///
/// `source` itself is included only if it lies on a cycle.
fn reachable_from(adjacency: &AdjacencyMatrix, source: GroupId) -> BitVec {
    let mut visited = bitvec![usize, Lsb0; 0; adjacency.n_groups()];
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for &next in adjacency.successors(current) {
            if !visited[next.0] {
                visited.set(next.0, true);
                queue.push_back(next);
            }
        }
    }

    visited
}

/// One cell of [`ClosureMatrix::display`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosureEntry<'a> {
    Cycle,
    Witnesses(&'a WitnessSet),
}

impl Display for ClosureEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosureEntry::Cycle => write!(f, "*"),
            ClosureEntry::Witnesses(set) => write!(f, "{set}"),
        }
    }
}

pub struct ClosureDisplay<'a>(&'a ClosureMatrix);

impl Display for ClosureDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0
            .cells
            .write_grid(f, |i, j, _| self.0.entry(i, j).to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinMark {
    Unreachable,
    Reachable,
    Cycle,
}

impl Display for JoinMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinMark::Unreachable => write!(f, "0"),
            JoinMark::Reachable => write!(f, "1"),
            JoinMark::Cycle => write!(f, "*"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JoinMatrix(GroupMatrix<JoinMark>);

impl Index<(GroupId, GroupId)> for JoinMatrix {
    type Output = JoinMark;
    fn index(&self, idx: (GroupId, GroupId)) -> &Self::Output {
        &self.0[idx]
    }
}

impl Display for JoinMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.write_grid(f, |_, _, mark| mark.to_string())
    }
}

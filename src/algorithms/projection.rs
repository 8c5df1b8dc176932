use std::ops::Index;

use tracing::trace;

use crate::{
    group::{GroupId, Modulus},
    matrix::{EdgeMatrix, GroupMatrix},
    witness::WitnessSet,
};

/// Group-level adjacency built directly from the input pairs.
///
/// Cell `(u, v)` holds every `b` of an input pair `(a, b)` with
/// `a mod n = u` and `b mod n = v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    modulus: Modulus,
    cells: GroupMatrix<WitnessSet>,
    successors: Vec<Vec<GroupId>>,
}

impl AdjacencyMatrix {
    /// Projects raw `(a, b)` pairs onto the groups of `modulus`.
    pub fn project(pairs: &[(i64, i64)], modulus: Modulus) -> Self {
        let n = modulus.n_groups();
        let mut cells = GroupMatrix::from_fn(n, |_, _| WitnessSet::new());
        let mut successors = vec![Vec::new(); n];

        for &(a, b) in pairs {
            let u = modulus.group_of(a);
            let v = modulus.group_of(b);
            let cell = &mut cells[(u, v)];
            if cell.is_empty() {
                successors[u.0].push(v);
            }
            cell.insert(b);
        }

        trace!(pairs = pairs.len(), groups = n, "projected inversion pairs");
        AdjacencyMatrix {
            modulus,
            cells,
            successors,
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

    /// Groups directly reachable from `u`, in order of first appearance.
    pub fn successors(&self, u: GroupId) -> &[GroupId] {
        &self.successors[u.0]
    }

    pub fn has_edge(&self, u: GroupId, v: GroupId) -> bool {
        !self.cells[(u, v)].is_empty()
    }

    /// The boolean view: an edge wherever a cell is non-empty.
    pub fn edges(&self) -> EdgeMatrix {
        EdgeMatrix::from_matrix(&self.cells, |c| !c.is_empty())
    }
}

impl Index<(GroupId, GroupId)> for AdjacencyMatrix {
    type Output = WitnessSet;
    fn index(&self, idx: (GroupId, GroupId)) -> &Self::Output {
        &self.cells[idx]
    }
}

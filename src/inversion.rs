use tracing::trace;

use crate::{
    algorithms::{
        canonical::canonical_pairs,
        closure::{ClosureMatrix, ClosureStrategy},
        cycle::StarNodes,
        projection::AdjacencyMatrix,
    },
    error::JoinError,
    group::Modulus,
    pair::CanonicalPairs,
};

/// Cached derivations of an [`InversionSet`].
///
/// The closure and the star nodes only ever exist together, next to the
/// adjacency they were derived from.
#[derive(Clone, Debug, Default)]
enum Stage {
    #[default]
    Unbuilt,
    AdjacencyReady(AdjacencyMatrix),
    ClosureReady {
        adjacency: AdjacencyMatrix,
        closure: ClosureMatrix,
        stars: StarNodes,
    },
}

/// A fixed list of inversion pairs over the groups of a modulus, with the
/// JOIN pipeline computed lazily on top of it.
#[derive(Clone, Debug)]
pub struct InversionSet {
    inversions: Vec<(i64, i64)>,
    modulus: Modulus,
    strategy: ClosureStrategy,
    stage: Stage,
}

impl InversionSet {
    pub fn new(
        inversions: impl IntoIterator<Item = (i64, i64)>,
        n: i64,
    ) -> Result<Self, JoinError> {
        Ok(InversionSet {
            inversions: inversions.into_iter().collect(),
            modulus: Modulus::new(n)?,
            strategy: ClosureStrategy::default(),
            stage: Stage::Unbuilt,
        })
    }

    /// Selects how the closure is computed. Drops any cached closure.
    pub fn with_strategy(mut self, strategy: ClosureStrategy) -> Self {
        if strategy != self.strategy {
            self.strategy = strategy;
            self.stage = match std::mem::take(&mut self.stage) {
                Stage::ClosureReady { adjacency, .. } => Stage::AdjacencyReady(adjacency),
                other => other,
            };
        }
        self
    }

    pub fn inversions(&self) -> &[(i64, i64)] {
        &self.inversions
    }

    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    pub fn strategy(&self) -> ClosureStrategy {
        self.strategy
    }

    /// Rebuilds the adjacency from the inversion list, discarding the cached
    /// closure and star nodes.
    pub fn build_adjacency(&mut self) -> &AdjacencyMatrix {
        if matches!(self.stage, Stage::ClosureReady { .. }) {
            trace!("invalidating cached closure");
        }
        self.stage = Stage::AdjacencyReady(AdjacencyMatrix::project(
            &self.inversions,
            self.modulus,
        ));
        match &self.stage {
            Stage::AdjacencyReady(adjacency) => adjacency,
            _ => unreachable!("adjacency was just built"),
        }
    }

    /// The adjacency, building it first if needed. Never invalidates.
    pub fn adjacency(&mut self) -> &AdjacencyMatrix {
        if matches!(self.stage, Stage::Unbuilt) {
            self.build_adjacency();
        }
        match &self.stage {
            Stage::AdjacencyReady(adjacency) | Stage::ClosureReady { adjacency, .. } => adjacency,
            Stage::Unbuilt => unreachable!("adjacency was just built"),
        }
    }

    fn ensure_closure(&mut self) {
        if matches!(self.stage, Stage::Unbuilt) {
            self.build_adjacency();
        }
        self.stage = match std::mem::take(&mut self.stage) {
            Stage::AdjacencyReady(adjacency) => {
                let closure = ClosureMatrix::compute(&adjacency, self.strategy);
                let stars = StarNodes::detect(&closure);
                Stage::ClosureReady {
                    adjacency,
                    closure,
                    stars,
                }
            }
            ready => ready,
        };
    }

    /// The witness closure, computed once per adjacency build.
    pub fn compute_closure(&mut self) -> &ClosureMatrix {
        self.ensure_closure();
        match &self.stage {
            Stage::ClosureReady { closure, .. } => closure,
            _ => unreachable!("closure was just computed"),
        }
    }

    pub fn star_nodes(&mut self) -> &StarNodes {
        self.ensure_closure();
        match &self.stage {
            Stage::ClosureReady { stars, .. } => stars,
            _ => unreachable!("closure was just computed"),
        }
    }

    pub fn compute_canonical_pairs(&mut self) -> CanonicalPairs {
        self.ensure_closure();
        match &self.stage {
            Stage::ClosureReady { closure, stars, .. } => canonical_pairs(closure, stars),
            _ => unreachable!("closure was just computed"),
        }
    }

    /// Whether a closure is currently cached.
    pub fn is_closed(&self) -> bool {
        matches!(self.stage, Stage::ClosureReady { .. })
    }
}

//! # invjoin
//!
//! JOIN closure of directed inversion pairs over the residue classes of a
//! fixed modulus `n`.
//!
//! An inversion pair `(a, b)` is an edge from the group of `a` to the group
//! of `b`, labelled with the concrete value `b`. The crate closes the
//! group-level graph transitively while keeping every witness value, finds
//! the groups that sit on a cycle, and emits a canonical pair set in which a
//! cyclic target group collapses to a single starred representative.
//!
//! ```
//! use invjoin::InversionSet;
//!
//! let mut set = InversionSet::new([(0, 1), (0, 3), (1, 2)], 2)?;
//! let pairs = set.compute_canonical_pairs();
//! assert_eq!(pairs.to_string(), "(0,1)*\n(0,2)*\n(1,2)*\n(1,3)*");
//! # Ok::<(), invjoin::JoinError>(())
//! ```

pub mod algorithms;
pub mod error;
pub mod group;
pub mod inversion;
pub mod matrix;
pub mod pair;
pub mod witness;

pub use algorithms::{
    closure::{ClosureMatrix, ClosureStrategy},
    cycle::StarNodes,
    projection::AdjacencyMatrix,
};
pub use error::JoinError;
pub use group::{GroupId, Modulus};
pub use inversion::InversionSet;
pub use pair::{CanonicalPairs, PairRep};
pub use witness::WitnessSet;

//! # The JOIN pipeline
//!
//! Each stage consumes only the output of the stage before it:
//!
//! 1. [`projection`]: integer pairs to a group-indexed [`projection::AdjacencyMatrix`]
//!    of witness sets
//! 2. [`closure`]: transitive closure of that matrix under witness-set union
//! 3. [`cycle`]: groups whose diagonal closure cell is non-empty
//! 4. [`canonical`]: closure and star nodes to the canonical pair set
//!
//! [`crate::InversionSet`] drives the stages and caches their results.

pub mod canonical;
pub mod closure;
pub mod cycle;
pub mod projection;

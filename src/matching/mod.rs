//! Capability matching between recipe steps and resources.
//!
//! Matching runs in three gates per capability record:
//!
//! 1. Semantic: the step's required capability identifier against the
//!    record's identifier, name, and generalizations (trailing-segment
//!    comparison, see [`local_name`]).
//! 2. Properties: every step parameter pairs with a record property of
//!    the same id, compatible unit, and satisfiable value.
//! 3. Preconditions: constraints on the materials feeding the step.
//!
//! [`CapabilityMatcher::transfer_required`] adds a fourth, cross-pair
//! check used by the model builder to prune assignments that would need
//! transport the resource cannot perform.

mod matcher;
mod semantic;

pub use matcher::{CapabilityMatch, CapabilityMatcher, PropertyMatch, StepResourceMatch};
pub use semantic::{local_name, semantic_match};

//! Engine error taxonomy.
//!
//! Structural input problems are fatal and reported before any model is
//! built. Everything softer (a step nobody can perform, an attempt cap
//! reached mid-enumeration) is not an error: it is carried in
//! [`SearchOutcome`](crate::search::SearchOutcome) so that "no solution"
//! stays distinguishable from a crash.

use thiserror::Error;

/// Errors that abort a run before or during model construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The recipe contains no process steps.
    #[error("recipe has no process steps")]
    EmptyRecipe,

    /// No resources with capabilities were supplied.
    #[error("no resources were provided")]
    NoResources,

    /// Two process steps share the same id, so id-keyed lookups would be
    /// ambiguous.
    #[error("duplicate step id: {0}")]
    DuplicateStepId(String),

    /// Two resources share the same name.
    #[error("duplicate resource name: {0}")]
    DuplicateResource(String),

    /// The search configuration failed validation.
    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

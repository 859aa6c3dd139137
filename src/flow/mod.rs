//! Material-flow consistency checking.
//!
//! The SAT encoding knows nothing about where materials sit, so the
//! search filters every candidate assignment through [`FlowValidator`]
//! before accepting it as a solution.

mod validator;

pub use validator::{FlowValidator, StepAssignmentView};

//! Assignment search over the boolean encoding.
//!
//! [`AssignmentRunner`] drives one self-contained session: encode the
//! recipe with [`AssignmentModel`], enumerate solver models under
//! blocking clauses, filter through the material-flow validator, and
//! export accepted assignments. Runs stop when the model space is
//! exhausted, after the first accepted solution when `find_all` is off,
//! at the attempt ceiling, or on cancellation.

mod builder;
mod config;
mod session;

pub use builder::AssignmentModel;
pub use config::SearchConfig;
pub use session::{AssignmentRunner, SearchOutcome, SearchTermination};

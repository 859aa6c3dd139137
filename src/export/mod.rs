//! Solution export as display rows and structured records.

mod exporter;
mod solution;

pub use exporter::{append_solution_rows, AssignmentRow, DisplayRow, SolutionExporter};
pub use solution::{CapabilityDetail, MatchedProperty, Solution, StepAssignment};

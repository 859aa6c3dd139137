//! Builds display rows and structured records from raw search output.

use crate::matching::StepResourceMatch;
use crate::model::{Parameter, PropertyValue, Recipe, Resource};

use super::solution::{CapabilityDetail, MatchedProperty, Solution, StepAssignment};

/// One human-readable table row for a step assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentRow {
    pub solution_id: usize,
    pub step_id: String,
    pub description: String,
    pub resource: String,
    /// One line per matched capability, see
    /// [`SolutionExporter::capability_text`].
    pub capabilities: String,
    /// Row status marker, `"Matched"` for every exported row.
    pub status: String,
}

/// Row stream element: assignment rows grouped by solution, separated by
/// [`DisplayRow::Separator`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayRow {
    Separator,
    Assignment(AssignmentRow),
}

/// Appends one solution's rows, inserting a separator between solutions.
pub fn append_solution_rows(out: &mut Vec<DisplayRow>, rows: Vec<AssignmentRow>) {
    if !out.is_empty() {
        out.push(DisplayRow::Separator);
    }
    out.extend(rows.into_iter().map(DisplayRow::Assignment));
}

/// Turns accepted assignments into display rows and [`Solution`] records.
pub struct SolutionExporter<'a> {
    recipe: &'a Recipe,
    resources: &'a [Resource],
}

impl<'a> SolutionExporter<'a> {
    pub fn new(recipe: &'a Recipe, resources: &'a [Resource]) -> Self {
        Self { recipe, resources }
    }

    /// Builds the structured record for one accepted assignment.
    ///
    /// `chosen` is indexed by step: the resource index and the match
    /// metadata the search decided on.
    pub fn solution(
        &self,
        id: usize,
        chosen: &[(usize, &StepResourceMatch)],
        flow_consistent: bool,
    ) -> Solution {
        let assignments = self
            .recipe
            .steps
            .iter()
            .zip(chosen)
            .map(|(step, &(resource, matched))| {
                let details = matched
                    .capabilities
                    .iter()
                    .map(|cap| CapabilityDetail {
                        capability: cap.capability.clone(),
                        properties: cap
                            .properties
                            .iter()
                            .map(|pair| MatchedProperty {
                                property_id: pair.property.id.clone(),
                                property_name: pair.property.name.clone(),
                                unit: pair.property.unit.clone(),
                                value: pair.property.value.clone(),
                                realized_by: pair.property.realized_by.clone(),
                            })
                            .collect(),
                    })
                    .collect();
                StepAssignment {
                    step_id: step.id.clone(),
                    description: step.description.clone(),
                    resource: self.resources[resource].name.clone(),
                    capabilities: matched
                        .capability_names()
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                    parameters: step.parameters.clone(),
                    details,
                }
            })
            .collect();
        Solution {
            id,
            assignments,
            flow_consistent,
        }
    }

    /// Builds one display row per step for one accepted assignment.
    pub fn rows(
        &self,
        solution_id: usize,
        chosen: &[(usize, &StepResourceMatch)],
    ) -> Vec<AssignmentRow> {
        self.recipe
            .steps
            .iter()
            .zip(chosen)
            .map(|(step, &(resource, matched))| AssignmentRow {
                solution_id,
                step_id: step.id.clone(),
                description: step.description.clone(),
                resource: self.resources[resource].name.clone(),
                capabilities: Self::capability_text(matched),
                status: "Matched".to_owned(),
            })
            .collect()
    }

    /// Human-readable capability summary, one line per matched capability.
    ///
    /// Capabilities with property pairings render as
    /// `Name (Label: required -> provided, ...)` where the label is the
    /// first word of the parameter description (the parameter key when
    /// there is none).
    pub fn capability_text(matched: &StepResourceMatch) -> String {
        let lines: Vec<String> = matched
            .capabilities
            .iter()
            .map(|cap| {
                if cap.properties.is_empty() {
                    return cap.capability.clone();
                }
                let pairs: Vec<String> = cap
                    .properties
                    .iter()
                    .map(|pair| {
                        format!(
                            "{}: {} -> {}",
                            parameter_label(&pair.parameter),
                            pair.parameter.value,
                            render_value(&pair.property.value),
                        )
                    })
                    .collect();
                format!("{} ({})", cap.capability, pairs.join(", "))
            })
            .collect();
        lines.join("\n")
    }
}

fn parameter_label(parameter: &Parameter) -> &str {
    parameter
        .description
        .split_whitespace()
        .next()
        .unwrap_or(&parameter.key)
}

/// Renders a provided value for the capability summary.
fn render_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Exact { value } => value.to_string(),
        PropertyValue::DiscreteSet { values } => {
            let rendered: Vec<String> = values.iter().map(f64::to_string).collect();
            format!("{{{}}}", rendered.join(", "))
        }
        PropertyValue::Range { min, max } => {
            format!("[{} - {}]", render_bound(*min, "-inf"), render_bound(*max, "inf"))
        }
        PropertyValue::Unspecified => "?".to_owned(),
    }
}

fn render_bound(bound: Option<f64>, unbounded: &str) -> String {
    match bound {
        Some(value) => value.to_string(),
        None => unbounded.to_owned(),
    }
}

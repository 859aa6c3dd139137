//! Structured solution records.
//!
//! These are the machine-facing output of a search, shaped for
//! downstream consumers such as a master-recipe generator. With the
//! `serde` feature enabled every record serializes, and
//! [`MatchedProperty::value`] carries its representation kind in the
//! `value_type` tag.

use crate::model::{Parameter, PropertyValue};

/// One property pairing inside a matched capability.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchedProperty {
    pub property_id: String,
    pub property_name: String,
    pub unit: Option<String>,
    pub value: PropertyValue,
    /// Identifier of the element realizing the property, when declared.
    pub realized_by: Option<String>,
}

/// One capability that satisfied a step, with its matched properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityDetail {
    pub capability: String,
    pub properties: Vec<MatchedProperty>,
}

/// Final assignment of one step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepAssignment {
    pub step_id: String,
    pub description: String,
    /// Name of the assigned resource.
    pub resource: String,
    /// Names of all capabilities that matched the step.
    pub capabilities: Vec<String>,
    /// The step's parameters, echoed for consumers without recipe access.
    pub parameters: Vec<Parameter>,
    pub details: Vec<CapabilityDetail>,
}

/// One complete assignment accepted by the search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Sequential id starting at 1, in acceptance order.
    pub id: usize,
    /// One entry per recipe step, in step order.
    pub assignments: Vec<StepAssignment>,
    /// Whether the assignment passed material-flow validation.
    pub flow_consistent: bool,
}

impl Solution {
    /// The assignment for `step_id`, if present.
    pub fn assignment(&self, step_id: &str) -> Option<&StepAssignment> {
        self.assignments.iter().find(|a| a.step_id == step_id)
    }
}

//! Step/resource feasibility decisions.
//!
//! A pairing is feasible when at least one capability of the resource
//! passes all three gates: semantic identifier match, property/unit/value
//! compatibility for every step parameter, and precondition constraints on
//! the materials feeding the step. On top of that, the builder consults
//! [`CapabilityMatcher::transfer_required`] to prune pairings that would
//! need material transport the resource cannot perform.

use std::collections::HashMap;

use super::semantic::semantic_match;
use crate::model::{
    CapabilityRecord, ConstraintKind, MaterialNode, Parameter, ProcessStep, PropertyRecord,
    PropertyValue, Recipe, Resource, ValueRequirement,
};

/// One matched (parameter, property) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMatch {
    pub parameter: Parameter,
    pub property: PropertyRecord,
}

/// One capability that satisfies a step, with its property pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityMatch {
    /// Capability name as declared by the resource.
    pub capability: String,
    /// Matched pairs in parameter order; empty when the step has no
    /// parameters.
    pub properties: Vec<PropertyMatch>,
}

/// Feasibility metadata for one (step, resource) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResourceMatch {
    /// All capabilities of the resource that satisfy the step.
    pub capabilities: Vec<CapabilityMatch>,
}

impl StepResourceMatch {
    /// Names of the matched capabilities, in record order.
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities
            .iter()
            .map(|c| c.capability.as_str())
            .collect()
    }

    /// Whether any matched capability is transport-class.
    ///
    /// This is the "active for that step" notion used by flow validation:
    /// a Transfer capability the step did not match does not count.
    pub fn has_transport_active(&self) -> bool {
        self.capabilities
            .iter()
            .any(|c| crate::model::is_transport_capability(&c.capability))
    }
}

/// Decides step/resource feasibility against one recipe.
pub struct CapabilityMatcher<'a> {
    recipe: &'a Recipe,
    step_index: HashMap<&'a str, usize>,
}

impl<'a> CapabilityMatcher<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        let step_index = recipe
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        Self { recipe, step_index }
    }

    /// Runs the semantic, property, and precondition gates for one pair.
    ///
    /// Returns `None` when no capability of the resource satisfies the
    /// step. Transfer pruning is separate (see
    /// [`transfer_required`](Self::transfer_required)) because it depends
    /// on the feasibility of other pairs.
    pub fn match_step(&self, step: &ProcessStep, resource: &Resource) -> Option<StepResourceMatch> {
        let feeding = self.recipe.inbound_materials(&step.id);

        let mut capabilities = Vec::new();
        for record in &resource.capabilities {
            if !semantic_match(&step.required_capability, record) {
                continue;
            }
            let Some(properties) = matched_properties(step, record) else {
                continue;
            };
            if !preconditions_hold(record, &feeding) {
                continue;
            }
            capabilities.push(CapabilityMatch {
                capability: record.name.clone(),
                properties,
            });
        }

        if capabilities.is_empty() {
            None
        } else {
            Some(StepResourceMatch { capabilities })
        }
    }

    /// Whether assigning `step` to the resource at index `candidate` would
    /// require transport capability.
    ///
    /// True when any direct predecessor step (step→step links) has a
    /// tentative feasible match on some other resource. `tentative` is the
    /// feasibility matrix built so far, indexed `[step][resource]`.
    pub fn transfer_required(
        &self,
        step: &ProcessStep,
        candidate: usize,
        tentative: &[Vec<Option<StepResourceMatch>>],
    ) -> bool {
        for predecessor in self.recipe.predecessor_steps(&step.id) {
            let Some(&row) = self.step_index.get(predecessor.id.as_str()) else {
                continue;
            };
            let elsewhere = tentative[row]
                .iter()
                .enumerate()
                .any(|(k, entry)| k != candidate && entry.is_some());
            if elsewhere {
                return true;
            }
        }
        false
    }
}

/// Pairs every step parameter with a satisfying capability property.
///
/// Returns `None` as soon as one parameter has no satisfying property.
fn matched_properties(step: &ProcessStep, record: &CapabilityRecord) -> Option<Vec<PropertyMatch>> {
    let mut matches = Vec::with_capacity(step.parameters.len());
    for parameter in &step.parameters {
        let requirement = ValueRequirement::parse(&parameter.value);
        let property = record.properties.iter().find(|prop| {
            prop.id == parameter.key
                && units_compatible(parameter.unit.as_deref(), prop.unit.as_deref())
                && value_admitted(requirement.as_ref(), &prop.value)
        })?;
        matches.push(PropertyMatch {
            parameter: parameter.clone(),
            property: property.clone(),
        });
    }
    Some(matches)
}

/// Units conflict only when both sides declare one and they differ.
fn units_compatible(parameter: Option<&str>, property: Option<&str>) -> bool {
    match (parameter, property) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// An unspecified representation admits everything, including unparsable
/// requirements; otherwise the requirement must parse and be satisfiable.
fn value_admitted(requirement: Option<&ValueRequirement>, value: &PropertyValue) -> bool {
    if matches!(value, PropertyValue::Unspecified) {
        return true;
    }
    requirement.is_some_and(|req| req.admits(value))
}

/// Every precondition constraint must be satisfied by some feeding
/// material with the same key and unit.
fn preconditions_hold(record: &CapabilityRecord, feeding: &[&MaterialNode]) -> bool {
    for constraint in &record.constraints {
        if constraint.kind != ConstraintKind::Precondition {
            continue;
        }
        let Some(requirement) = ValueRequirement::parse(&constraint.expression) else {
            return false;
        };
        let satisfied = feeding.iter().any(|material| {
            material.key == constraint.property
                && material.unit == constraint.unit
                && requirement.holds_for(material.quantity)
        });
        if !satisfied {
            return false;
        }
    }
    true
}

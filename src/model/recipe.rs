//! Recipe-side input model.
//!
//! A [`Recipe`] is a directed graph of process steps and material nodes,
//! produced by an external recipe parser and treated as read-only for the
//! duration of a run.

use crate::error::{EngineError, EngineResult};

/// One required parameter of a process step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// Semantic key, matched against capability property ids.
    pub key: String,
    /// Human-readable description; its first word labels display rows.
    pub description: String,
    /// Required value expression, e.g. `">=20"` or `"80"`.
    pub value: String,
    /// Unit of measure, if declared.
    pub unit: Option<String>,
    /// Declared data type, if any; informational only.
    pub data_type: Option<String>,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: String::new(),
            value: value.into(),
            unit: None,
            data_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }
}

/// One process step of a recipe.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessStep {
    pub id: String,
    pub description: String,
    /// Required capability identifier (IRI or plain name).
    pub required_capability: String,
    /// Ordered parameter list.
    pub parameters: Vec<Parameter>,
}

impl ProcessStep {
    pub fn new(id: impl Into<String>, required_capability: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            required_capability: required_capability.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// Role of a material node within the recipe graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaterialKind {
    Input,
    Intermediate,
    Output,
}

/// A material node of the recipe graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialNode {
    pub id: String,
    pub kind: MaterialKind,
    pub quantity: f64,
    pub unit: Option<String>,
    /// Semantic key, matched against precondition property ids.
    pub key: String,
}

impl MaterialNode {
    pub fn new(id: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            id: id.into(),
            kind,
            quantity: 0.0,
            unit: None,
            key: String::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// Directed edge between a step and a material (or between two steps).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectedLink {
    pub from: String,
    pub to: String,
}

impl DirectedLink {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A complete recipe: steps, materials, and the links connecting them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub steps: Vec<ProcessStep>,
    pub materials: Vec<MaterialNode>,
    pub links: Vec<DirectedLink>,
}

impl Recipe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: ProcessStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_material(mut self, material: MaterialNode) -> Self {
        self.materials.push(material);
        self
    }

    pub fn with_link(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.links.push(DirectedLink::new(from, to));
        self
    }

    pub fn step_by_id(&self, id: &str) -> Option<&ProcessStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn material_by_id(&self, id: &str) -> Option<&MaterialNode> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn is_step(&self, id: &str) -> bool {
        self.steps.iter().any(|s| s.id == id)
    }

    pub fn is_material(&self, id: &str) -> bool {
        self.materials.iter().any(|m| m.id == id)
    }

    /// Materials feeding a step via inbound links, in link order.
    ///
    /// Only inputs and intermediates feed steps; outputs never do.
    pub fn inbound_materials(&self, step_id: &str) -> Vec<&MaterialNode> {
        self.links
            .iter()
            .filter(|link| link.to == step_id)
            .filter_map(|link| self.material_by_id(&link.from))
            .filter(|m| m.kind != MaterialKind::Output)
            .collect()
    }

    /// Steps linked directly into a step (step→step edges only), in link
    /// order.
    pub fn predecessor_steps(&self, step_id: &str) -> Vec<&ProcessStep> {
        self.links
            .iter()
            .filter(|link| link.to == step_id)
            .filter_map(|link| self.step_by_id(&link.from))
            .collect()
    }

    /// Checks the structural invariants required before model construction.
    pub fn validate(&self) -> EngineResult<()> {
        if self.steps.is_empty() {
            return Err(EngineError::EmptyRecipe);
        }
        let mut seen = std::collections::HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(EngineError::DuplicateStepId(step.id.clone()));
            }
        }
        Ok(())
    }
}

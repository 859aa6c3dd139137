//! Resource capability descriptions.
//!
//! A [`Resource`] offers an ordered list of [`CapabilityRecord`]s, each with
//! semantic identifiers, typed property values, and optional precondition
//! constraints on inbound materials. These records are produced by an
//! external AAS/AASX parser; the engine treats them as read-only input.

/// Capability names that move material between resources.
///
/// A step whose matched capability is one of these hands its output
/// material off instead of pinning it to the executing resource.
pub const TRANSPORT_CAPABILITIES: [&str; 3] = ["Dosing", "Transfer", "Discharge"];

/// Whether a capability name is transport-class.
pub fn is_transport_capability(name: &str) -> bool {
    TRANSPORT_CAPABILITIES.contains(&name)
}

/// Value representation of a capability property.
///
/// The variant tag doubles as the exported classification
/// (`exact | discrete_set | range | unspecified`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "value_type", rename_all = "snake_case"))]
pub enum PropertyValue {
    /// A single providable value.
    Exact { value: f64 },
    /// A finite set of providable values.
    DiscreteSet { values: Vec<f64> },
    /// A continuous range; either bound may be open.
    Range { min: Option<f64>, max: Option<f64> },
    /// No value information; admits every requirement.
    Unspecified,
}

impl PropertyValue {
    /// Classification label, matching the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Exact { .. } => "exact",
            PropertyValue::DiscreteSet { .. } => "discrete_set",
            PropertyValue::Range { .. } => "range",
            PropertyValue::Unspecified => "unspecified",
        }
    }
}

/// One property of a capability.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyRecord {
    /// Semantic property id, matched against parameter keys.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Unit of measure, if declared.
    pub unit: Option<String>,
    /// Value representation.
    pub value: PropertyValue,
    /// Identifier of the realizing element, passed through to the
    /// downstream Master-Recipe export.
    pub realized_by: Option<String>,
}

impl PropertyRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: None,
            value: PropertyValue::Unspecified,
            realized_by: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_value(mut self, value: PropertyValue) -> Self {
        self.value = value;
        self
    }

    pub fn with_realized_by(mut self, id: impl Into<String>) -> Self {
        self.realized_by = Some(id.into());
        self
    }
}

/// Kind of a [`PropertyConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintKind {
    /// Must hold on the materials feeding the step before it runs.
    Precondition,
    /// Any other conditional type; ignored by matching.
    Other,
}

/// A conditional constraint attached to a capability.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyConstraint {
    /// Property id the constraint refers to, matched against material keys.
    pub property: String,
    pub kind: ConstraintKind,
    /// Unit the referenced quantity must be expressed in.
    pub unit: Option<String>,
    /// Comparison expression, e.g. `">=5"`.
    pub expression: String,
}

impl PropertyConstraint {
    /// Creates a precondition constraint.
    pub fn precondition(property: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            kind: ConstraintKind::Precondition,
            unit: None,
            expression: expression.into(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_kind(mut self, kind: ConstraintKind) -> Self {
        self.kind = kind;
        self
    }
}

/// One capability offered by a resource.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityRecord {
    /// Capability name, e.g. `"Heating"`.
    pub name: String,
    /// Semantic identifier (IRI or plain name).
    pub semantic_id: String,
    /// Identifiers of more general capabilities this one specializes.
    pub generalized_by: Vec<String>,
    /// Identifiers of the asset elements realizing this capability.
    pub realized_by: Vec<String>,
    pub properties: Vec<PropertyRecord>,
    pub constraints: Vec<PropertyConstraint>,
}

impl CapabilityRecord {
    pub fn new(name: impl Into<String>, semantic_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantic_id: semantic_id.into(),
            generalized_by: Vec::new(),
            realized_by: Vec::new(),
            properties: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn with_generalization(mut self, id: impl Into<String>) -> Self {
        self.generalized_by.push(id.into());
        self
    }

    pub fn with_realization(mut self, id: impl Into<String>) -> Self {
        self.realized_by.push(id.into());
        self
    }

    pub fn with_property(mut self, property: PropertyRecord) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_constraint(mut self, constraint: PropertyConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Whether this capability's name is transport-class.
    pub fn is_transport(&self) -> bool {
        is_transport_capability(&self.name)
    }
}

/// A physical resource with its capability list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub name: String,
    pub capabilities: Vec<CapabilityRecord>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: Vec::new(),
        }
    }

    pub fn with_capability(mut self, capability: CapabilityRecord) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Whether any offered capability is transport-class, regardless of
    /// whether it matches a given step.
    pub fn has_transport_capability(&self) -> bool {
        self.capabilities.iter().any(|c| c.is_transport())
    }
}

/// Checks the structural invariants of a resource list before model
/// construction.
pub fn validate_resources(resources: &[Resource]) -> crate::error::EngineResult<()> {
    if resources.is_empty() {
        return Err(crate::error::EngineError::NoResources);
    }
    let mut seen = std::collections::HashSet::new();
    for resource in resources {
        if !seen.insert(resource.name.as_str()) {
            return Err(crate::error::EngineError::DuplicateResource(
                resource.name.clone(),
            ));
        }
    }
    Ok(())
}

/// Collects per-file parse results from the external capability parser.
///
/// Failures are recovered locally: the resource is skipped and its error
/// becomes a warning line, so one bad file never aborts a run.
pub fn collect_resources<E: std::fmt::Display>(
    results: impl IntoIterator<Item = Result<Resource, E>>,
) -> (Vec<Resource>, Vec<String>) {
    let mut resources = Vec::new();
    let mut warnings = Vec::new();
    for result in results {
        match result {
            Ok(resource) => resources.push(resource),
            Err(err) => {
                let warning = err.to_string();
                tracing::warn!(error = %warning, "skipping unparsable resource");
                warnings.push(warning);
            }
        }
    }
    (resources, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_capability_names() {
        assert!(is_transport_capability("Dosing"));
        assert!(is_transport_capability("Transfer"));
        assert!(is_transport_capability("Discharge"));
        assert!(!is_transport_capability("Heating"));
        // Exact names only; no normalization here.
        assert!(!is_transport_capability("dosing"));
    }

    #[test]
    fn test_resource_transport_lookup() {
        let plain = Resource::new("R1")
            .with_capability(CapabilityRecord::new("Heating", "urn:cap#Heating"));
        assert!(!plain.has_transport_capability());

        let mover = plain
            .clone()
            .with_capability(CapabilityRecord::new("Transfer", "urn:cap#Transfer"));
        assert!(mover.has_transport_capability());
    }

    #[test]
    fn test_property_value_kind() {
        assert_eq!(PropertyValue::Exact { value: 1.0 }.kind(), "exact");
        assert_eq!(
            PropertyValue::DiscreteSet { values: vec![] }.kind(),
            "discrete_set"
        );
        assert_eq!(
            PropertyValue::Range {
                min: None,
                max: Some(5.0)
            }
            .kind(),
            "range"
        );
        assert_eq!(PropertyValue::Unspecified.kind(), "unspecified");
    }

    #[test]
    fn test_validate_resources() {
        assert_eq!(
            validate_resources(&[]),
            Err(crate::error::EngineError::NoResources)
        );
        assert_eq!(
            validate_resources(&[Resource::new("R1"), Resource::new("R1")]),
            Err(crate::error::EngineError::DuplicateResource("R1".into()))
        );
        assert!(validate_resources(&[Resource::new("R1"), Resource::new("R2")]).is_ok());
    }

    #[test]
    fn test_collect_resources_recovers_failures() {
        let results: Vec<Result<Resource, String>> = vec![
            Ok(Resource::new("R1")),
            Err("tank2.aasx: missing capability submodel".to_string()),
            Ok(Resource::new("R3")),
        ];

        let (resources, warnings) = collect_resources(results);

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].name, "R1");
        assert_eq!(resources[1].name, "R3");
        assert_eq!(warnings, vec!["tank2.aasx: missing capability submodel"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_property_value_serializes_with_classification_tag() {
        let json = serde_json::to_value(PropertyValue::Range {
            min: Some(10.0),
            max: None,
        })
        .unwrap();
        assert_eq!(json["value_type"], "range");
        assert_eq!(json["min"], 10.0);

        let json = serde_json::to_value(PropertyValue::Unspecified).unwrap();
        assert_eq!(json["value_type"], "unspecified");
    }
}

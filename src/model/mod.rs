//! Input data model.
//!
//! Recipes (steps, materials, links) and resource capability descriptions
//! are built by external parsers and consumed read-only by the engine. The
//! required-value expression grammar shared by parameters and constraints
//! lives here too.

mod capability;
mod expr;
mod recipe;

pub use capability::{
    collect_resources, is_transport_capability, validate_resources, CapabilityRecord,
    ConstraintKind, PropertyConstraint, PropertyRecord, PropertyValue, Resource,
    TRANSPORT_CAPABILITIES,
};
pub use expr::{CompareOp, ValueRequirement};
pub use recipe::{DirectedLink, MaterialKind, MaterialNode, Parameter, ProcessStep, Recipe};

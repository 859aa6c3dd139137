//! Semantic filter over complete assignments.

use std::collections::HashMap;

use crate::model::Recipe;

/// Assignment facts the validator needs for one step.
#[derive(Debug, Clone, Copy)]
pub struct StepAssignmentView<'a> {
    pub step_id: &'a str,
    /// Name of the resource the step is assigned to.
    pub resource: &'a str,
    /// Whether a transport-class capability is among the capabilities
    /// matched for this pair. A transport capability the step did not
    /// match does not count.
    pub transport_active: bool,
}

/// Replays material custody along the recipe's links.
///
/// Each material produced by a step is held at that step's resource and
/// must be at the consuming step's resource when consumed. Transport
/// capability relaxes this: an active transport capability on the
/// producer hands the material off (location unknown afterwards), and an
/// active transport capability on the consumer lifts the location check
/// entirely.
pub struct FlowValidator<'a> {
    recipe: &'a Recipe,
}

impl<'a> FlowValidator<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        Self { recipe }
    }

    /// Whether the assignment moves materials consistently.
    ///
    /// Links whose endpoints are not a (step, material) pair in either
    /// direction are ignored. A produced or consumed material whose step
    /// has no assignment fails the check.
    pub fn is_consistent(&self, assignments: &[StepAssignmentView<'_>]) -> bool {
        let by_step: HashMap<&str, &StepAssignmentView<'_>> = assignments
            .iter()
            .map(|view| (view.step_id, view))
            .collect();
        // Material id -> holding resource; absent means unknown.
        let mut location: HashMap<&str, &str> = HashMap::new();

        for link in &self.recipe.links {
            if self.recipe.is_step(&link.from) && self.recipe.is_material(&link.to) {
                let Some(producer) = by_step.get(link.from.as_str()) else {
                    return false;
                };
                if producer.transport_active {
                    location.remove(link.to.as_str());
                } else {
                    location.insert(link.to.as_str(), producer.resource);
                }
            } else if self.recipe.is_material(&link.from) && self.recipe.is_step(&link.to) {
                let Some(consumer) = by_step.get(link.to.as_str()) else {
                    return false;
                };
                if consumer.transport_active {
                    continue;
                }
                if let Some(&held_at) = location.get(link.from.as_str()) {
                    if held_at != consumer.resource {
                        return false;
                    }
                }
                location.insert(link.from.as_str(), consumer.resource);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaterialKind, MaterialNode, ProcessStep};

    fn chain_recipe() -> Recipe {
        Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_step(ProcessStep::new("S2", "Heating"))
            .with_material(MaterialNode::new("M1", MaterialKind::Intermediate))
            .with_link("S1", "M1")
            .with_link("M1", "S2")
    }

    fn view(step_id: &'static str, resource: &'static str) -> StepAssignmentView<'static> {
        StepAssignmentView {
            step_id,
            resource,
            transport_active: false,
        }
    }

    #[test]
    fn test_same_resource_chain_is_consistent() {
        let recipe = chain_recipe();
        let validator = FlowValidator::new(&recipe);
        assert!(validator.is_consistent(&[view("S1", "R1"), view("S2", "R1")]));
    }

    #[test]
    fn test_flipping_consumer_resource_breaks_consistency() {
        let recipe = chain_recipe();
        let validator = FlowValidator::new(&recipe);
        assert!(validator.is_consistent(&[view("S1", "R1"), view("S2", "R1")]));
        assert!(!validator.is_consistent(&[view("S1", "R1"), view("S2", "R2")]));
    }

    #[test]
    fn test_producer_transport_hands_material_off() {
        let recipe = chain_recipe();
        let validator = FlowValidator::new(&recipe);
        let producer = StepAssignmentView {
            step_id: "S1",
            resource: "R1",
            transport_active: true,
        };
        assert!(validator.is_consistent(&[producer, view("S2", "R2")]));
    }

    #[test]
    fn test_consumer_transport_lifts_location_check() {
        let recipe = chain_recipe();
        let validator = FlowValidator::new(&recipe);
        let consumer = StepAssignmentView {
            step_id: "S2",
            resource: "R2",
            transport_active: true,
        };
        assert!(validator.is_consistent(&[view("S1", "R1"), consumer]));
    }

    #[test]
    fn test_consumption_pins_unknown_material() {
        // M1 has no producer link, so its first consumer pins it; the
        // second consumer on another resource then conflicts.
        let recipe = Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_step(ProcessStep::new("S2", "Heating"))
            .with_material(MaterialNode::new("M1", MaterialKind::Input))
            .with_link("M1", "S1")
            .with_link("M1", "S2");
        let validator = FlowValidator::new(&recipe);

        assert!(validator.is_consistent(&[view("S1", "R1"), view("S2", "R1")]));
        assert!(!validator.is_consistent(&[view("S1", "R1"), view("S2", "R2")]));
    }

    #[test]
    fn test_unknown_link_endpoints_are_ignored() {
        let recipe = Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_link("ghost", "S1")
            .with_link("S1", "phantom");
        let validator = FlowValidator::new(&recipe);
        assert!(validator.is_consistent(&[view("S1", "R1")]));
    }

    #[test]
    fn test_missing_assignment_fails() {
        let recipe = chain_recipe();
        let validator = FlowValidator::new(&recipe);
        assert!(!validator.is_consistent(&[view("S1", "R1")]));
        assert!(!validator.is_consistent(&[]));
    }

    #[test]
    fn test_step_to_step_links_do_not_move_materials() {
        let recipe = Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_step(ProcessStep::new("S2", "Heating"))
            .with_link("S1", "S2");
        let validator = FlowValidator::new(&recipe);
        assert!(validator.is_consistent(&[view("S1", "R1"), view("S2", "R2")]));
    }
}

//! Search session: model enumeration, flow filtering, and export.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::export::{append_solution_rows, DisplayRow, Solution, SolutionExporter};
use crate::flow::{FlowValidator, StepAssignmentView};
use crate::model::{validate_resources, Recipe, Resource};
use crate::progress::{NullProgress, ProgressSink};
use crate::sat::{DpllSolver, SatOutcome, SatSolver};

use super::builder::AssignmentModel;
use super::config::SearchConfig;

/// Why a search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchTermination {
    /// The solver proved no further model exists.
    Exhaustive,
    /// `find_all == false` and one solution was accepted.
    FirstSolution,
    /// The attempt ceiling was hit before exhausting the model space.
    AttemptCapReached,
    /// The cancellation flag was observed between iterations.
    Cancelled,
}

impl SearchTermination {
    /// True only when the whole model space was examined.
    pub fn is_complete(&self) -> bool {
        matches!(self, SearchTermination::Exhaustive)
    }
}

/// Result of one search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Accepted solutions in acceptance order, ids starting at 1.
    pub solutions: Vec<Solution>,
    /// Flat display sequence, solutions separated by
    /// [`DisplayRow::Separator`].
    pub rows: Vec<DisplayRow>,
    pub termination: SearchTermination,
    /// Solver models examined, including flow-rejected ones.
    pub attempts: usize,
    /// Ids of steps no resource can perform.
    pub infeasible_steps: Vec<String>,
}

impl SearchOutcome {
    /// Number of accepted solutions.
    pub fn accepted(&self) -> usize {
        self.solutions.len()
    }
}

/// Enumerates capability-feasible, flow-consistent assignments.
pub struct AssignmentRunner;

impl AssignmentRunner {
    /// Runs a search without progress reporting or cancellation.
    ///
    /// # Examples
    ///
    /// ```
    /// use capmatch::model::{CapabilityRecord, ProcessStep, Recipe, Resource};
    /// use capmatch::search::{AssignmentRunner, SearchConfig};
    ///
    /// let recipe = Recipe::new().with_step(ProcessStep::new("S1", "Heating"));
    /// let reactor = Resource::new("ReactorA")
    ///     .with_capability(CapabilityRecord::new("Heating", "http://example.org/caps#Heating"));
    ///
    /// let outcome = AssignmentRunner::run(&recipe, &[reactor], &SearchConfig::default())?;
    /// assert_eq!(outcome.accepted(), 1);
    /// # Ok::<(), capmatch::error::EngineError>(())
    /// ```
    pub fn run(
        recipe: &Recipe,
        resources: &[Resource],
        config: &SearchConfig,
    ) -> EngineResult<SearchOutcome> {
        Self::run_with_cancel(recipe, resources, config, &NullProgress, None)
    }

    /// Runs a search with progress reporting and cooperative cancellation.
    ///
    /// The flag is polled between solver iterations only; a set flag
    /// stops the run with [`SearchTermination::Cancelled`] and keeps the
    /// solutions accepted so far.
    pub fn run_with_cancel(
        recipe: &Recipe,
        resources: &[Resource],
        config: &SearchConfig,
        sink: &dyn ProgressSink,
        cancel: Option<Arc<AtomicBool>>,
    ) -> EngineResult<SearchOutcome> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        recipe.validate()?;
        validate_resources(resources)?;

        sink.on_log("building assignment model");
        let mut solver = DpllSolver::new();
        let model = AssignmentModel::build(recipe, resources, &mut solver, sink);
        if let Some(seed) = config.seed {
            let mut order = model.variables();
            order.shuffle(&mut StdRng::seed_from_u64(seed));
            solver.set_decision_order(order);
        }

        let exporter = SolutionExporter::new(recipe, resources);
        let validator = FlowValidator::new(recipe);

        let mut solutions: Vec<Solution> = Vec::new();
        let mut rows: Vec<DisplayRow> = Vec::new();
        let mut attempts = 0usize;

        let termination = loop {
            if let Some(flag) = &cancel {
                if flag.load(Ordering::Relaxed) {
                    break SearchTermination::Cancelled;
                }
            }
            if attempts >= config.max_attempts {
                break SearchTermination::AttemptCapReached;
            }
            if solver.check() == SatOutcome::Unsatisfiable {
                break SearchTermination::Exhaustive;
            }
            attempts += 1;
            let observed = solver.model().to_vec();

            let mut accepted = false;
            if let Some(chosen) = model.chosen_resources(&observed) {
                let views: Vec<StepAssignmentView<'_>> = recipe
                    .steps
                    .iter()
                    .zip(&chosen)
                    .map(|(step, &(resource, matched))| StepAssignmentView {
                        step_id: &step.id,
                        resource: &resources[resource].name,
                        transport_active: matched.has_transport_active(),
                    })
                    .collect();
                if validator.is_consistent(&views) {
                    let id = solutions.len() + 1;
                    append_solution_rows(&mut rows, exporter.rows(id, &chosen));
                    solutions.push(exporter.solution(id, &chosen, true));
                    sink.on_log(&format!("solution {id} accepted (attempt {attempts})"));
                    info!(solution = id, attempt = attempts, "solution accepted");
                    accepted = true;
                }
            }

            if accepted && !config.find_all {
                break SearchTermination::FirstSolution;
            }
            solver.add_clause(&model.blocking_clause(&observed));
            if config.milestone_interval > 0 && attempts.is_multiple_of(config.milestone_interval) {
                sink.on_progress(attempts, config.max_attempts);
            }
        };

        sink.on_log(&format!(
            "search finished: {} solution(s) after {} attempt(s)",
            solutions.len(),
            attempts
        ));
        info!(
            ?termination,
            attempts,
            accepted = solutions.len(),
            "search finished"
        );
        Ok(SearchOutcome {
            solutions,
            rows,
            termination,
            attempts,
            infeasible_steps: model.infeasible_steps().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    use crate::matching::CapabilityMatcher;
    use crate::model::{CapabilityRecord, MaterialKind, MaterialNode, ProcessStep};

    fn resource(name: &str, capabilities: &[&str]) -> Resource {
        let mut resource = Resource::new(name);
        for capability in capabilities {
            resource = resource.with_capability(CapabilityRecord::new(
                *capability,
                format!("http://example.org/caps#{capability}"),
            ));
        }
        resource
    }

    /// Three independent steps; only R2 can perform Heating.
    fn scenario() -> (Recipe, Vec<Resource>) {
        let recipe = Recipe::new()
            .with_step(ProcessStep::new("S1", "Dosing"))
            .with_step(ProcessStep::new("S2", "Mixing"))
            .with_step(ProcessStep::new("S3", "Heating"));
        let resources = vec![
            resource("R1", &["Dosing", "Mixing"]),
            resource("R2", &["Dosing", "Mixing", "Heating"]),
        ];
        (recipe, resources)
    }

    fn placements(outcome: &SearchOutcome) -> BTreeSet<Vec<String>> {
        outcome
            .solutions
            .iter()
            .map(|solution| {
                solution
                    .assignments
                    .iter()
                    .map(|a| a.resource.clone())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_enumeration_finds_every_assignment() {
        let (recipe, resources) = scenario();
        let outcome =
            AssignmentRunner::run(&recipe, &resources, &SearchConfig::default()).unwrap();

        assert_eq!(outcome.termination, SearchTermination::Exhaustive);
        assert!(outcome.termination.is_complete());
        assert_eq!(outcome.accepted(), 4);
        assert_eq!(outcome.attempts, 4);
        assert!(outcome.infeasible_steps.is_empty());

        for solution in &outcome.solutions {
            assert!(solution.flow_consistent);
            assert_eq!(solution.assignments.len(), recipe.steps.len());
            assert_eq!(solution.assignment("S3").unwrap().resource, "R2");
        }
        let ids: Vec<usize> = outcome.solutions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        // 4 solutions of 3 rows each, separated 3 times.
        assert_eq!(outcome.rows.len(), 15);
        let separators = outcome
            .rows
            .iter()
            .filter(|row| matches!(row, DisplayRow::Separator))
            .count();
        assert_eq!(separators, 3);
    }

    #[test]
    fn test_first_solution_mode_is_deterministic() {
        let (recipe, resources) = scenario();
        let config = SearchConfig::new().with_find_all(false);

        let first = AssignmentRunner::run(&recipe, &resources, &config).unwrap();
        let second = AssignmentRunner::run(&recipe, &resources, &config).unwrap();

        assert_eq!(first.termination, SearchTermination::FirstSolution);
        assert!(!first.termination.is_complete());
        assert_eq!(first.accepted(), 1);
        assert_eq!(placements(&first), placements(&second));
    }

    #[test]
    fn test_seed_shuffles_order_but_not_solution_set() {
        let (recipe, resources) = scenario();
        let plain =
            AssignmentRunner::run(&recipe, &resources, &SearchConfig::default()).unwrap();
        let seeded =
            AssignmentRunner::run(&recipe, &resources, &SearchConfig::new().with_seed(42))
                .unwrap();

        assert_eq!(seeded.termination, SearchTermination::Exhaustive);
        assert_eq!(placements(&plain), placements(&seeded));
        assert_eq!(plain.attempts, seeded.attempts);
    }

    #[test]
    fn test_flow_filter_agrees_with_brute_force() {
        // S1 -> M1 -> S2 with no transport anywhere, so only same-resource
        // placements replay consistently.
        let recipe = Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_step(ProcessStep::new("S2", "Heating"))
            .with_material(MaterialNode::new("M1", MaterialKind::Intermediate))
            .with_link("S1", "M1")
            .with_link("M1", "S2");
        let resources = vec![
            resource("R1", &["Mixing", "Heating"]),
            resource("R2", &["Mixing", "Heating"]),
        ];

        let outcome =
            AssignmentRunner::run(&recipe, &resources, &SearchConfig::default()).unwrap();
        assert_eq!(outcome.termination, SearchTermination::Exhaustive);
        assert_eq!(outcome.attempts, 4);

        let matcher = CapabilityMatcher::new(&recipe);
        let validator = FlowValidator::new(&recipe);
        let mut expected = BTreeSet::new();
        for first in 0..resources.len() {
            for second in 0..resources.len() {
                let pairs = [(0usize, first), (1usize, second)];
                let matched: Vec<_> = pairs
                    .iter()
                    .map(|&(step, res)| {
                        matcher.match_step(&recipe.steps[step], &resources[res])
                    })
                    .collect();
                if matched.iter().any(Option::is_none) {
                    continue;
                }
                let views: Vec<StepAssignmentView<'_>> = pairs
                    .iter()
                    .zip(&matched)
                    .map(|(&(step, res), entry)| StepAssignmentView {
                        step_id: &recipe.steps[step].id,
                        resource: &resources[res].name,
                        transport_active: entry.as_ref().unwrap().has_transport_active(),
                    })
                    .collect();
                if validator.is_consistent(&views) {
                    expected.insert(vec![
                        resources[first].name.clone(),
                        resources[second].name.clone(),
                    ]);
                }
            }
        }
        assert_eq!(placements(&outcome), expected);
        assert_eq!(outcome.accepted(), 2);
    }

    #[test]
    fn test_attempt_cap_stops_enumeration() {
        let (recipe, resources) = scenario();
        let config = SearchConfig::new().with_max_attempts(2);
        let outcome = AssignmentRunner::run(&recipe, &resources, &config).unwrap();

        assert_eq!(outcome.termination, SearchTermination::AttemptCapReached);
        assert!(!outcome.termination.is_complete());
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.accepted(), 2);
    }

    #[test]
    fn test_cancellation_between_iterations() {
        let (recipe, resources) = scenario();
        let flag = Arc::new(AtomicBool::new(true));
        let outcome = AssignmentRunner::run_with_cancel(
            &recipe,
            &resources,
            &SearchConfig::default(),
            &NullProgress,
            Some(flag),
        )
        .unwrap();

        assert_eq!(outcome.termination, SearchTermination::Cancelled);
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.solutions.is_empty());
    }

    #[test]
    fn test_step_nobody_can_perform() {
        let recipe = Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_step(ProcessStep::new("S2", "Cooling"));
        let resources = vec![resource("R1", &["Mixing"])];
        let outcome =
            AssignmentRunner::run(&recipe, &resources, &SearchConfig::default()).unwrap();

        assert_eq!(outcome.termination, SearchTermination::Exhaustive);
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.solutions.is_empty());
        assert_eq!(outcome.infeasible_steps, ["S2"]);
    }

    #[test]
    fn test_input_validation() {
        let (recipe, resources) = scenario();

        let empty = Recipe::new();
        assert!(matches!(
            AssignmentRunner::run(&empty, &resources, &SearchConfig::default()),
            Err(EngineError::EmptyRecipe)
        ));

        assert!(matches!(
            AssignmentRunner::run(&recipe, &[], &SearchConfig::default()),
            Err(EngineError::NoResources)
        ));

        let bad_config = SearchConfig::new().with_max_attempts(0);
        assert!(matches!(
            AssignmentRunner::run(&recipe, &resources, &bad_config),
            Err(EngineError::InvalidConfig(_))
        ));

        let duplicated = Recipe::new()
            .with_step(ProcessStep::new("S1", "Mixing"))
            .with_step(ProcessStep::new("S1", "Heating"));
        assert!(matches!(
            AssignmentRunner::run(&duplicated, &resources, &SearchConfig::default()),
            Err(EngineError::DuplicateStepId(id)) if id == "S1"
        ));

        let twice = vec![resource("R1", &["Mixing"]), resource("R1", &["Mixing"])];
        assert!(matches!(
            AssignmentRunner::run(&recipe, &twice, &SearchConfig::default()),
            Err(EngineError::DuplicateResource(name)) if name == "R1"
        ));
    }

    #[derive(Default)]
    struct Recorder {
        progress: RefCell<Vec<(usize, usize)>>,
        logs: RefCell<Vec<String>>,
    }

    impl ProgressSink for Recorder {
        fn on_progress(&self, current: usize, total: usize) {
            self.progress.borrow_mut().push((current, total));
        }

        fn on_log(&self, message: &str) {
            self.logs.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_progress_reporting() {
        let (recipe, resources) = scenario();
        let sink = Recorder::default();
        let config = SearchConfig::new().with_milestone_interval(1);
        let outcome =
            AssignmentRunner::run_with_cancel(&recipe, &resources, &config, &sink, None)
                .unwrap();
        assert_eq!(outcome.accepted(), 4);

        let logs = sink.logs.borrow();
        assert_eq!(logs[0], "building assignment model");
        assert!(logs.contains(&"solution 1 accepted (attempt 1)".to_string()));
        assert!(logs.last().unwrap().starts_with("search finished: 4 solution(s)"));

        let progress = sink.progress.borrow();
        // Build ticks once per step, then once per attempt.
        assert!(progress.contains(&(3, 3)));
        assert!(progress.contains(&(4, config.max_attempts)));
    }
}

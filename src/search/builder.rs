//! Encodes the assignment problem as CNF clauses.

use tracing::{debug, warn};

use crate::matching::{CapabilityMatcher, StepResourceMatch};
use crate::model::{Recipe, Resource};
use crate::progress::ProgressSink;
use crate::sat::{Lit, SatSolver, Var};

/// The boolean encoding of one recipe against one resource set.
///
/// One variable per (step, resource) pair. Infeasible pairs are forced
/// false with unit clauses; each step carries an at-least-one clause over
/// its feasible variables plus pairwise at-most-one clauses, so every
/// model picks exactly one resource per step. The matcher's feasibility
/// metadata is retained for decoding models back into assignments.
pub struct AssignmentModel {
    /// Variable ids, indexed `[step][resource]`.
    vars: Vec<Vec<Var>>,
    /// Match metadata for feasible pairs, same indexing.
    matches: Vec<Vec<Option<StepResourceMatch>>>,
    infeasible_steps: Vec<String>,
}

impl AssignmentModel {
    /// Matches every pair and loads the clauses into `solver`.
    ///
    /// Pairs are processed in step order, then resource order, so the
    /// transfer-pruning check sees exactly the tentative matches recorded
    /// before it. Emits one progress tick per encoded step.
    pub fn build(
        recipe: &Recipe,
        resources: &[Resource],
        solver: &mut dyn SatSolver,
        sink: &dyn ProgressSink,
    ) -> Self {
        let matcher = CapabilityMatcher::new(recipe);
        let step_count = recipe.steps.len();
        let resource_count = resources.len();

        let mut vars: Vec<Vec<Var>> = Vec::with_capacity(step_count);
        let mut matches: Vec<Vec<Option<StepResourceMatch>>> =
            vec![vec![None; resource_count]; step_count];
        let mut infeasible_steps = Vec::new();

        for (i, step) in recipe.steps.iter().enumerate() {
            let mut row = Vec::with_capacity(resource_count);
            for (j, resource) in resources.iter().enumerate() {
                let var = solver.new_var();
                let matched = matcher.match_step(step, resource);
                // A pair that would pull material from a predecessor on
                // another resource needs transport capability somewhere
                // in the resource's capability list.
                let pruned = matched.is_some()
                    && matcher.transfer_required(step, j, &matches)
                    && !resource.has_transport_capability();
                let entry = if pruned { None } else { matched };
                if entry.is_none() {
                    solver.add_clause(&[Lit::neg(var)]);
                }
                matches[i][j] = entry;
                row.push(var);
            }

            let feasible: Vec<Var> = row
                .iter()
                .copied()
                .enumerate()
                .filter(|&(j, _)| matches[i][j].is_some())
                .map(|(_, var)| var)
                .collect();
            if feasible.is_empty() {
                // Explicit contradiction keeps the outcome deterministic.
                solver.add_clause(&[]);
                warn!(step = %step.id, "no feasible resource for step");
                infeasible_steps.push(step.id.clone());
            } else {
                let at_least_one: Vec<Lit> = feasible.iter().copied().map(Lit::pos).collect();
                solver.add_clause(&at_least_one);
                for (a, &v) in feasible.iter().enumerate() {
                    for &w in &feasible[a + 1..] {
                        solver.add_clause(&[Lit::neg(v), Lit::neg(w)]);
                    }
                }
            }
            debug!(step = %step.id, feasible = feasible.len(), "step encoded");
            sink.on_progress(i + 1, step_count);
            vars.push(row);
        }

        Self {
            vars,
            matches,
            infeasible_steps,
        }
    }

    /// All variable ids, in allocation order.
    pub fn variables(&self) -> Vec<Var> {
        self.vars.iter().flatten().copied().collect()
    }

    /// Ids of steps with zero feasible resources.
    pub fn infeasible_steps(&self) -> &[String] {
        &self.infeasible_steps
    }

    /// Decodes a solver model into one (resource, match) pair per step.
    ///
    /// Returns `None` if some step has no true feasible variable, which
    /// cannot happen for models of a correctly built encoding.
    pub fn chosen_resources(&self, model: &[bool]) -> Option<Vec<(usize, &StepResourceMatch)>> {
        self.vars
            .iter()
            .zip(&self.matches)
            .map(|(row, match_row)| {
                row.iter().enumerate().find_map(|(j, &var)| {
                    if model.get(var).copied().unwrap_or(false) {
                        match_row[j].as_ref().map(|matched| (j, matched))
                    } else {
                        None
                    }
                })
            })
            .collect()
    }

    /// Clause forbidding the model's true assignment variables.
    ///
    /// With the exactly-one structure the true set determines the whole
    /// model, so negating it blocks exactly this model.
    pub fn blocking_clause(&self, model: &[bool]) -> Vec<Lit> {
        self.vars
            .iter()
            .flatten()
            .copied()
            .filter(|&var| model.get(var).copied().unwrap_or(false))
            .map(Lit::neg)
            .collect()
    }
}

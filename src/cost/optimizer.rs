//! Ranks accepted solutions by weighted operating cost.

use std::collections::BTreeMap;

use crate::export::Solution;

use super::types::{CostEvaluation, CostTable, CostVector};
use super::weights::CostWeights;

/// Evaluates and ranks solutions against a resource cost table.
pub struct CostOptimizer {
    table: CostTable,
    weights: CostWeights,
}

impl CostOptimizer {
    pub fn new(table: CostTable) -> Self {
        Self {
            table,
            weights: CostWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    /// Totals one solution's assignment costs.
    ///
    /// Resources absent from the table contribute zero cost but still
    /// count in the usage histogram.
    pub fn evaluate(&self, solution: &Solution) -> CostEvaluation {
        let mut total = CostVector::ZERO;
        let mut usage_histogram: BTreeMap<String, usize> = BTreeMap::new();
        for assignment in &solution.assignments {
            let key = table_key(&assignment.resource);
            *usage_histogram.entry(key.to_owned()).or_insert(0) += 1;
            if let Some(costs) = self.table.get(key) {
                total.accumulate(costs);
            }
        }
        CostEvaluation {
            solution_id: solution.id,
            total,
            weighted: total.weighted(&self.weights),
            composite: total.composite(&self.weights),
            usage_histogram,
        }
    }

    /// Evaluates all solutions and sorts ascending by composite score.
    ///
    /// The sort is stable, so equal scores keep their input order.
    pub fn rank(&self, solutions: &[Solution]) -> Vec<CostEvaluation> {
        let mut evaluations: Vec<CostEvaluation> =
            solutions.iter().map(|s| self.evaluate(s)).collect();
        evaluations.sort_by(|a, b| {
            a.composite
                .partial_cmp(&b.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        evaluations
    }
}

/// Canonical table key: display names may carry a `"Resource: "` style
/// prefix, which is stripped at the first `": "`.
fn table_key(name: &str) -> &str {
    match name.split_once(": ") {
        Some((_, rest)) => rest,
        None => name,
    }
}

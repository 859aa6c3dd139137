//! Incremental-interface SAT solving over CNF clauses.

use super::types::{Lit, SatOutcome, Var};

/// Trait for SAT solvers.
///
/// Clauses accumulate across calls, so model enumeration works by
/// alternating [`check`](SatSolver::check) with blocking clauses added
/// through [`add_clause`](SatSolver::add_clause).
pub trait SatSolver {
    /// Allocates a fresh variable and returns its index.
    fn new_var(&mut self) -> Var;

    /// Number of variables allocated so far.
    fn var_count(&self) -> usize;

    /// Adds a disjunction of literals. An empty slice makes the formula
    /// permanently unsatisfiable.
    fn add_clause(&mut self, literals: &[Lit]);

    /// Decides satisfiability of the clauses added so far.
    fn check(&mut self) -> SatOutcome;

    /// The satisfying assignment found by the most recent check, indexed
    /// by variable. Contents are meaningful only after a check returned
    /// [`SatOutcome::Satisfiable`].
    fn model(&self) -> &[bool];
}

/// A simple SAT solver using backtracking search with unit propagation.
///
/// Decisions try `true` first, so with no constraints the first model is
/// all-true. [`set_decision_order`](DpllSolver::set_decision_order)
/// controls which variable is decided next, which is how callers steer
/// enumeration order.
///
/// # Limitations
///
/// - Chronological backtracking only; no clause learning and no watched
///   literals, so propagation rescans every clause.
/// - Every [`check`](SatSolver::check) solves from scratch rather than
///   resuming from the previous search state.
///
/// Suitable for formulas up to a few thousand variables and clauses.
#[derive(Debug, Default)]
pub struct DpllSolver {
    clauses: Vec<Vec<Lit>>,
    var_count: usize,
    has_empty_clause: bool,
    decision_order: Option<Vec<Var>>,
    model: Vec<bool>,
}

/// One decision level of the search.
struct Decision {
    var: Var,
    /// Trail length before the decision was assigned.
    trail_mark: usize,
    /// Whether the `false` branch has already been taken.
    flipped: bool,
}

enum Propagation {
    Stable,
    Conflict,
}

impl DpllSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variable order used for decisions.
    ///
    /// Variables missing from the order are decided last, in index
    /// order. Out-of-range and repeated entries are ignored.
    pub fn set_decision_order(&mut self, order: Vec<Var>) {
        self.decision_order = Some(order);
    }

    fn effective_order(&self) -> Vec<Var> {
        let Some(order) = &self.decision_order else {
            return (0..self.var_count).collect();
        };
        let mut seen = vec![false; self.var_count];
        let mut result = Vec::with_capacity(self.var_count);
        for &var in order {
            if var < self.var_count && !seen[var] {
                seen[var] = true;
                result.push(var);
            }
        }
        for var in 0..self.var_count {
            if !seen[var] {
                result.push(var);
            }
        }
        result
    }
}

impl SatSolver for DpllSolver {
    fn new_var(&mut self) -> Var {
        let var = self.var_count;
        self.var_count += 1;
        var
    }

    fn var_count(&self) -> usize {
        self.var_count
    }

    fn add_clause(&mut self, literals: &[Lit]) {
        if literals.is_empty() {
            self.has_empty_clause = true;
            return;
        }
        self.clauses.push(literals.to_vec());
    }

    fn check(&mut self) -> SatOutcome {
        if self.has_empty_clause {
            return SatOutcome::Unsatisfiable;
        }

        let order = self.effective_order();
        let mut assign: Vec<Option<bool>> = vec![None; self.var_count];
        let mut trail: Vec<Var> = Vec::with_capacity(self.var_count);
        let mut decisions: Vec<Decision> = Vec::new();

        loop {
            match propagate(&self.clauses, &mut assign, &mut trail) {
                Propagation::Conflict => {
                    let mut resumed = false;
                    while let Some(mut decision) = decisions.pop() {
                        for var in trail.drain(decision.trail_mark..) {
                            assign[var] = None;
                        }
                        if !decision.flipped {
                            assign[decision.var] = Some(false);
                            trail.push(decision.var);
                            decision.flipped = true;
                            decisions.push(decision);
                            resumed = true;
                            break;
                        }
                    }
                    if !resumed {
                        return SatOutcome::Unsatisfiable;
                    }
                }
                Propagation::Stable => {
                    let next = order.iter().copied().find(|&var| assign[var].is_none());
                    let Some(var) = next else {
                        self.model = assign.iter().map(|value| value.unwrap_or(false)).collect();
                        return SatOutcome::Satisfiable;
                    };
                    decisions.push(Decision {
                        var,
                        trail_mark: trail.len(),
                        flipped: false,
                    });
                    assign[var] = Some(true);
                    trail.push(var);
                }
            }
        }
    }

    fn model(&self) -> &[bool] {
        &self.model
    }
}

/// Repeated unit propagation until fixpoint or conflict.
fn propagate(
    clauses: &[Vec<Lit>],
    assign: &mut [Option<bool>],
    trail: &mut Vec<Var>,
) -> Propagation {
    let mut changed = true;
    while changed {
        changed = false;
        for clause in clauses {
            let mut satisfied = false;
            let mut unassigned = None;
            let mut unassigned_count = 0;
            for &lit in clause {
                match assign[lit.var] {
                    Some(value) if lit.satisfied_by(value) => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        unassigned_count += 1;
                        unassigned = Some(lit);
                    }
                }
            }
            if satisfied {
                continue;
            }
            match unassigned {
                None => return Propagation::Conflict,
                Some(lit) if unassigned_count == 1 => {
                    assign[lit.var] = Some(lit.positive);
                    trail.push(lit.var);
                    changed = true;
                }
                Some(_) => {}
            }
        }
    }
    Propagation::Stable
}

//! Propositional satisfiability backend.
//!
//! The assignment search encodes its decisions as boolean variables and
//! enumerates models through the [`SatSolver`] trait. [`DpllSolver`] is
//! the built-in implementation; swapping in another engine only requires
//! implementing the trait.

mod solver;
mod types;

pub use solver::{DpllSolver, SatSolver};
pub use types::{Lit, SatOutcome, Var};

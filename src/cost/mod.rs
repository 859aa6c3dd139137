//! Cost-based ranking of accepted solutions.
//!
//! Ranking is a pure post-processing pass: it never feeds back into the
//! search and never filters a solution out. Missing cost data is
//! tolerated so a partial table still produces a full ranking.

mod optimizer;
mod types;
mod weights;

pub use optimizer::CostOptimizer;
pub use types::{CostEvaluation, CostTable, CostVector};
pub use weights::CostWeights;

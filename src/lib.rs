//! Capability-based assignment of recipe steps to production resources.
//!
//! Given a process recipe and a set of resources that advertise typed
//! capabilities, the engine enumerates every assignment of steps to
//! resources that is capability-feasible and material-flow consistent:
//!
//! - **Model**: recipe graphs (steps, materials, directed links) and
//!   resource capability descriptions with typed property values.
//! - **Matching**: per-pair feasibility through semantic identifier,
//!   property/unit/value, and material precondition gates.
//! - **SAT**: a small clause-based solver behind a trait, used to
//!   enumerate assignments via exactly-one and blocking clauses.
//! - **Search**: the session driver that encodes, enumerates, and exports,
//!   with attempt caps, progress reporting, and cancellation.
//! - **Flow**: replay of material custody along recipe links, honoring
//!   transport-class capabilities.
//! - **Export**: accepted assignments as display rows and structured
//!   solution records.
//! - **Cost**: optional ranking of solutions by weighted energy, usage,
//!   and CO2 cost.
//!
//! # Architecture
//!
//! `model` holds the shared vocabulary; `matching` decides pair
//! feasibility; `search` drives a `sat` session and hands accepted models
//! to `flow` and `export`; `cost` is a pure post-pass over exported
//! solutions. The crate performs no I/O: loading recipes and capability
//! descriptions from AAS or other sources is a consumer concern.

pub mod cost;
pub mod error;
pub mod export;
pub mod flow;
pub mod matching;
pub mod model;
pub mod progress;
pub mod sat;
pub mod search;

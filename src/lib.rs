//! Facade crate for the Sojourn multi-day itinerary planner.
//!
//! This crate re-exports the core modelling and decoding types and exposes
//! the `vrp-core` backed solver behind a feature flag.

#![forbid(unsafe_code)]

pub use sojourn_core::{
    AugmentedGraph, ConfigError, DenseMatrix, Itinerary, NodeKind, ScheduleConfig, ScheduledStop,
    SearchSettings, SolveError, SolveRequest, SolveResponse, Solver, StopKind, TimeFormat,
    TravelMatrix,
};

#[cfg(feature = "solver-vrp")]
pub use sojourn_search::{VrpSearchEngine, VrpSolver};

//! Core modelling types for the Sojourn multi-day itinerary planner.
//!
//! A single agent leaves a home depot, visits as many candidate locations as
//! its daily opening hours allow, returns home each night and sets out again
//! the next morning. This crate turns that calendar into an engine-neutral
//! routing model and reads engine solutions back as an [`Itinerary`]:
//!
//! - [`AugmentedGraph`] adds a night node per day boundary and an optional
//!   morning node paired with each night.
//! - [`build_schedule_model`] compiles a [`ScheduleConfig`] and a
//!   [`TravelMatrix`] into a [`ScheduleModel`] whose [`RoutingModel`] carries
//!   the Time and Counting dimensions, daily windows, optional visits and the
//!   day-ordering constraints.
//! - [`RouteSearchEngine`] is the boundary to search engines;
//!   [`run_search`] marshals [`SearchSettings`] into engine parameters.
//! - [`decode`] produces the itinerary and the list of dropped locations.
//!
//! [`solve_with_engine`] runs the whole pipeline and is what [`Solver`]
//! implementations delegate to.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod augment;
pub mod builder;
pub mod config;
pub mod decode;
pub mod engine;
pub mod itinerary;
pub mod matrix;
pub mod model;
pub mod search;
pub mod solver;
pub mod transit;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use augment::{AugmentError, AugmentedGraph, END_DEPOT, NodeKind, START_DEPOT};
pub use builder::{
    BuildError, ORDER_DIMENSION, ScheduleModel, TIME_DIMENSION, build_schedule_model,
};
pub use config::{ConfigError, DEFAULT_DROP_PENALTY, ScheduleConfig, SearchSettings};
pub use decode::{DecodeError, decode};
pub use engine::{
    Assignment, FirstSolutionStrategy, LocalSearchMetaheuristic, RouteSearchEngine, SearchError,
    SearchParameters,
};
pub use itinerary::{ClockTime, Itinerary, ItineraryRow, ScheduledStop, StopKind, TimeFormat};
pub use matrix::{DenseMatrix, MatrixError, TravelMatrix, haversine_metres};
pub use model::{
    CumulRange, Dimension, DimensionId, Disjunction, ModelConstraint, ModelError, RoutingModel,
};
pub use search::{run_search, search_parameters};
pub use solver::{Diagnostics, SolveError, SolveRequest, SolveResponse, Solver, solve_with_engine};
pub use transit::ScheduleTransit;

//! Route search for Sojourn on top of `vrp-core`.
//!
//! This crate provides [`VrpSearchEngine`], an implementation of the
//! [`RouteSearchEngine`](sojourn_core::RouteSearchEngine) boundary, and
//! [`VrpSolver`], the default [`Solver`](sojourn_core::Solver) that pairs the
//! engine with a travel matrix.
//!
//! The routing model is expressed as a single-vehicle `vrp-core` problem.
//! Dimensions and side constraints become a hard feature checked by interval
//! propagation over the tour, disjunction penalties become an objective that
//! rewards visiting costly-to-drop jobs, and arc costs drive the transport
//! objective.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use engine::{VrpSearchConfig, VrpSearchEngine};
pub use solver::VrpSolver;

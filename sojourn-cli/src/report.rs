//! JSON report written by `sojourn plan`.

use serde::{Deserialize, Serialize};
use sojourn_core::{SolveResponse, TimeFormat};

use crate::problem::Problem;

/// One row of the printed itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ReportRow {
    pub(crate) label: String,
    pub(crate) day: u32,
    pub(crate) order: i64,
    pub(crate) earliest: String,
    pub(crate) latest: String,
}

/// The printed itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PlanReport {
    pub(crate) objective: i64,
    pub(crate) total_nodes: usize,
    pub(crate) solve_time_ms: u64,
    pub(crate) dropped: Vec<String>,
    pub(crate) scheduled: Vec<ReportRow>,
}

impl PlanReport {
    /// Render `response`, naming real stops after the problem's locations.
    pub(crate) fn new(problem: &Problem, response: &SolveResponse, format: TimeFormat) -> Self {
        let itinerary = &response.itinerary;
        let scheduled = itinerary
            .scheduled()
            .iter()
            .zip(itinerary.rows(format))
            .map(|(stop, row)| ReportRow {
                label: if stop.is_real() {
                    problem.name_of(stop.node)
                } else {
                    row.label
                },
                day: row.day,
                order: row.order,
                earliest: row.earliest,
                latest: row.latest,
            })
            .collect();
        Self {
            objective: itinerary.objective(),
            total_nodes: response.diagnostics.total_nodes,
            solve_time_ms: u64::try_from(response.diagnostics.solve_time.as_millis())
                .unwrap_or(u64::MAX),
            dropped: itinerary
                .dropped()
                .iter()
                .map(|&node| problem.name_of(node))
                .collect(),
            scheduled,
        }
    }
}

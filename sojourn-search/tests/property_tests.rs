//! Property-based tests for `VrpSolver`.
//!
//! # Invariants tested
//!
//! - **Node accounting:** the augmented graph has `real + 2 * (days - 1)`
//!   nodes and every candidate is either visited or dropped.
//! - **Opening hours:** every visit's feasible range lies inside the day.
//! - **Night pairing:** an overnight stop is directly followed by the next
//!   morning's departure.
//! - **Calendar order:** nights are used as a prefix, in order.
//! - **Day boundaries:** each used morning can leave at opening time and
//!   the traveller is home by closing time before each night.
//! - **Dropped locations:** only candidates are ever reported dropped.


use std::collections::HashSet;

use proptest::prelude::*;
use sojourn_core::{Solver, StopKind, TravelMatrix};
use sojourn_search::VrpSolver;
use sojourn_search::test_support::quick_request;

use proptest_support::{matrix_strategy, nights_are_paired, nights_in_order};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn every_candidate_is_visited_or_dropped(
        matrix in matrix_strategy(1, 5),
        days in 1_i32..=3,
    ) {
        let real = matrix.location_count();
        let mut request = quick_request(days);
        request.search.time_limit_seconds = 1;
        let response = VrpSolver::new(matrix).solve(&request).expect("solve should succeed");

        let nights = usize::try_from(days - 1).expect("positive days");
        prop_assert_eq!(response.diagnostics.total_nodes, real + 2 * nights);

        let visited: HashSet<usize> = response.itinerary.visits().map(|stop| stop.node).collect();
        let dropped: HashSet<usize> = response.itinerary.dropped().iter().copied().collect();
        prop_assert!(visited.is_disjoint(&dropped));
        prop_assert_eq!(visited.len() + dropped.len(), real - 2);
        prop_assert!(dropped.iter().all(|&node| (2..real).contains(&node)));
    }

    #[test]
    fn visits_stay_inside_opening_hours(
        matrix in matrix_strategy(1, 5),
        days in 1_i32..=3,
    ) {
        let mut request = quick_request(days);
        request.search.time_limit_seconds = 1;
        let (open, close) = (request.schedule.day_start(), request.schedule.day_end());
        let response = VrpSolver::new(matrix).solve(&request).expect("solve should succeed");
        for stop in response.itinerary.visits() {
            prop_assert!(open <= stop.earliest, "{:?} opens early", stop);
            prop_assert!(stop.earliest <= stop.latest, "{:?} has no window", stop);
            prop_assert!(stop.latest <= close, "{:?} closes late", stop);
        }
    }

    #[test]
    fn nights_are_paired_and_used_in_order(
        matrix in matrix_strategy(2, 5),
        days in 2_i32..=3,
    ) {
        let mut request = quick_request(days);
        request.search.time_limit_seconds = 1;
        let response = VrpSolver::new(matrix).solve(&request).expect("solve should succeed");
        let stops = response.itinerary.scheduled();

        prop_assert!(nights_are_paired(stops));
        let nights = nights_in_order(stops);
        let prefix: Vec<usize> = (0..nights.len()).collect();
        prop_assert_eq!(nights, prefix);

        let mut day = 1;
        for stop in stops {
            prop_assert_eq!(stop.day, day);
            if matches!(stop.kind, StopKind::Overnight { .. }) {
                day += 1;
            }
        }
    }

    #[test]
    fn days_start_at_opening_and_end_by_closing(
        matrix in matrix_strategy(2, 5),
        days in 2_i32..=3,
    ) {
        let mut request = quick_request(days);
        request.search.time_limit_seconds = 1;
        let (open, close) = (request.schedule.day_start(), request.schedule.day_end());
        let response = VrpSolver::new(matrix).solve(&request).expect("solve should succeed");
        for stop in response.itinerary.scheduled() {
            match stop.kind {
                StopKind::DayStart { .. } => {
                    prop_assert_eq!(stop.earliest, open, "{:?} leaves late", stop);
                }
                StopKind::Overnight { .. } => {
                    prop_assert!(open <= stop.earliest, "{:?} is home early", stop);
                    prop_assert!(stop.earliest <= close, "{:?} is home late", stop);
                }
                _ => {}
            }
        }
    }
}

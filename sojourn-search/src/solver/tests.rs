//! Tests for the `VrpSolver`.

use super::*;
use rstest::rstest;
use sojourn_core::{NodeKind, StopKind};

use crate::test_support::{day_window, quick_request, two_day_matrix, uniform_matrix};

#[rstest]
fn spreads_visits_over_two_days() {
    let request = quick_request(2);
    let response = VrpSolver::new(two_day_matrix())
        .solve(&request)
        .expect("two days fit every location");
    let itinerary = &response.itinerary;

    assert!(itinerary.dropped().is_empty());
    assert_eq!(itinerary.visits().count(), 3);
    assert_eq!(itinerary.days_used(), 2);
    assert_eq!(response.diagnostics.total_nodes, 7);
    assert_eq!(response.diagnostics.real_locations, 5);

    let kinds: Vec<StopKind> = itinerary.scheduled().iter().map(|stop| stop.kind).collect();
    let night = kinds
        .iter()
        .position(|kind| *kind == StopKind::Overnight { night: 0 })
        .expect("the night is used");
    assert_eq!(kinds.get(night + 1), Some(&StopKind::DayStart { night: 0 }));
    assert_eq!(kinds.first(), Some(&StopKind::Departure));
    assert_eq!(kinds.last(), Some(&StopKind::Arrival));
}

#[rstest]
fn morning_departure_is_at_day_start() {
    let request = quick_request(2);
    let (start, _) = day_window(&request.schedule);
    let response = VrpSolver::new(two_day_matrix())
        .solve(&request)
        .expect("feasible");
    let morning = response
        .itinerary
        .scheduled()
        .iter()
        .find(|stop| matches!(stop.kind, StopKind::DayStart { .. }))
        .expect("morning departure scheduled");
    assert_eq!(morning.earliest, start);
    assert_eq!(morning.day, 2);
}

#[rstest]
fn returns_home_before_day_end() {
    let request = quick_request(2);
    let (start, end) = day_window(&request.schedule);
    let response = VrpSolver::new(two_day_matrix())
        .solve(&request)
        .expect("feasible");
    let night = response
        .itinerary
        .scheduled()
        .iter()
        .find(|stop| matches!(stop.kind, StopKind::Overnight { .. }))
        .expect("overnight stay scheduled");
    assert!(start <= night.earliest, "{night:?} arrives before opening");
    assert!(night.earliest <= end, "{night:?} arrives home after closing");
    assert_eq!(night.day, 1);
}

#[rstest]
fn visits_fall_inside_opening_hours() {
    let request = quick_request(2);
    let (start, end) = day_window(&request.schedule);
    let response = VrpSolver::new(two_day_matrix())
        .solve(&request)
        .expect("feasible");
    for stop in response.itinerary.visits() {
        assert!(start <= stop.earliest, "{stop:?} starts before opening");
        assert!(stop.earliest <= stop.latest, "{stop:?} has an empty window");
        assert!(stop.latest <= end, "{stop:?} ends after closing");
    }
}

#[rstest]
fn single_day_drops_what_does_not_fit() {
    let response = VrpSolver::new(two_day_matrix())
        .solve(&quick_request(1))
        .expect("feasible");
    let itinerary = &response.itinerary;
    assert_eq!(response.diagnostics.total_nodes, 5);
    assert_eq!(itinerary.visits().count(), 2);
    assert_eq!(itinerary.dropped().len(), 1);
    assert!(itinerary.scheduled().iter().all(|stop| stop.is_real()));
}

#[rstest]
fn unused_nights_stay_off_the_route() {
    // Everything fits into the first of three days.
    let matrix = uniform_matrix(4, 1_800);
    let solver = VrpSolver::new(matrix);
    let response = solver.solve(&quick_request(3)).expect("feasible");
    assert_eq!(response.diagnostics.total_nodes, 8);
    assert!(response.itinerary.dropped().is_empty());
    assert_eq!(response.itinerary.days_used(), 1);
    assert!(
        response
            .itinerary
            .scheduled()
            .iter()
            .all(|stop| stop.is_real())
    );
    assert_eq!(solver.matrix().location_count(), 4);
}

#[rstest]
#[case(0)]
#[case(-2)]
fn rejects_non_positive_days(#[case] days: i32) {
    let err = VrpSolver::new(two_day_matrix())
        .solve(&quick_request(days))
        .expect_err("days must be positive");
    assert!(matches!(err, SolveError::InvalidRequest(_)));
}

#[rstest]
fn greedy_descent_matches_guided_search_on_small_instances() {
    let mut request = quick_request(2);
    request.search.guided_local_search = false;
    let greedy = VrpSolver::new(two_day_matrix())
        .solve(&request)
        .expect("feasible");
    request.search.guided_local_search = true;
    let guided = VrpSolver::new(two_day_matrix())
        .solve(&request)
        .expect("feasible");
    assert_eq!(greedy.itinerary.objective(), guided.itinerary.objective());
}

#[rstest]
fn night_kinds_are_reported_by_the_graph() {
    let config = quick_request(2).schedule;
    let graph = sojourn_core::AugmentedGraph::from_config(5, &config).expect("valid graph");
    assert_eq!(graph.kind(5), Some(NodeKind::Night { night: 0 }));
    assert_eq!(graph.kind(6), Some(NodeKind::Morning { night: 0 }));
}

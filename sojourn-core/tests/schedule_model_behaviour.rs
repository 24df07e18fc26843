//! Behavioural tests for compiling schedules using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sojourn_core::{
    BuildError, CumulRange, DenseMatrix, ScheduleConfig, ScheduleModel, build_schedule_model,
};

const HOUR: i64 = 3_600;

#[derive(Debug, Default)]
struct ScheduleWorld {
    matrix: RefCell<Option<DenseMatrix>>,
    config: RefCell<ScheduleConfig>,
    outcome: RefCell<Option<Result<ScheduleModel, BuildError>>>,
}

impl ScheduleWorld {
    fn expect_model(&self) -> ScheduleModel {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected the schedule to build")
    }
}

#[fixture]
fn world() -> ScheduleWorld {
    ScheduleWorld::default()
}

#[given("{count} locations a uniform hour apart")]
fn given_locations(world: &ScheduleWorld, count: usize) {
    let matrix = DenseMatrix::from_seconds(vec![vec![HOUR; count]; count]).expect("valid matrix");
    world.matrix.replace(Some(matrix));
}

#[given("a schedule of {days} days from {start} to {end}")]
fn given_schedule(world: &ScheduleWorld, days: i32, start: u32, end: u32) {
    world.config.replace(ScheduleConfig {
        days,
        day_start_hour: start,
        day_end_hour: end,
        ..ScheduleConfig::default()
    });
}

#[given("morning anchors are skipped")]
fn given_skipped_mornings(world: &ScheduleWorld) {
    world.config.borrow_mut().skip_morning_anchor_nodes = true;
}

#[when("the schedule model is built")]
fn when_built(world: &ScheduleWorld) {
    let matrix = world.matrix.borrow().clone().expect("matrix given");
    let outcome = build_schedule_model(&matrix, &world.config.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the model has {count} nodes")]
fn then_node_count(world: &ScheduleWorld, count: usize) {
    let schedule = world.expect_model();
    assert_eq!(schedule.model().node_count(), count);
    assert_eq!(schedule.graph().total_nodes(), count);
}

#[then("night node {night} is paired with morning node {morning}")]
fn then_paired(world: &ScheduleWorld, night: usize, morning: usize) {
    let schedule = world.expect_model();
    assert_eq!(schedule.graph().morning_for(night), Some(morning));
    assert_eq!(schedule.graph().night_for(morning), Some(night));
}

#[then("every location has a window from {start} to {end}")]
fn then_windows(world: &ScheduleWorld, start: i64, end: i64) {
    let schedule = world.expect_model();
    let time = schedule
        .model()
        .dimension(schedule.time_dimension())
        .expect("time dimension");
    let expected = CumulRange::new(start * HOUR, end * HOUR);
    for node in schedule.graph().droppable_locations() {
        assert_eq!(time.cumul_range(node), expected, "node {node}");
    }
}

#[then("the model has no day constraints")]
fn then_no_day_constraints(world: &ScheduleWorld) {
    let schedule = world.expect_model();
    assert!(schedule.model().constraints().is_empty());
    assert_eq!(schedule.graph().night_nodes().len(), 0);
}

#[then("the build fails with a configuration error")]
fn then_config_error(world: &ScheduleWorld) {
    let outcome = world.outcome.borrow().clone().expect("outcome recorded");
    assert!(matches!(outcome, Err(BuildError::Config(_))));
}

#[scenario(path = "tests/features/schedule_model.feature", index = 0)]
fn two_days(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_model.feature", index = 1)]
fn single_day(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_model.feature", index = 2)]
fn zero_days(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_model.feature", index = 3)]
fn skipped_mornings(world: ScheduleWorld) {
    let _ = world;
}

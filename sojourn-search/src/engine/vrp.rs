//! `vrp-core` modelling helpers for `VrpSearchEngine`.
//!
//! Each insertion item becomes one job and each model node is its own
//! location, so the locations of a tour are the model's node indices. The
//! goal is lexicographic:
//!
//! 1. `routing-model` rejects insertions the model's dimensions or side
//!    constraints forbid and ranks finished routes that still break the model
//!    last;
//! 2. `drop-penalty` prefers visiting the jobs whose omission costs most;
//! 3. `arc-cost` minimises the model's arc costs.

use std::collections::HashMap;
use std::iter::once;
use std::sync::Arc;

use sojourn_core::RoutingModel;
use vrp_core::models::common::{Location, Profile};
use vrp_core::models::problem::TravelTime;
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;

use super::VrpSearchConfig;
use super::evaluate::{Completeness, Evaluator};
use super::items::Item;

/// Rejects insertions that leave no feasible schedule.
struct ModelConstraintCheck {
    evaluator: Arc<Evaluator>,
    code: ViolationCode,
}

impl FeatureConstraint for ModelConstraintCheck {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        match move_ctx {
            MoveContext::Route { .. } => None,
            MoveContext::Activity {
                route_ctx,
                activity_ctx,
                ..
            } => {
                // `index` is the leg the target is inserted into.
                let mut nodes = tour_nodes(route_ctx.route());
                let at = (activity_ctx.index + 1).min(nodes.len());
                nodes.insert(at, activity_ctx.target.place.location);
                self.evaluator
                    .evaluate(&nodes, Completeness::Partial)
                    .is_none()
                    .then_some(ConstraintViolation {
                        code: self.code,
                        stopped: false,
                    })
            }
        }
    }
}

/// Counts finished routes that break the model.
///
/// Ruin moves remove jobs without consulting constraints, so a route can
/// lose a node another one depends on.
struct ModelViolations {
    evaluator: Arc<Evaluator>,
}

impl FeatureObjective for ModelViolations {
    fn fitness(&self, solution: &InsertionContext) -> Cost {
        let route = solution
            .solution
            .routes
            .first()
            .map_or_else(Vec::new, |route_ctx| tour_nodes(route_ctx.route()));
        let route = complete_route(self.evaluator.model(), route);
        if self
            .evaluator
            .evaluate(&route, Completeness::Complete)
            .is_some()
        {
            0.0
        } else {
            1.0
        }
    }

    fn estimate(&self, _move_ctx: &MoveContext<'_>) -> Cost {
        0.0
    }
}

/// Rewards visiting jobs by the penalty their omission would cost.
struct DropPenalty {
    weights: HashMap<Job, Cost>,
}

impl DropPenalty {
    #[expect(
        clippy::float_arithmetic,
        reason = "vrp-core objectives are floating-point costs"
    )]
    fn saving(&self, job: &Job) -> Cost {
        -self.weights.get(job).copied().unwrap_or(0.0)
    }
}

impl FeatureObjective for DropPenalty {
    fn fitness(&self, solution: &InsertionContext) -> Cost {
        solution
            .solution
            .routes
            .iter()
            .flat_map(|route_ctx| route_ctx.route().tour.jobs())
            .map(|job| self.saving(job))
            .sum()
    }

    fn estimate(&self, move_ctx: &MoveContext<'_>) -> Cost {
        match move_ctx {
            MoveContext::Route { job, .. } => self.saving(job),
            MoveContext::Activity { .. } => 0.0,
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "vrp-core costs are f64; model costs stay far below 2^52"
)]
const fn as_cost(value: i64) -> Cost {
    value as Cost
}

/// Model node indices visited by `route`, depots included.
fn tour_nodes(route: &VrpRoute) -> Vec<usize> {
    route
        .tour
        .all_activities()
        .map(|activity| activity.place.location)
        .collect()
}

/// `nodes` framed by the model's start and end.
pub(super) fn complete_route(model: &RoutingModel, nodes: Vec<usize>) -> Vec<usize> {
    let (start, end) = (model.start(), model.end());
    once(start)
        .chain(nodes.into_iter().filter(|&node| node != start && node != end))
        .chain(once(end))
        .collect()
}

struct ArcCostTransport {
    costs: Vec<Vec<f64>>,
}

impl ArcCostTransport {
    fn new(model: &RoutingModel) -> Self {
        let nodes = model.node_count();
        let costs = (0..nodes)
            .map(|from| {
                (0..nodes)
                    .map(|to| as_cost(model.arc_cost(from, to)))
                    .collect()
            })
            .collect();
        Self { costs }
    }

    fn cost(&self, from: Location, to: Location) -> f64 {
        let result = self.costs.get(from).and_then(|row| row.get(to)).copied();
        debug_assert!(result.is_some(), "arc lookup failed: from={from}, to={to}");
        result.unwrap_or(0.0)
    }
}

impl TransportCost for ArcCostTransport {
    // The model's arc costs do not depend on the route or departure time.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.cost(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.cost(from, to)
    }

    fn distance_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_approx(profile, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.cost(from, to)
    }
}

fn define_goal(
    evaluator: &Arc<Evaluator>,
    weights: HashMap<Job, Cost>,
    transport: Arc<dyn TransportCost>,
) -> GenericResult<GoalContext> {
    let model_feature = FeatureBuilder::default()
        .with_name("routing-model")
        .with_constraint(ModelConstraintCheck {
            evaluator: Arc::clone(evaluator),
            code: ViolationCode::default(),
        })
        .with_objective(ModelViolations {
            evaluator: Arc::clone(evaluator),
        })
        .build()?;

    let penalty_feature = FeatureBuilder::default()
        .with_name("drop-penalty")
        .with_objective(DropPenalty { weights })
        .build()?;

    let transport_feature = TransportFeatureBuilder::new("arc-cost")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[model_feature, penalty_feature, transport_feature])?
        .build()
}

fn define_job(item: &Item) -> GenericResult<Job> {
    match item.nodes.as_slice() {
        [node] => SingleBuilder::default()
            .id(format!("node{node}").as_str())
            .location(*node)?
            .build_as_job(),
        nodes => {
            let first = nodes.first().copied().unwrap_or_default();
            nodes
                .iter()
                .try_fold(
                    MultiBuilder::default().id(format!("group{first}").as_str()),
                    |builder, &node| -> GenericResult<MultiBuilder> {
                        Ok(builder.add_job(SingleBuilder::default().location(node)?.build()?))
                    },
                )?
                .build_as_job()
        }
    }
}

/// Weight of each job in the `drop-penalty` objective. Mandatory jobs
/// outweigh every optional job together.
fn job_weights(items: &[Item], jobs: &[Job]) -> HashMap<Job, Cost> {
    let optional_total = items
        .iter()
        .filter(|item| !item.mandatory)
        .map(|item| item.penalty)
        .fold(0_i64, i64::saturating_add);
    let mandatory = optional_total.saturating_add(1);
    items
        .iter()
        .zip(jobs)
        .map(|(item, job)| {
            let weight = if item.mandatory { mandatory } else { item.penalty };
            (job.clone(), as_cost(weight))
        })
        .collect()
}

fn define_problem(
    model: &RoutingModel,
    jobs: Vec<Job>,
    goal: GoalContext,
    transport: Arc<dyn TransportCost>,
) -> GenericResult<Problem> {
    let vehicle = VehicleBuilder::default()
        .id("traveller")
        .add_detail(
            VehicleDetailBuilder::default()
                .set_start_location(model.start())
                .set_end_location(model.end())
                .build()?,
        )
        .build()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(once(vehicle))
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

/// Context for running a `vrp-core` solve over one model.
pub(super) struct VrpSolveContext<'a> {
    config: &'a VrpSearchConfig,
    evaluator: &'a Arc<Evaluator>,
}

impl<'a> VrpSolveContext<'a> {
    pub(super) const fn new(config: &'a VrpSearchConfig, evaluator: &'a Arc<Evaluator>) -> Self {
        Self { config, evaluator }
    }

    /// Search for the best route over `items`, returned as model nodes from
    /// start to end.
    pub(super) fn solve(
        &self,
        items: &[Item],
        max_time_seconds: usize,
        guided: bool,
    ) -> GenericResult<Vec<usize>> {
        let model = self.evaluator.model();
        let transport: Arc<dyn TransportCost> = Arc::new(ArcCostTransport::new(model));
        let jobs = items.iter().map(define_job).collect::<GenericResult<Vec<_>>>()?;
        let goal = define_goal(self.evaluator, job_weights(items, &jobs), transport.clone())?;
        let problem = Arc::new(define_problem(model, jobs, goal, transport)?);

        let generations = if guided {
            self.config.max_generations
        } else {
            self.config.descent_generations
        };
        let vrp_config = VrpConfigBuilder::new(problem.clone())
            .prebuild()?
            .with_max_time(Some(max_time_seconds))
            .with_max_generations(Some(generations))
            .build()?;

        let solution = vrp_core::solver::Solver::new(problem, vrp_config).solve()?;
        let locations: Vec<Location> = solution.get_locations().flatten().collect();
        Ok(complete_route(model, locations))
    }
}

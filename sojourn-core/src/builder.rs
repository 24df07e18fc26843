//! Compile a multi-day schedule into a [`RoutingModel`].
//!
//! The builder augments the location graph with overnight nodes and then
//! encodes the calendar:
//!
//! - a *Time* dimension carrying clock-of-day seconds, with waiting allowed
//!   only at the depots and night nodes;
//! - daily windows on every location and synthetic node;
//! - optional visits for locations (large penalty) and synthetic nodes
//!   (free);
//! - a *Counting* dimension numbering the stops, used to keep nights in
//!   calendar order and each morning immediately after its night.

use log::{debug, info};
use thiserror::Error;

use crate::augment::{AugmentError, AugmentedGraph, END_DEPOT, START_DEPOT};
use crate::config::{ConfigError, ScheduleConfig};
use crate::matrix::TravelMatrix;
use crate::model::{DimensionId, ModelConstraint, ModelError, RoutingModel};
use crate::transit::ScheduleTransit;

/// Name of the clock-time dimension.
pub const TIME_DIMENSION: &str = "Time";
/// Name of the visit-order dimension.
pub const ORDER_DIMENSION: &str = "Counting";

/// Errors raised while compiling a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The schedule configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The node layout could not be produced.
    #[error(transparent)]
    Augment(#[from] AugmentError),
    /// The routing model rejected a bound or constraint.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// The compiled model breaks an invariant the builder must uphold.
    #[error("schedule model is inconsistent: {0}")]
    Inconsistent(String),
}

/// A compiled schedule: the routing model plus what is needed to read
/// solutions back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleModel {
    model: RoutingModel,
    graph: AugmentedGraph,
    time: DimensionId,
    order: DimensionId,
}

impl ScheduleModel {
    /// Routing model handed to the search engine.
    #[must_use]
    pub const fn model(&self) -> &RoutingModel {
        &self.model
    }

    /// Node layout.
    #[must_use]
    pub const fn graph(&self) -> &AugmentedGraph {
        &self.graph
    }

    /// Handle of the Time dimension.
    #[must_use]
    pub const fn time_dimension(&self) -> DimensionId {
        self.time
    }

    /// Handle of the Counting dimension.
    #[must_use]
    pub const fn order_dimension(&self) -> DimensionId {
        self.order
    }
}

/// Compile `config` over the locations in `matrix`.
///
/// # Errors
/// Returns [`BuildError`] when the configuration is invalid, fewer than two
/// locations exist, or the model cannot hold a bound.
///
/// # Examples
/// ```rust
/// use sojourn_core::{DenseMatrix, ScheduleConfig, build_schedule_model};
///
/// let matrix = DenseMatrix::from_seconds(vec![vec![0; 5]; 5])?;
/// let schedule = build_schedule_model(&matrix, &ScheduleConfig::default())?;
/// assert_eq!(schedule.model().node_count(), 7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_schedule_model<M>(matrix: &M, config: &ScheduleConfig) -> Result<ScheduleModel, BuildError>
where
    M: TravelMatrix + ?Sized,
{
    config.validate()?;
    let graph = AugmentedGraph::from_config(matrix.location_count(), config)?;
    info!(
        "laid out {} nodes ({} locations, {} overnight stays)",
        graph.total_nodes(),
        graph.real_count(),
        graph.overnight_count()
    );
    ScheduleBuilder::new(matrix, graph, config)?.build()
}

struct ScheduleBuilder<'a, M: ?Sized> {
    matrix: &'a M,
    graph: AugmentedGraph,
    config: &'a ScheduleConfig,
    model: RoutingModel,
}

impl<'a, M> ScheduleBuilder<'a, M>
where
    M: TravelMatrix + ?Sized,
{
    fn new(
        matrix: &'a M,
        graph: AugmentedGraph,
        config: &'a ScheduleConfig,
    ) -> Result<Self, BuildError> {
        let model = RoutingModel::new(graph.total_nodes(), START_DEPOT, END_DEPOT)?;
        Ok(Self {
            matrix,
            graph,
            config,
            model,
        })
    }

    fn build(mut self) -> Result<ScheduleModel, BuildError> {
        let transit = ScheduleTransit::new(self.matrix, &self.graph, self.config);
        self.model
            .set_arc_cost_evaluator(|from, to| transit.arc_cost(from, to));
        let time = self.model.add_dimension(
            TIME_DIMENSION,
            |from, to| transit.arc_time(from, to),
            self.config.day_span(),
            self.config.day_end(),
            false,
        )?;
        debug!("created {TIME_DIMENSION} dimension");

        self.suppress_slack(time)?;
        self.apply_time_windows(time)?;
        self.add_disjunctions()?;

        let capacity = i64::try_from(self.graph.total_nodes() + 1)
            .map_err(|_| BuildError::Inconsistent("node count overflows i64".to_owned()))?;
        let order = self
            .model
            .add_constant_dimension(1, capacity, true, ORDER_DIMENSION)?;
        debug!("created {ORDER_DIMENSION} dimension");

        self.order_days(order)?;
        self.model.validate()?;
        let schedule = ScheduleModel {
            model: self.model,
            graph: self.graph,
            time,
            order,
        };
        check_day_boundaries(&schedule)?;
        Ok(schedule)
    }

    /// Forbid waiting once a day is under way: at locations and at each
    /// morning departure. Depots and nights keep their slack to absorb idle
    /// time.
    fn suppress_slack(&mut self, time: DimensionId) -> Result<(), BuildError> {
        let dimension = self.model.dimension_mut(time)?;
        for node in self.graph.droppable_locations().chain(self.graph.morning_nodes()) {
            dimension.pin_slack(node)?;
        }
        Ok(())
    }

    fn apply_time_windows(&mut self, time: DimensionId) -> Result<(), BuildError> {
        let (start, end) = (self.config.day_start(), self.config.day_end());
        let dimension = self.model.dimension_mut(time)?;
        let windowed = self
            .graph
            .droppable_locations()
            .chain(self.graph.night_nodes())
            .chain(self.graph.morning_nodes());
        for node in windowed {
            dimension.set_cumul_range(node, start, end)?;
        }
        dimension.set_cumul_min(START_DEPOT, start)?;
        dimension.set_cumul_max(END_DEPOT, end)?;
        Ok(())
    }

    fn add_disjunctions(&mut self) -> Result<(), BuildError> {
        for node in self.graph.droppable_locations() {
            self.model.add_disjunction(vec![node], self.config.drop_penalty)?;
        }
        let synthetic = self.graph.night_nodes().chain(self.graph.morning_nodes());
        for node in synthetic {
            self.model.add_disjunction(vec![node], 0)?;
        }
        Ok(())
    }

    /// Nights are used in calendar order and each morning directly follows
    /// its night.
    fn order_days(&mut self, order: DimensionId) -> Result<(), BuildError> {
        let nights: Vec<usize> = self.graph.night_nodes().collect();
        let mornings: Vec<usize> = self.graph.morning_nodes().collect();
        self.chain_in_calendar_order(order, &nights)?;
        for &night in &nights {
            if let Some(morning) = self.graph.morning_for(night) {
                self.model.add_constraint(ModelConstraint::SameActivation {
                    first: night,
                    second: morning,
                })?;
                self.model.add_constraint(ModelConstraint::CumulOffset {
                    dimension: order,
                    from: night,
                    to: morning,
                    offset: 1,
                })?;
            }
        }
        self.chain_in_calendar_order(order, &mornings)?;
        Ok(())
    }

    fn chain_in_calendar_order(
        &mut self,
        order: DimensionId,
        nodes: &[usize],
    ) -> Result<(), BuildError> {
        for (i, &earlier) in nodes.iter().enumerate() {
            for &later in nodes.iter().skip(i + 1) {
                self.model.add_constraint(ModelConstraint::RequiresActive {
                    node: later,
                    requires: earlier,
                })?;
                self.model.add_constraint(ModelConstraint::OrderedWhenActive {
                    dimension: order,
                    before: earlier,
                    after: later,
                })?;
            }
        }
        Ok(())
    }
}

/// Every morning must share activation with its night and sit one stop
/// after it.
fn check_day_boundaries(schedule: &ScheduleModel) -> Result<(), BuildError> {
    let constraints = schedule.model.constraints();
    for night in schedule.graph.night_nodes() {
        let Some(morning) = schedule.graph.morning_for(night) else {
            continue;
        };
        let paired = constraints.contains(&ModelConstraint::SameActivation {
            first: night,
            second: morning,
        });
        let adjacent = constraints.contains(&ModelConstraint::CumulOffset {
            dimension: schedule.order,
            from: night,
            to: morning,
            offset: 1,
        });
        debug_assert!(paired && adjacent, "night {night} is not tied to morning {morning}");
        if !(paired && adjacent) {
            return Err(BuildError::Inconsistent(format!(
                "night {night} is not tied to morning {morning}"
            )));
        }
    }
    Ok(())
}

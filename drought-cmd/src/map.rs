//! Per-state aggregation and the whole-country map.

use crate::context::Context;
use drought_core::period::Period;
use drought_data::AggregationResult;
use drought_view::map::{overview, state_view, MapOverview, MapView};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StateAggregate {
    pub result: AggregationResult,
    /// Absent when the state has no known coordinate
    pub view: Option<MapView>,
}

pub fn aggregate_state(ctx: &Context, state: &str, period: Period) -> StateAggregate {
    let result = ctx.dataset.aggregate(state, period, &ctx.config.thresholds);
    let view = state_view(&result, &ctx.coordinates, &ctx.config.map);
    StateAggregate { result, view }
}

pub fn map_overview(ctx: &Context, period: Period) -> MapOverview {
    let results = ctx.dataset.aggregate_all(period, &ctx.config.thresholds);
    overview(&results, &ctx.coordinates, &ctx.config.map)
}

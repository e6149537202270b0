//! State Aggregator: reduce a state's district records for one period to a
//! single representative severity, category and color.
//!
//! The median is used rather than the mean so a few extreme districts do
//! not drag the state label.

use drought_core::category::{DroughtCategory, SeverityThresholds};
use drought_core::period::Period;
use drought_core::prediction::PredictionRecord;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Median of the values; averages the two middle elements for even counts.
///
/// Sorts the slice in place. Returns `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Statistics that only exist when at least one record matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeveritySummary {
    pub median_severity: f64,
    pub category: DroughtCategory,
}

impl SeveritySummary {
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// Aggregated view of one state for one period.
///
/// `summary` is `None` exactly when `sample_count` is zero; callers must then
/// fall back to a coordinate-only view instead of inventing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub state: String,
    pub period: Period,
    pub sample_count: usize,
    pub summary: Option<SeveritySummary>,
}

impl AggregationResult {
    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }

    pub fn category(&self) -> Option<DroughtCategory> {
        self.summary.map(|s| s.category)
    }

    pub fn median_severity(&self) -> Option<f64> {
        self.summary.map(|s| s.median_severity)
    }

    fn from_severities(
        state: &str,
        period: Period,
        mut severities: Vec<f64>,
        thresholds: &SeverityThresholds,
    ) -> Self {
        let sample_count = severities.len();
        let summary = median(&mut severities).map(|median_severity| SeveritySummary {
            median_severity,
            category: thresholds.classify(median_severity),
        });
        debug!(
            "aggregate: {} {} -> {} samples, {:?}",
            state,
            period,
            sample_count,
            summary.map(|s| s.category)
        );
        AggregationResult {
            state: state.to_string(),
            period,
            sample_count,
            summary,
        }
    }
}

/// Aggregate every record whose state, year and month match exactly.
pub fn aggregate(
    records: &[PredictionRecord],
    state: &str,
    period: Period,
    thresholds: &SeverityThresholds,
) -> AggregationResult {
    let severities: Vec<f64> = records
        .iter()
        .filter(|r| r.matches(state, period))
        .map(|r| r.drought_severity)
        .collect();
    AggregationResult::from_severities(state, period, severities, thresholds)
}

/// Aggregate all states that have any record, in one pass.
///
/// States with records only in other periods are included with a zero
/// sample count so the map can still center on them. Output is sorted by state.
pub fn aggregate_all(
    records: &[PredictionRecord],
    period: Period,
    thresholds: &SeverityThresholds,
) -> Vec<AggregationResult> {
    let states: BTreeSet<&str> = records.iter().map(|r| r.state.as_str()).collect();
    let mut by_state: BTreeMap<&str, Vec<f64>> =
        states.into_iter().map(|s| (s, Vec::new())).collect();
    for record in records.iter().filter(|r| r.period() == period) {
        if let Some(severities) = by_state.get_mut(record.state.as_str()) {
            severities.push(record.drought_severity);
        }
    }
    by_state
        .into_iter()
        .map(|(state, severities)| {
            AggregationResult::from_severities(state, period, severities, thresholds)
        })
        .collect()
}

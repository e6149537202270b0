use crate::aggregate::{aggregate, aggregate_all, AggregationResult};
use crate::index::{build_index, LookupIndex};
use crate::lookup::{resolve_prediction, Prediction, PredictionQuery};
use drought_core::category::SeverityThresholds;
use drought_core::error::LoadError;
use drought_core::loader::{parse_predictions, PredictionSource};
use drought_core::period::{Period, YearRange};
use drought_core::prediction::PredictionRecord;
use log::warn;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Loaded prediction records, immutable after load.
///
/// Cheaply cloneable (via `Arc`); every operation takes the handle instead
/// of reading ambient state.
///
/// # Example
///
/// ```rust
/// use drought_core::category::{DroughtCategory, SeverityThresholds};
/// use drought_core::period::Period;
/// use drought_data::Dataset;
///
/// let dataset = Dataset::from_json(
///     r#"[{"state":"Bihar","year":2025,"month":3,"drought_severity":2.0},
///         {"state":"Bihar","year":2025,"month":3,"drought_severity":4.0}]"#,
/// )
/// .unwrap();
/// let result = dataset.aggregate("Bihar", Period::new(2025, 3).unwrap(), &SeverityThresholds::default());
/// assert_eq!(result.category(), Some(DroughtCategory::SevereDrought));
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[PredictionRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<PredictionRecord>) -> Self {
        Dataset {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Dataset::new(Vec::new())
    }

    pub fn from_json(json: &str) -> drought_core::error::Result<Self> {
        Ok(Dataset::new(parse_predictions(json)?.records))
    }

    /// Load the dataset. An unavailable or undecodable resource is an error;
    /// rejected elements are only counted.
    pub async fn load(source: &PredictionSource, timeout: Duration) -> drought_core::error::Result<Self> {
        let loaded = source.load(timeout).await?;
        Ok(Dataset::new(loaded.records))
    }

    /// Load the dataset, or an empty one if the resource is unavailable or
    /// malformed. The failure is logged and handed back so callers can tell
    /// a failed load from a dataset that is merely empty.
    pub async fn load_or_empty(source: &PredictionSource, timeout: Duration) -> (Self, Option<LoadError>) {
        match Dataset::load(source, timeout).await {
            Ok(dataset) => (dataset, None),
            Err(e) => {
                warn!("dataset: failed to load {:?}: {}", source, e);
                (Dataset::empty(), Some(e))
            }
        }
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn index(&self, years: YearRange) -> LookupIndex {
        build_index(&self.records, years)
    }

    /// Index for the selection controls. The built-in fallback table is used
    /// only when loading failed and `use_fallback` is set; a dataset that
    /// loaded but holds no records yields an empty index.
    pub fn index_or_fallback(&self, years: YearRange, load_failed: bool, use_fallback: bool) -> LookupIndex {
        if load_failed && use_fallback {
            LookupIndex::fallback()
        } else {
            self.index(years)
        }
    }

    pub fn aggregate(
        &self,
        state: &str,
        period: Period,
        thresholds: &SeverityThresholds,
    ) -> AggregationResult {
        aggregate(&self.records, state, period, thresholds)
    }

    pub fn aggregate_all(&self, period: Period, thresholds: &SeverityThresholds) -> Vec<AggregationResult> {
        aggregate_all(&self.records, period, thresholds)
    }

    pub fn resolve_prediction<R: Rng>(
        &self,
        query: &PredictionQuery,
        thresholds: &SeverityThresholds,
        synthesize_with: Option<&mut R>,
    ) -> Option<Prediction> {
        resolve_prediction(&self.records, query, thresholds, synthesize_with)
    }
}

//! Single-record prediction lookup, with an explicitly tagged synthetic
//! placeholder for selections the dataset does not cover.

use drought_core::category::SeverityThresholds;
use drought_core::period::Period;
use drought_core::prediction::PredictionRecord;
use log::warn;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

/// States whose placeholder severities are nudged upward.
pub const DROUGHT_PRONE_STATES: [&str; 3] = ["Rajasthan", "Maharashtra", "Karnataka"];

/// A user selection for the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionQuery {
    pub state: String,
    pub district: String,
    pub period: Period,
}

impl PredictionQuery {
    /// Returns `None` when the month is outside 1..=12.
    pub fn new(state: &str, district: &str, month: u32, year: i32) -> Option<Self> {
        Some(PredictionQuery {
            state: state.to_string(),
            district: district.to_string(),
            period: Period::new(year, month)?,
        })
    }
}

/// A prediction shown to the user, tagged by provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Prediction {
    /// Read verbatim from the dataset
    Observed(PredictionRecord),
    /// Randomly generated demo placeholder; not real data
    Synthesized(PredictionRecord),
}

impl Prediction {
    pub fn record(&self) -> &PredictionRecord {
        match self {
            Prediction::Observed(record) | Prediction::Synthesized(record) => record,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Prediction::Synthesized(_))
    }
}

/// Exact match on state, district, year and month. First match wins.
pub fn find_prediction<'a>(
    records: &'a [PredictionRecord],
    query: &PredictionQuery,
) -> Option<&'a PredictionRecord> {
    records.iter().find(|r| {
        r.matches(&query.state, query.period) && r.district.as_deref() == Some(query.district.as_str())
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Seasonal placeholder severity in [0, 5], rounded to two decimals.
///
/// Pre-monsoon months run dry, monsoon months run wet, and drought-prone
/// states get an extra push upward.
pub fn synthetic_severity<R: Rng>(rng: &mut R, state: &str, month: u32) -> f64 {
    let seasonal: f64 = match month {
        3..=6 => rng.gen_range(1.0..2.5),
        7..=9 => -rng.gen_range(0.5..1.5),
        _ => rng.gen_range(-0.5..1.0),
    };
    let regional: f64 = if DROUGHT_PRONE_STATES.contains(&state) {
        rng.gen_range(0.5..1.5)
    } else {
        0.0
    };
    round_to((2.0 + seasonal + regional).clamp(0.0, 5.0), 2)
}

/// One draw from N(mean, std_dev); the mean itself if the parameters are invalid.
fn gaussian<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    Normal::new(mean, std_dev)
        .map(|normal| normal.sample(rng))
        .unwrap_or(mean)
}

/// Generate a placeholder record for a selection with no data.
pub fn synthesize_prediction<R: Rng>(
    rng: &mut R,
    query: &PredictionQuery,
    thresholds: &SeverityThresholds,
) -> PredictionRecord {
    let severity = synthetic_severity(rng, &query.state, query.period.month);
    PredictionRecord {
        state: query.state.clone(),
        district: Some(query.district.clone()),
        year: query.period.year,
        month: query.period.month,
        drought_severity: severity,
        drought_category: Some(thresholds.classify(severity).label().to_string()),
        confidence: Some(round_to(0.75 + rng.gen_range(0.0..0.2_f64), 2)),
        rainfall_prediction: Some(round_to(gaussian(rng, 50.0, 30.0).max(0.0), 1)),
        temperature_avg: Some(round_to(gaussian(rng, 25.0, 5.0), 1)),
        ndvi: None,
        soil_moisture: None,
        spi3: None,
        spi6: None,
    }
}

/// Look up a prediction, synthesizing a tagged placeholder only when allowed.
pub fn resolve_prediction<R: Rng>(
    records: &[PredictionRecord],
    query: &PredictionQuery,
    thresholds: &SeverityThresholds,
    synthesize_with: Option<&mut R>,
) -> Option<Prediction> {
    if let Some(record) = find_prediction(records, query) {
        return Some(Prediction::Observed(record.clone()));
    }
    let rng = synthesize_with?;
    warn!(
        "lookup: no prediction for {}/{} {}; serving synthetic placeholder",
        query.state, query.district, query.period
    );
    Some(Prediction::Synthesized(synthesize_prediction(
        rng, query, thresholds,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn record(state: &str, district: &str, year: i32, month: u32, severity: f64) -> PredictionRecord {
        PredictionRecord {
            state: state.to_string(),
            district: Some(district.to_string()),
            year,
            month,
            drought_severity: severity,
            drought_category: Some("Moderate Drought".to_string()),
            confidence: Some(0.9),
            rainfall_prediction: None,
            temperature_avg: None,
            ndvi: None,
            soil_moisture: None,
            spi3: None,
            spi6: None,
        }
    }

    fn records() -> Vec<PredictionRecord> {
        vec![
            record("Maharashtra", "Pune", 2024, 6, 2.65),
            record("Maharashtra", "Nagpur", 2024, 6, 3.1),
            record("Maharashtra", "Pune", 2024, 7, 1.0),
        ]
    }

    #[test]
    fn test_query_rejects_bad_month() {
        assert!(PredictionQuery::new("Goa", "North Goa", 0, 2024).is_none());
        assert!(PredictionQuery::new("Goa", "North Goa", 13, 2024).is_none());
    }

    #[test]
    fn test_find_exact_match() {
        let data = records();
        let query = PredictionQuery::new("Maharashtra", "Pune", 6, 2024).unwrap();
        let found = find_prediction(&data, &query).unwrap();
        assert_eq!(found.drought_severity, 2.65);

        let other_month = PredictionQuery::new("Maharashtra", "Pune", 8, 2024).unwrap();
        assert!(find_prediction(&data, &other_month).is_none());
        let other_district = PredictionQuery::new("Maharashtra", "Nashik", 6, 2024).unwrap();
        assert!(find_prediction(&data, &other_district).is_none());
    }

    #[test]
    fn test_observed_is_never_synthetic() {
        let data = records();
        let query = PredictionQuery::new("Maharashtra", "Nagpur", 6, 2024).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let prediction =
            resolve_prediction(&data, &query, &SeverityThresholds::default(), Some(&mut rng)).unwrap();
        assert!(!prediction.is_synthetic());
        assert_eq!(prediction.record().drought_severity, 3.1);
    }

    #[test]
    fn test_missing_data_is_tagged_synthetic() {
        let data = records();
        let query = PredictionQuery::new("Kerala", "Kochi", 1, 2025).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let prediction =
            resolve_prediction(&data, &query, &SeverityThresholds::default(), Some(&mut rng)).unwrap();
        assert!(prediction.is_synthetic());
        assert!(matches!(prediction, Prediction::Synthesized(_)));
        let record = prediction.record();
        assert_eq!(record.state, "Kerala");
        assert_eq!(record.district.as_deref(), Some("Kochi"));
        assert!((0.75..=0.95).contains(&record.confidence.unwrap()));
    }

    #[test]
    fn test_missing_data_without_synthesis() {
        let data = records();
        let query = PredictionQuery::new("Kerala", "Kochi", 1, 2025).unwrap();
        let none: Option<&mut SmallRng> = None;
        assert!(resolve_prediction(&data, &query, &SeverityThresholds::default(), none).is_none());
    }

    #[test]
    fn test_synthetic_severity_bounds_and_season() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let summer = synthetic_severity(&mut rng, "Rajasthan", 5);
            assert!((0.0..=5.0).contains(&summer));
            assert!(summer >= 3.5);
            let monsoon = synthetic_severity(&mut rng, "Kerala", 8);
            assert!((0.5..=1.5).contains(&monsoon));
        }
    }

    #[test]
    fn test_synthesis_is_deterministic_for_a_seed() {
        let query = PredictionQuery::new("Gujarat", "Surat", 4, 2026).unwrap();
        let thresholds = SeverityThresholds::default();
        let a = synthesize_prediction(&mut SmallRng::seed_from_u64(3), &query, &thresholds);
        let b = synthesize_prediction(&mut SmallRng::seed_from_u64(3), &query, &thresholds);
        assert_eq!(a, b);
        assert_eq!(
            a.drought_category.as_deref(),
            Some(thresholds.classify(a.drought_severity).label())
        );
    }

    #[test]
    fn test_synthetic_weather_is_gaussian_around_means() {
        let query = PredictionQuery::new("Karnataka", "Mysuru", 11, 2025).unwrap();
        let thresholds = SeverityThresholds::default();
        let mut rng = SmallRng::seed_from_u64(99);
        let samples: Vec<PredictionRecord> = (0..2000)
            .map(|_| synthesize_prediction(&mut rng, &query, &thresholds))
            .collect();
        let rainfall: Vec<f64> = samples.iter().filter_map(|r| r.rainfall_prediction).collect();
        let temperature: Vec<f64> = samples.iter().filter_map(|r| r.temperature_avg).collect();
        assert!(rainfall.iter().all(|r| *r >= 0.0));
        let mean_temp = temperature.iter().sum::<f64>() / temperature.len() as f64;
        assert!((mean_temp - 25.0).abs() < 0.5);
        // a uniform +/-5 draw could never leave this band
        assert!(temperature.iter().any(|t| (*t - 25.0).abs() > 5.0));
    }

    #[test]
    fn test_serialized_tag() {
        let prediction = Prediction::Synthesized(records().remove(0));
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["kind"], "synthesized");
        assert_eq!(json["record"]["district"], "Pune");
    }
}

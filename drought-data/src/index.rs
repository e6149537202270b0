//! Lookup Index Builder: the option lists behind the selection controls.
//!
//! All collections are ordered containers, so the output is identical for
//! any permutation of the input records.

use csv::ReaderBuilder;
use drought_core::period::{Period, YearRange};
use drought_core::prediction::PredictionRecord;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Embedded CSV of a handful of states and districts, used only to keep the
/// selection controls populated when the dataset cannot be loaded.
pub static FALLBACK_DISTRICTS_CSV: &str = include_str!("../../fixtures/fallback_districts.csv");

/// State name → alphabetically ordered distinct district names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateDistrictIndex(BTreeMap<String, BTreeSet<String>>);

impl StateDistrictIndex {
    pub fn insert(&mut self, state: &str, district: &str) {
        self.0
            .entry(state.to_string())
            .or_default()
            .insert(district.to_string());
    }

    /// Districts of a state in display order; empty for unknown states.
    pub fn districts(&self, state: &str) -> Vec<&str> {
        self.0
            .get(state)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn district_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where a [`LookupIndex`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrigin {
    Dataset,
    /// Built-in table; carries no severity data and cannot serve predictions
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupIndex {
    /// Distinct states with data, lexicographically sorted
    pub states: Vec<String>,
    pub districts: StateDistrictIndex,
    /// Distinct periods within the configured years, chronologically sorted
    pub periods: Vec<Period>,
    pub origin: IndexOrigin,
}

impl LookupIndex {
    /// Index from the built-in fallback table. Has no periods.
    pub fn fallback() -> Self {
        let mut districts = StateDistrictIndex::default();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(FALLBACK_DISTRICTS_CSV.as_bytes());
        for row in rdr.records() {
            let record = row.expect("embedded fallback districts csv should parse");
            if let (Some(state), Some(district)) = (record.get(0), record.get(1)) {
                districts.insert(state.trim(), district.trim());
            }
        }
        LookupIndex {
            states: districts.states().map(str::to_string).collect(),
            districts,
            periods: Vec::new(),
            origin: IndexOrigin::Fallback,
        }
    }

    pub fn can_serve_predictions(&self) -> bool {
        self.origin == IndexOrigin::Dataset
    }

    /// Distinct years among the indexed periods, ascending.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.periods.iter().map(|p| p.year).collect();
        years.into_iter().collect()
    }
}

/// Sort periods by `year * 12 + month`, never by their string form.
pub fn sort_periods_chronologically(periods: &mut [Period]) {
    periods.sort_by_key(Period::ordinal);
}

/// Build the states list, state → district index and period set.
///
/// Records without a district still contribute their state and period.
pub fn build_index(records: &[PredictionRecord], years: YearRange) -> LookupIndex {
    let mut states = BTreeSet::new();
    let mut districts = StateDistrictIndex::default();
    let mut periods = BTreeSet::new();

    for record in records {
        states.insert(record.state.clone());
        if let Some(district) = &record.district {
            districts.insert(&record.state, district);
        }
        if years.contains(record.year) {
            periods.insert(record.period());
        }
    }

    let mut periods: Vec<Period> = periods.into_iter().collect();
    sort_periods_chronologically(&mut periods);
    debug!(
        "index: {} states, {} districts, {} periods",
        states.len(),
        districts.district_count(),
        periods.len()
    );
    LookupIndex {
        states: states.into_iter().collect(),
        districts,
        periods,
        origin: IndexOrigin::Dataset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, district: Option<&str>, year: i32, month: u32) -> PredictionRecord {
        PredictionRecord {
            state: state.to_string(),
            district: district.map(str::to_string),
            year,
            month,
            drought_severity: 1.0,
            drought_category: None,
            confidence: None,
            rainfall_prediction: None,
            temperature_avg: None,
            ndvi: None,
            soil_moisture: None,
            spi3: None,
            spi6: None,
        }
    }

    fn sample() -> Vec<PredictionRecord> {
        vec![
            record("Tamil Nadu", Some("Madurai"), 2024, 10),
            record("Maharashtra", Some("Pune"), 2024, 9),
            record("Maharashtra", Some("Pune"), 2024, 10),
            record("Maharashtra", Some("Nagpur"), 2024, 1),
            record("Kerala", None, 2023, 5),
            record("Bihar", Some("Patna"), 2027, 2),
        ]
    }

    #[test]
    fn test_states_sorted_and_distinct() {
        let index = build_index(&sample(), YearRange::default());
        assert_eq!(
            index.states,
            vec!["Bihar", "Kerala", "Maharashtra", "Tamil Nadu"]
        );
        assert_eq!(index.origin, IndexOrigin::Dataset);
    }

    #[test]
    fn test_districts_collapse_duplicates_and_skip_missing() {
        let index = build_index(&sample(), YearRange::default());
        assert_eq!(index.districts.districts("Maharashtra"), vec!["Nagpur", "Pune"]);
        assert!(index.districts.districts("Kerala").is_empty());
        assert!(index.districts.districts("Atlantis").is_empty());
        assert_eq!(index.districts.district_count(), 4);
    }

    #[test]
    fn test_periods_filtered_and_chronological() {
        let index = build_index(&sample(), YearRange::default());
        let labels: Vec<String> = index.periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["2024-1", "2024-9", "2024-10"]);
        assert_eq!(index.years(), vec![2024]);
    }

    #[test]
    fn test_sort_periods_chronologically() {
        let mut periods: Vec<Period> = ["2024-9", "2024-10", "2024-1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        sort_periods_chronologically(&mut periods);
        let labels: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["2024-1", "2024-9", "2024-10"]);
    }

    #[test]
    fn test_order_independent() {
        let forward = sample();
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(
            build_index(&forward, YearRange::default()),
            build_index(&reversed, YearRange::default())
        );
    }

    #[test]
    fn test_fallback_index() {
        let index = LookupIndex::fallback();
        assert_eq!(index.origin, IndexOrigin::Fallback);
        assert!(!index.can_serve_predictions());
        assert_eq!(index.states.len(), 5);
        assert!(index.periods.is_empty());
        assert!(index.districts.districts("Maharashtra").contains(&"Pune"));
    }
}

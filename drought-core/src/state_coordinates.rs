use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Embedded CSV of representative coordinates for Indian states and union territories.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/state_coordinates.csv");

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Static state → coordinate table, used only to position map markers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateCoordinates {
    by_state: BTreeMap<String, LatLon>,
}

impl StateCoordinates {
    /// The built-in table from the embedded CSV.
    pub fn builtin() -> Self {
        StateCoordinates::parse_csv(CSV_OBJECT).expect("embedded state coordinates csv should parse")
    }

    /// Parse `STATE,LATITUDE,LONGITUDE` rows (with headers).
    ///
    /// Rows whose coordinates do not parse are dropped rather than placed at 0,0.
    pub fn parse_csv(csv_object: &str) -> Result<Self, csv::Error> {
        let mut by_state = BTreeMap::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let state = record.get(0).unwrap_or("").trim();
            let lat = record.get(1).and_then(|s| s.trim().parse::<f64>().ok());
            let lon = record.get(2).and_then(|s| s.trim().parse::<f64>().ok());
            if let (false, Some(lat), Some(lon)) = (state.is_empty(), lat, lon) {
                by_state.insert(state.to_string(), LatLon { lat, lon });
            }
        }
        Ok(StateCoordinates { by_state })
    }

    pub fn get(&self, state: &str) -> Option<LatLon> {
        self.by_state.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.by_state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_state.is_empty()
    }
}

//! Dashboard configuration.
//!
//! A built-in copy is embedded from `fixtures/dashboard_config.json`; an
//! override file may replace any subset of fields (missing fields keep
//! their defaults).

use crate::category::SeverityThresholds;
use crate::error::ConfigError;
use crate::loader::{PredictionSource, DEFAULT_DATA_SOURCE};
use crate::period::YearRange;
use crate::state_coordinates::LatLon;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const BUILTIN_DASHBOARD_CONFIG: &str = include_str!("../../fixtures/dashboard_config.json");

/// Stroke and opacity of a state marker; the fill comes from its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Circle radius in meters
    pub radius: f64,
    pub stroke_color: String,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            radius: 15000.0,
            stroke_color: "#333333".to_string(),
            opacity: 0.9,
            fill_opacity: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial map center
    pub center: LatLon,
    /// Zoom for the whole-country view
    pub zoom: u8,
    /// Zoom when centering on a single state
    pub state_zoom: u8,
    pub marker: MarkerStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: LatLon {
                lat: 22.9734,
                lon: 78.6569,
            },
            zoom: 5,
            state_zoom: 6,
            marker: MarkerStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path or http(s) URL of the prediction document
    pub data_source: String,
    /// Years offered by the map's period selector
    pub map_years: YearRange,
    pub thresholds: SeverityThresholds,
    pub fetch_timeout_secs: u64,
    pub map: MapConfig,
    /// Serve tagged placeholder predictions when the dataset has no match
    pub allow_synthetic: bool,
    /// Populate selection controls from the built-in table when loading fails
    pub use_fallback_index: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            map_years: YearRange::default(),
            thresholds: SeverityThresholds::default(),
            fetch_timeout_secs: 30,
            map: MapConfig::default(),
            allow_synthetic: true,
            use_fallback_index: true,
        }
    }
}

impl DashboardConfig {
    pub fn builtin() -> Self {
        DashboardConfig::from_json_str(BUILTIN_DASHBOARD_CONFIG)
            .expect("builtin dashboard config should parse")
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate().map_err(ConfigError::Invalid)?;
        if !self.map_years.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "map_years start {} is after end {}",
                self.map_years.start, self.map_years.end
            )));
        }
        if self.data_source.trim().is_empty() {
            return Err(ConfigError::Invalid("data_source is empty".to_string()));
        }
        Ok(())
    }

    pub fn source(&self) -> PredictionSource {
        PredictionSource::parse(&self.data_source)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

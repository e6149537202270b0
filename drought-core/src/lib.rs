//! Core types for the drought-monitoring dashboard.
//!
//! Holds the canonical prediction record, the drought category table and
//! severity thresholds, (year, month) periods, the static state coordinate
//! table, dashboard configuration and the prediction dataset loader.

pub mod category;
pub mod config;
pub mod error;
pub mod loader;
pub mod period;
pub mod prediction;
pub mod state_coordinates;

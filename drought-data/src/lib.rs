//! Data processing over a loaded drought prediction dataset.
//!
//! Everything here is a pure function of the records plus its arguments:
//! building the selection-control indexes, reducing district records to one
//! category per state, and looking up (or synthesizing) single predictions.

pub mod aggregate;
pub mod dataset;
pub mod index;
pub mod lookup;

pub use aggregate::{aggregate, aggregate_all, median, AggregationResult, SeveritySummary};
pub use dataset::Dataset;
pub use index::{build_index, LookupIndex, StateDistrictIndex};
pub use lookup::{find_prediction, Prediction, PredictionQuery};

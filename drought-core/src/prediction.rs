use crate::period::Period;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One district-month drought prediction in canonical form.
///
/// Produced only by [`RawPredictionRecord::normalize`], so every read site
/// sees the same lowercase schema regardless of how the source file spelled
/// its keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub state: String,
    /// Absent for state-level rows
    pub district: Option<String>,
    pub year: i32,
    /// Month of the year, 1 through 12
    pub month: u32,
    /// Unitless drought intensity; lower is wetter
    pub drought_severity: f64,
    /// Label supplied by the dataset, shown verbatim; never used for aggregation
    pub drought_category: Option<String>,
    /// Model confidence in [0, 1]
    pub confidence: Option<f64>,
    /// Predicted rainfall in mm
    pub rainfall_prediction: Option<f64>,
    /// Average temperature in degrees Celsius
    pub temperature_avg: Option<f64>,
    pub ndvi: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub spi3: Option<f64>,
    pub spi6: Option<f64>,
}

impl PredictionRecord {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }

    /// Exact match on state, year and month.
    pub fn matches(&self, state: &str, period: Period) -> bool {
        self.state == state && self.year == period.year && self.month == period.month
    }
}

/// A dataset element as it appears on disk.
///
/// Older exports capitalize the identifying keys (`State`, `District`,
/// `Year`, `Month`). Both spellings are captured here and resolved once in
/// [`normalize`](Self::normalize), lowercase first.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawPredictionRecord {
    state: Option<String>,
    #[serde(rename = "State")]
    state_legacy: Option<String>,
    district: Option<String>,
    #[serde(rename = "District")]
    district_legacy: Option<String>,
    year: Option<Value>,
    #[serde(rename = "Year")]
    year_legacy: Option<Value>,
    month: Option<Value>,
    #[serde(rename = "Month")]
    month_legacy: Option<Value>,
    drought_severity: Option<Value>,
    drought_category: Option<String>,
    confidence: Option<Value>,
    rainfall_prediction: Option<Value>,
    temperature_avg: Option<Value>,
    ndvi: Option<Value>,
    soil_moisture: Option<Value>,
    spi3: Option<Value>,
    spi6: Option<Value>,
}

/// Why a raw record could not be turned into a [`PredictionRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRejection {
    /// Not an object, or a field of the wrong JSON type
    Malformed(String),
    MissingState,
    MissingYear,
    MissingMonth,
    MonthOutOfRange(i64),
    MissingSeverity,
}

impl fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRejection::Malformed(reason) => write!(f, "malformed element: {reason}"),
            RecordRejection::MissingState => f.write_str("missing state"),
            RecordRejection::MissingYear => f.write_str("missing or non-integer year"),
            RecordRejection::MissingMonth => f.write_str("missing or non-integer month"),
            RecordRejection::MonthOutOfRange(m) => write!(f, "month {m} outside 1-12"),
            RecordRejection::MissingSeverity => f.write_str("missing drought_severity"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Integer from a JSON number (`2024`, `2024.0`) or numeric string (`"2024"`).
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Finite float from a JSON number or numeric string.
fn lenient_float(value: Option<Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn pick_int(primary: Option<Value>, legacy: Option<Value>) -> Option<i64> {
    primary
        .as_ref()
        .and_then(lenient_int)
        .or_else(|| legacy.as_ref().and_then(lenient_int))
}

impl RawPredictionRecord {
    /// Resolve key spellings and validate into the canonical schema.
    pub fn normalize(self) -> Result<PredictionRecord, RecordRejection> {
        let state = non_empty(self.state)
            .or_else(|| non_empty(self.state_legacy))
            .ok_or(RecordRejection::MissingState)?;
        let district = non_empty(self.district).or_else(|| non_empty(self.district_legacy));
        let year = pick_int(self.year, self.year_legacy)
            .and_then(|y| i32::try_from(y).ok())
            .ok_or(RecordRejection::MissingYear)?;
        let month = pick_int(self.month, self.month_legacy).ok_or(RecordRejection::MissingMonth)?;
        if !(1..=12).contains(&month) {
            return Err(RecordRejection::MonthOutOfRange(month));
        }
        let drought_severity =
            lenient_float(self.drought_severity).ok_or(RecordRejection::MissingSeverity)?;
        Ok(PredictionRecord {
            state,
            district,
            year,
            month: month as u32,
            drought_severity,
            drought_category: non_empty(self.drought_category),
            confidence: lenient_float(self.confidence),
            rainfall_prediction: lenient_float(self.rainfall_prediction),
            temperature_avg: lenient_float(self.temperature_avg),
            ndvi: lenient_float(self.ndvi),
            soil_moisture: lenient_float(self.soil_moisture),
            spi3: lenient_float(self.spi3),
            spi6: lenient_float(self.spi6),
        })
    }
}

//! Dataset Loader: reads the static prediction document into canonical records.
//!
//! The document is either a bare JSON array of prediction objects or an
//! object wrapping that array under `predictions`. Elements that cannot be
//! normalized are skipped and counted; only transport and decode failures
//! are errors.

use crate::error::{LoadError, Result};
use crate::prediction::{PredictionRecord, RawPredictionRecord, RecordRejection};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_SOURCE: &str = "prediction_data.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionDocument {
    List(Vec<Value>),
    Wrapped { predictions: Vec<Value> },
}

/// Decode and normalize one array element.
fn decode_element(element: Value) -> std::result::Result<PredictionRecord, RecordRejection> {
    serde_json::from_value::<RawPredictionRecord>(element)
        .map_err(|e| RecordRejection::Malformed(e.to_string()))?
        .normalize()
}

/// Outcome of decoding a prediction document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPredictions {
    pub records: Vec<PredictionRecord>,
    /// Elements dropped during normalization
    pub skipped: usize,
}

/// Decode a prediction document from JSON text.
pub fn parse_predictions(json: &str) -> Result<LoadedPredictions> {
    let raw = match serde_json::from_str::<PredictionDocument>(json)? {
        PredictionDocument::List(raw) => raw,
        PredictionDocument::Wrapped { predictions } => predictions,
    };
    let mut loaded = LoadedPredictions {
        records: Vec::with_capacity(raw.len()),
        skipped: 0,
    };
    for (idx, element) in raw.into_iter().enumerate() {
        match decode_element(element) {
            Ok(record) => loaded.records.push(record),
            Err(reason) => {
                debug!("loader: skipping element {}: {}", idx, reason);
                loaded.skipped += 1;
            }
        }
    }
    info!(
        "loader: Loaded {} prediction records, skipped {}",
        loaded.records.len(),
        loaded.skipped
    );
    Ok(loaded)
}

/// Where the prediction document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionSource {
    Path(PathBuf),
    Url(String),
}

impl PredictionSource {
    /// `http://` and `https://` addresses are fetched; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            PredictionSource::Url(location.to_string())
        } else {
            PredictionSource::Path(PathBuf::from(location))
        }
    }

    /// Load and decode the document. A single suspend point for URL sources.
    pub async fn load(&self, timeout: Duration) -> Result<LoadedPredictions> {
        match self {
            PredictionSource::Path(path) => load_from_path(path),
            PredictionSource::Url(url) => fetch_predictions(url, timeout).await,
        }
    }
}

impl Default for PredictionSource {
    fn default() -> Self {
        PredictionSource::Path(PathBuf::from(DEFAULT_DATA_SOURCE))
    }
}

/// Read and decode a prediction document from disk.
pub fn load_from_path(path: &Path) -> Result<LoadedPredictions> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_predictions(&contents)
}

/// Fetch a prediction document over HTTP. Non-2xx statuses are errors.
#[cfg(feature = "api")]
pub async fn fetch_predictions(url: &str, timeout: Duration) -> Result<LoadedPredictions> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    fetch_with_client(&client, url).await
}

#[cfg(feature = "api")]
pub async fn fetch_with_client(client: &reqwest::Client, url: &str) -> Result<LoadedPredictions> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(LoadError::BadStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    parse_predictions(&body)
}

#[cfg(not(feature = "api"))]
pub async fn fetch_predictions(url: &str, _timeout: Duration) -> Result<LoadedPredictions> {
    Err(LoadError::Unsupported(url.to_string()))
}

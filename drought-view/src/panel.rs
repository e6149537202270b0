//! Results panel for a single district prediction.

use crate::escape_html;
use drought_core::category::{color_for_label, SeverityThresholds};
use drought_data::Prediction;
use serde::Serialize;

/// Shown on every panel built from a synthesized prediction.
pub const SYNTHETIC_NOTICE: &str =
    "No prediction in the dataset for this selection; values are randomly generated for demonstration.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsPanel {
    pub state: String,
    pub district: Option<String>,
    pub period_label: String,
    pub severity: f64,
    /// The record's own label when present, otherwise derived from severity
    pub category: String,
    pub color: String,
    pub confidence: Option<f64>,
    pub rainfall_prediction: Option<f64>,
    pub temperature_avg: Option<f64>,
    pub ndvi: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub spi3: Option<f64>,
    pub spi6: Option<f64>,
    pub synthetic: bool,
    pub notice: Option<String>,
}

impl ResultsPanel {
    /// Build the panel. External labels are displayed verbatim.
    pub fn from_prediction(prediction: &Prediction, thresholds: &SeverityThresholds) -> Self {
        let record = prediction.record();
        let category = record
            .drought_category
            .clone()
            .unwrap_or_else(|| thresholds.classify(record.drought_severity).label().to_string());
        let synthetic = prediction.is_synthetic();
        ResultsPanel {
            state: record.state.clone(),
            district: record.district.clone(),
            period_label: record.period().label(),
            severity: record.drought_severity,
            color: color_for_label(&category).to_string(),
            category,
            confidence: record.confidence,
            rainfall_prediction: record.rainfall_prediction,
            temperature_avg: record.temperature_avg,
            ndvi: record.ndvi,
            soil_moisture: record.soil_moisture,
            spi3: record.spi3,
            spi6: record.spi6,
            synthetic,
            notice: synthetic.then(|| SYNTHETIC_NOTICE.to_string()),
        }
    }

    pub fn to_html(&self) -> String {
        let place = match &self.district {
            Some(district) => format!("{}, {}", escape_html(district), escape_html(&self.state)),
            None => escape_html(&self.state),
        };
        let mut html = format!(
            "<h3>{}</h3><p>{}</p><p>Severity: {:.2}</p><p style=\"color:{}\">{}</p>",
            place,
            self.period_label,
            self.severity,
            self.color,
            escape_html(&self.category)
        );
        if let Some(confidence) = self.confidence {
            html.push_str(&format!("<p>Confidence: {:.0}%</p>", confidence * 100.0));
        }
        if let Some(rainfall) = self.rainfall_prediction {
            html.push_str(&format!("<p>Rainfall: {:.1} mm</p>", rainfall));
        }
        if let Some(temperature) = self.temperature_avg {
            html.push_str(&format!("<p>Temperature: {:.1} &deg;C</p>", temperature));
        }
        let indicators = [
            ("NDVI", self.ndvi),
            ("Soil moisture", self.soil_moisture),
            ("SPI-3", self.spi3),
            ("SPI-6", self.spi6),
        ];
        for (name, value) in indicators {
            if let Some(value) = value {
                html.push_str(&format!("<p>{}: {:.2}</p>", name, value));
            }
        }
        if let Some(notice) = &self.notice {
            html.push_str(&format!("<p class=\"synthetic\">{}</p>", escape_html(notice)));
        }
        html
    }
}

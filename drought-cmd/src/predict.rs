//! Single district prediction lookup for the results panel.

use crate::context::Context;
use anyhow::bail;
use drought_data::{Prediction, PredictionQuery};
use drought_view::panel::ResultsPanel;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub state: String,
    pub district: String,
    pub month: u32,
    pub year: i32,
    pub seed: Option<u64>,
    pub allow_synthetic: bool,
}

#[derive(Debug, Serialize)]
pub struct PredictOutput {
    pub prediction: Option<Prediction>,
    pub panel: Option<ResultsPanel>,
    pub panel_html: Option<String>,
}

pub fn predict(ctx: &Context, request: &PredictRequest) -> anyhow::Result<PredictOutput> {
    let Some(query) = PredictionQuery::new(
        &request.state,
        &request.district,
        request.month,
        request.year,
    ) else {
        bail!("month must be between 1 and 12, got {}", request.month);
    };

    let mut rng = match request.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let synthesize_with = request.allow_synthetic.then_some(&mut rng);
    let prediction = ctx
        .dataset
        .resolve_prediction(&query, &ctx.config.thresholds, synthesize_with);

    let panel = prediction
        .as_ref()
        .map(|p| ResultsPanel::from_prediction(p, &ctx.config.thresholds));
    Ok(PredictOutput {
        panel_html: panel.as_ref().map(ResultsPanel::to_html),
        prediction,
        panel,
    })
}

//! Prediction models

/// Point forecast returned by the model service
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub asset_id: String,
    pub horizon_days: u32,
    pub predicted_value: f64,
}

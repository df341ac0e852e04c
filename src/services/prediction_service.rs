use tracing::{error, info};

use crate::api::ModelService;
use crate::models::PredictionResult;
use crate::services::history_service::HISTORY_DAYS;
use crate::utils::PipelineError;

/// Days covered by the training data; the model's day index runs from 0 here
pub const TRAINING_WINDOW_DAYS: u32 = HISTORY_DAYS;

/// Forecast horizon used by every selection cycle
pub const DEFAULT_HORIZON_DAYS: u32 = 1;

/// Shown when the service fails without an `error` message
pub const GENERIC_PREDICTION_FAILURE: &str = "Failed to fetch prediction.";

/// Request a point forecast `horizon_days` past the end of the training window.
pub async fn predict<S>(
    service: &S,
    asset_id: &str,
    horizon_days: u32,
) -> Result<PredictionResult, PipelineError>
where
    S: ModelService + ?Sized,
{
    let days_since = TRAINING_WINDOW_DAYS + horizon_days;

    match service.predict(asset_id, days_since).await {
        Ok(response) => {
            info!("Predicted price for {}: {}", asset_id, response.predicted_price);
            Ok(PredictionResult {
                asset_id: asset_id.to_string(),
                horizon_days,
                predicted_value: response.predicted_price,
            })
        }
        Err(e) => {
            error!("Error fetching prediction for {}: {}", asset_id, e);
            let message = e
                .service_message()
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_PREDICTION_FAILURE.to_string());
            Err(PipelineError::Prediction(message))
        }
    }
}

/// Display text for a forecast, with the value rounded to cents
pub fn format_prediction(result: &PredictionResult) -> String {
    let horizon = match result.horizon_days {
        1 => "next day".to_string(),
        n => format!("in {} days", n),
    };
    format!(
        "Predicted price for {} ({}): ${:.2}",
        result.asset_id, horizon, result.predicted_value
    )
}

/// The single text slot showing the latest forecast
#[derive(Debug, Default)]
pub struct PredictionPanel {
    current: Option<PredictionResult>,
    text: Option<String>,
}

impl PredictionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed forecast
    pub fn show(&mut self, result: PredictionResult) {
        let text = format_prediction(&result);
        println!("📈 {}", text);
        self.text = Some(text);
        self.current = Some(result);
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn current(&self) -> Option<&PredictionResult> {
        self.current.as_ref()
    }
}

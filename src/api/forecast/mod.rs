pub mod client;
pub mod models;

use async_trait::async_trait;

use super::ApiError;

pub use client::ForecastClient;
pub use models::{PredictResponse, TrainResponse};

/// Remote service that trains per-asset models and serves forecasts
#[async_trait]
pub trait ModelService: Send + Sync {
    /// POST /train
    async fn train(&self, cryptocurrency: &str) -> Result<TrainResponse, ApiError>;

    /// POST /predict
    async fn predict(&self, cryptocurrency: &str, days_since: u32) -> Result<PredictResponse, ApiError>;
}

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{PredictRequest, PredictResponse, TrainRequest, TrainResponse};
use super::ModelService;
use crate::api::error::{handle_error_response, ApiError};

/// Client for the training/prediction service
pub struct ForecastClient {
    http_client: HttpClient,
    base_url: String,
}

impl ForecastClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ModelService for ForecastClient {
    /// Resolves only once the service has finished (or failed) training.
    async fn train(&self, cryptocurrency: &str) -> Result<TrainResponse, ApiError> {
        let url = format!("{}/train", self.base_url);
        debug!("POST {} for {}", url, cryptocurrency);

        let response = self
            .http_client
            .post(&url)
            .json(&TrainRequest { cryptocurrency })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        // Any 2xx body counts as success, JSON or not
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str::<TrainResponse>(&body).unwrap_or_default())
    }

    async fn predict(&self, cryptocurrency: &str, days_since: u32) -> Result<PredictResponse, ApiError> {
        let url = format!("{}/predict", self.base_url);
        debug!("POST {} for {} (days_since={})", url, cryptocurrency, days_since);

        let response = self
            .http_client
            .post(&url)
            .json(&PredictRequest {
                cryptocurrency,
                days_since,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        response
            .json::<PredictResponse>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{CoinListEntry, MarketChart};
use super::MarketDataProvider;
use crate::api::error::{handle_error_response, ApiError};
use crate::utils::RateLimiter;

/// CoinGecko public API client
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
    limiter: RateLimiter,
}

impl CoinGeckoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    /// Create a client against `base_url`, paced to `requests_per_minute`
    pub fn new(base_url: impl Into<String>, requests_per_minute: usize) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(requests_per_minute, Duration::from_secs(60)),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.limiter.acquire().await;
        debug!("GET {} {:?}", url, query);

        let response = self.http_client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn list_coins(&self) -> Result<Vec<CoinListEntry>, ApiError> {
        let url = format!("{}/coins/list", self.base_url);
        self.get_json(&url, &[]).await
    }

    async fn market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, ApiError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        let query = [
            ("vs_currency", vs_currency.to_string()),
            ("days", days.to_string()),
        ];
        self.get_json(&url, &query).await
    }
}

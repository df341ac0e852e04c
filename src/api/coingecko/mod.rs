pub mod client;
pub mod models;

use async_trait::async_trait;

use super::ApiError;

pub use client::CoinGeckoClient;
pub use models::{CoinListEntry, MarketChart};

/// Read-only source of the asset catalog and price history
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// GET /coins/list
    async fn list_coins(&self) -> Result<Vec<CoinListEntry>, ApiError>;

    /// GET /coins/{id}/market_chart
    async fn market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, ApiError>;
}

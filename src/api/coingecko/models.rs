use serde::{Deserialize, Serialize};

/// One entry of the `/coins/list` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Response from the `/coins/{id}/market_chart` endpoint.
///
/// Only `prices` is used; `market_caps` and `total_volumes` are ignored.
/// Each entry is `[timestamp_millis, price]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Option<Vec<[f64; 2]>>,
}

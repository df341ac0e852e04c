//! HTTP clients for the price provider and the model service

pub mod coingecko;
pub mod error;
pub mod forecast;

pub use coingecko::{CoinGeckoClient, MarketDataProvider};
pub use error::ApiError;
pub use forecast::{ForecastClient, ModelService};

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::api::{CoinGeckoClient, ForecastClient};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub coingecko_base_url: String,
    pub forecast_service_url: String,
    pub chart_output_path: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub coingecko_requests_per_minute: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            coingecko_base_url: CoinGeckoClient::DEFAULT_BASE_URL.to_string(),
            forecast_service_url: ForecastClient::DEFAULT_BASE_URL.to_string(),
            chart_output_path: PathBuf::from("crypto_chart.png"),
            chart_width: 1024,
            chart_height: 576,
            coingecko_requests_per_minute: 30,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; missing or blank keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            coingecko_base_url: get("COINGECKO_BASE_URL").unwrap_or(defaults.coingecko_base_url),
            forecast_service_url: get("FORECAST_SERVICE_URL").unwrap_or(defaults.forecast_service_url),
            chart_output_path: get("CHART_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.chart_output_path),
            chart_width: parse_or(get("CHART_WIDTH"), "CHART_WIDTH", defaults.chart_width)?,
            chart_height: parse_or(get("CHART_HEIGHT"), "CHART_HEIGHT", defaults.chart_height)?,
            coingecko_requests_per_minute: parse_or(
                get("COINGECKO_REQUESTS_PER_MINUTE"),
                "COINGECKO_REQUESTS_PER_MINUTE",
                defaults.coingecko_requests_per_minute,
            )?,
        })
    }
}

fn parse_or<T: FromStr + PartialOrd + Default>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.parse::<T>() {
            Ok(parsed) if parsed > T::default() => Ok(parsed),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}

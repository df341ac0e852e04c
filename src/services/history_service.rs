use std::fmt;

use chrono::{Local, TimeZone};
use tracing::{debug, warn};

use crate::api::MarketDataProvider;
use crate::models::{PricePoint, Series};
use crate::utils::HistoryFailure;

/// Size of the history window, in days
pub const HISTORY_DAYS: u32 = 7;

/// Reference currency for every price
pub const VS_CURRENCY: &str = "usd";

/// Date label format for chart points (e.g. 11/14/2023)
const LABEL_FORMAT: &str = "%-m/%-d/%Y";

/// Fetch the most recent week of USD prices for `asset_id`.
///
/// An absent or empty `prices` array is `HistoryFailure::EmptyData`.
pub async fn fetch_history<P>(provider: &P, asset_id: &str) -> Result<Series, HistoryFailure>
where
    P: MarketDataProvider + ?Sized,
{
    let chart = provider
        .market_chart(asset_id, VS_CURRENCY, HISTORY_DAYS)
        .await
        .map_err(|e| {
            warn!("History request for {} failed: {}", asset_id, e);
            HistoryFailure::Transport(e.to_string())
        })?;

    let prices = match chart.prices {
        Some(prices) if !prices.is_empty() => prices,
        _ => {
            warn!("No historical data found for {}", asset_id);
            return Err(HistoryFailure::EmptyData);
        }
    };

    debug!("Fetched {} price points for {}", prices.len(), asset_id);
    Ok(to_series(&prices, &Local))
}

/// Map raw `[timestamp_millis, price]` pairs to chart points labelled with
/// their calendar date in `tz`.
///
/// Points are ordered by timestamp; ties keep their original order and
/// duplicate labels are kept.
pub fn to_series<Tz>(prices: &[[f64; 2]], tz: &Tz) -> Series
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut raw: Vec<[f64; 2]> = prices.to_vec();
    raw.sort_by(|a, b| a[0].total_cmp(&b[0]));

    raw.into_iter()
        .map(|[timestamp, price]| PricePoint {
            label: date_label(timestamp, tz),
            value: price,
        })
        .collect()
}

fn date_label<Tz>(timestamp_millis: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_millis as i64).single() {
        Some(dt) => dt.format(LABEL_FORMAT).to_string(),
        None => timestamp_millis.to_string(),
    }
}

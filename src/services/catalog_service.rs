use tracing::{error, info};

use crate::api::MarketDataProvider;
use crate::models::Asset;
use crate::utils::{PipelineError, Reporter};

/// The options a user can pick from, in provider order
#[derive(Debug, Default, Clone)]
pub struct SelectionControl {
    options: Vec<Asset>,
}

impl SelectionControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one option per asset, keeping the given order
    pub fn populate(&mut self, assets: impl IntoIterator<Item = Asset>) {
        self.options.extend(assets);
    }

    pub fn options(&self) -> &[Asset] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.options.iter().find(|a| a.id == id)
    }

    /// Case-insensitive match on id or display name
    pub fn search(&self, filter: &str) -> Vec<&Asset> {
        let needle = filter.to_lowercase();
        self.options
            .iter()
            .filter(|a| {
                needle.is_empty()
                    || a.id.to_lowercase().contains(&needle)
                    || a.display_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Fetch every known asset, unfiltered and in provider order
pub async fn load_catalog<P>(provider: &P) -> Result<Vec<Asset>, PipelineError>
where
    P: MarketDataProvider + ?Sized,
{
    let coins = provider
        .list_coins()
        .await
        .map_err(|e| PipelineError::CatalogLoad(e.to_string()))?;

    Ok(coins
        .into_iter()
        .map(|coin| Asset::new(coin.id, coin.name))
        .collect())
}

/// Load the catalog once and build the selection control from it.
///
/// A failure is reported and leaves the control empty; it is not retried.
pub async fn init_selection_control<P>(provider: &P, reporter: &dyn Reporter) -> SelectionControl
where
    P: MarketDataProvider + ?Sized,
{
    let mut control = SelectionControl::new();

    match load_catalog(provider).await {
        Ok(assets) => {
            info!("Loaded {} assets into the catalog", assets.len());
            control.populate(assets);
        }
        Err(e) => {
            error!("{}", e);
            reporter.report(&e);
        }
    }

    control
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::{coin, FakeMarket, RecordingReporter};
    use crate::utils::ErrorKind;

    #[tokio::test]
    async fn test_one_option_per_asset_in_provider_order() {
        let market = FakeMarket::new().with_coins(vec![
            coin("zcash", "Zcash"),
            coin("bitcoin", "Bitcoin"),
            coin("aave", "Aave"),
        ]);
        let reporter = RecordingReporter::default();

        let control = init_selection_control(&market, &reporter).await;

        let ids: Vec<&str> = control.options().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["zcash", "bitcoin", "aave"]);
        assert_eq!(control.get("bitcoin").unwrap().display_name, "Bitcoin");
        assert!(reporter.errors().is_empty());
        assert_eq!(market.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_not_filtered() {
        let market = FakeMarket::new().with_coins(vec![
            coin("wrapped-a", "Wrapped"),
            coin("wrapped-b", "Wrapped"),
        ]);

        let assets = load_catalog(&market).await.unwrap();
        assert_eq!(assets.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_reported_and_control_stays_empty() {
        let market = FakeMarket::new().with_coin_error(ApiError::from_status(503, "unavailable"));
        let reporter = RecordingReporter::default();

        let control = init_selection_control(&market, &reporter).await;

        assert!(control.is_empty());
        let errors = reporter.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, ErrorKind::CatalogLoad);
        assert!(errors[0].1.contains("503"));
        assert_eq!(market.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_catalog_failure() {
        let market = FakeMarket::new()
            .with_coin_error(ApiError::Deserialization("expected a sequence".to_string()));

        let err = load_catalog(&market).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CatalogLoad);
    }

    #[test]
    fn test_search_matches_id_or_name() {
        let mut control = SelectionControl::new();
        control.populate(vec![
            Asset::new("bitcoin", "Bitcoin"),
            Asset::new("bitcoin-cash", "Bitcoin Cash"),
            Asset::new("dogecoin", "Dogecoin"),
        ]);

        assert_eq!(control.search("CASH").len(), 1);
        assert_eq!(control.search("coin").len(), 3);
        assert_eq!(control.search("").len(), 3);
        assert!(control.search("solana").is_empty());
    }
}

use tracing::{debug, info};

use super::Session;
use crate::api::{MarketDataProvider, ModelService};

/// Start a cycle for `asset_id` if the selection control offers it
pub fn execute<M, S>(session: &mut Session<M, S>, asset_id: &str)
where
    M: MarketDataProvider + 'static,
    S: ModelService + 'static,
{
    if asset_id.is_empty() {
        debug!("Placeholder selection");
        return;
    }

    let asset = match session.selection.get(asset_id) {
        Some(asset) => asset,
        None => {
            eprintln!(
                "❌ Unknown asset '{}'. Use `list <filter>` to find an asset id.",
                asset_id
            );
            return;
        }
    };

    info!("Selected {} ({})", asset.display_name, asset.id);
    println!("⏳ Training model for {}...", asset.display_name);

    let handle = session.orchestrator.spawn_selection(asset.id.clone());
    session.track(handle);
}

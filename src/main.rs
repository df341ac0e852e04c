use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod testing;

use api::{CoinGeckoClient, ForecastClient};
use commands::{Flow, Session};
use services::catalog_service;
use services::chart_service::{ChartSurface, PlottersRenderer};
use services::selection_service::SelectionOrchestrator;
use utils::{ConsoleReporter, Reporter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("coin_forecast=debug".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting coin-forecast...");

    let settings = match config::Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };
    info!("Price API: {}", settings.coingecko_base_url);
    info!("Model service: {}", settings.forecast_service_url);
    info!("Chart output: {}", settings.chart_output_path.display());

    let market = Arc::new(CoinGeckoClient::new(
        settings.coingecko_base_url.clone(),
        settings.coingecko_requests_per_minute,
    ));
    let models = Arc::new(ForecastClient::new(settings.forecast_service_url.clone()));
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter);

    let chart = ChartSurface::new(Box::new(PlottersRenderer::new(
        settings.chart_output_path.clone(),
        settings.chart_width,
        settings.chart_height,
    )));
    let orchestrator = SelectionOrchestrator::new(Arc::clone(&market), models, chart, Arc::clone(&reporter));

    // The catalog is loaded once; a failure leaves the selection empty for this session
    info!("Loading asset catalog...");
    let selection = catalog_service::init_selection_control(market.as_ref(), reporter.as_ref()).await;
    println!("{} assets available.", selection.len());
    commands::help::execute();

    let mut session = Session::new(orchestrator, selection);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if session.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {
                // Input closed: let in-flight cycles finish before exiting
                session.wait_for_cycles().await;
                break;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    info!("Goodbye");
}

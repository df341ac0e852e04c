//! In-memory stand-ins for the HTTP clients, the chart renderer and the
//! reporter. Call logs are recorded before any gate is awaited, so a test can
//! tell that a request is in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::coingecko::{CoinListEntry, MarketChart};
use crate::api::forecast::{PredictResponse, TrainResponse};
use crate::api::{ApiError, MarketDataProvider, ModelService};
use crate::services::chart_service::{ChartError, ChartRenderer, LineChart};
use crate::utils::{ErrorKind, Reporter};

pub fn coin(id: &str, name: &str) -> CoinListEntry {
    CoinListEntry {
        id: id.to_string(),
        name: name.to_string(),
        symbol: None,
    }
}

/// Gates keyed by asset id. A gated call waits until `release` is called.
#[derive(Default)]
struct Gates(Mutex<HashMap<String, Arc<Notify>>>);

impl Gates {
    fn add(&self, id: &str) {
        self.0
            .lock()
            .unwrap()
            .insert(id.to_string(), Arc::new(Notify::new()));
    }

    fn release(&self, id: &str) {
        if let Some(gate) = self.0.lock().unwrap().get(id) {
            gate.notify_one();
        }
    }

    async fn wait(&self, id: &str) {
        let gate = self.0.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[derive(Default)]
pub struct FakeMarket {
    coins: Option<Result<Vec<CoinListEntry>, ApiError>>,
    charts: HashMap<String, Result<MarketChart, ApiError>>,
    list_calls: Mutex<usize>,
    chart_calls: Mutex<Vec<(String, String, u32)>>,
    gates: Gates,
}

impl FakeMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(mut self, coins: Vec<CoinListEntry>) -> Self {
        self.coins = Some(Ok(coins));
        self
    }

    pub fn with_coin_error(mut self, err: ApiError) -> Self {
        self.coins = Some(Err(err));
        self
    }

    pub fn with_chart(self, id: &str, prices: Vec<[f64; 2]>) -> Self {
        self.with_chart_body(id, MarketChart { prices: Some(prices) })
    }

    pub fn with_chart_body(mut self, id: &str, chart: MarketChart) -> Self {
        self.charts.insert(id.to_string(), Ok(chart));
        self
    }

    pub fn with_chart_error(mut self, id: &str, err: ApiError) -> Self {
        self.charts.insert(id.to_string(), Err(err));
        self
    }

    /// Hold history requests for `id` until `release_chart(id)`
    pub fn gate_chart(self, id: &str) -> Self {
        self.gates.add(id);
        self
    }

    pub fn release_chart(&self, id: &str) {
        self.gates.release(id);
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn chart_calls(&self) -> Vec<(String, String, u32)> {
        self.chart_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for FakeMarket {
    async fn list_coins(&self) -> Result<Vec<CoinListEntry>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        self.coins.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, ApiError> {
        self.chart_calls
            .lock()
            .unwrap()
            .push((coin_id.to_string(), vs_currency.to_string(), days));
        self.gates.wait(coin_id).await;

        self.charts
            .get(coin_id)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::from_status(404, r#"{"error":"coin not found"}"#)))
    }
}

/// Training succeeds unless told otherwise; predictions must be configured.
#[derive(Default)]
pub struct FakeModels {
    train_errors: HashMap<String, ApiError>,
    predictions: HashMap<String, Result<f64, ApiError>>,
    train_calls: Mutex<Vec<String>>,
    predict_calls: Mutex<Vec<(String, u32)>>,
    train_gates: Gates,
    predict_gates: Gates,
}

impl FakeModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_train_error(mut self, id: &str, err: ApiError) -> Self {
        self.train_errors.insert(id.to_string(), err);
        self
    }

    pub fn with_prediction(mut self, id: &str, price: f64) -> Self {
        self.predictions.insert(id.to_string(), Ok(price));
        self
    }

    pub fn with_prediction_error(mut self, id: &str, err: ApiError) -> Self {
        self.predictions.insert(id.to_string(), Err(err));
        self
    }

    pub fn gate_training(self, id: &str) -> Self {
        self.train_gates.add(id);
        self
    }

    pub fn release_training(&self, id: &str) {
        self.train_gates.release(id);
    }

    pub fn gate_prediction(self, id: &str) -> Self {
        self.predict_gates.add(id);
        self
    }

    pub fn release_prediction(&self, id: &str) {
        self.predict_gates.release(id);
    }

    pub fn train_calls(&self) -> Vec<String> {
        self.train_calls.lock().unwrap().clone()
    }

    pub fn predict_calls(&self) -> Vec<(String, u32)> {
        self.predict_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelService for FakeModels {
    async fn train(&self, cryptocurrency: &str) -> Result<TrainResponse, ApiError> {
        self.train_calls.lock().unwrap().push(cryptocurrency.to_string());
        self.train_gates.wait(cryptocurrency).await;

        match self.train_errors.get(cryptocurrency) {
            Some(err) => Err(err.clone()),
            None => Ok(TrainResponse {
                message: Some(format!("Model trained for {}.", cryptocurrency)),
            }),
        }
    }

    async fn predict(&self, cryptocurrency: &str, days_since: u32) -> Result<PredictResponse, ApiError> {
        self.predict_calls
            .lock()
            .unwrap()
            .push((cryptocurrency.to_string(), days_since));
        self.predict_gates.wait(cryptocurrency).await;

        match self.predictions.get(cryptocurrency) {
            Some(Ok(price)) => Ok(PredictResponse {
                predicted_price: *price,
            }),
            Some(Err(err)) => Err(err.clone()),
            None => Err(ApiError::from_status(
                400,
                &format!(r#"{{"error":"Model for {} not found."}}"#, cryptocurrency),
            )),
        }
    }
}

/// Keeps a copy of every frame it is asked to draw
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<LineChart>>>,
    fail: bool,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<LineChart> {
        self.frames.lock().unwrap().clone()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &LineChart) -> Result<(), ChartError> {
        if self.fail {
            return Err(ChartError::Drawing("no canvas".to_string()));
        }
        self.frames.lock().unwrap().push(chart.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    errors: Mutex<Vec<(ErrorKind, String)>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn errors(&self) -> Vec<(ErrorKind, String)> {
        self.errors.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report_error(&self, kind: ErrorKind, message: &str) {
        self.errors.lock().unwrap().push((kind, message.to_string()));
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

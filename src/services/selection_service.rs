use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{MarketDataProvider, ModelService};
use crate::services::chart_service::ChartSurface;
use crate::services::prediction_service::{PredictionPanel, DEFAULT_HORIZON_DAYS};
use crate::services::{history_service, prediction_service, training_service};
use crate::utils::{PipelineError, Reporter};

/// Where the most recent cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Training,
    FetchingResults,
}

/// What happened to one post-training step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The result was written to the display
    Applied,
    /// The step failed and the failure was reported
    Failed,
    /// A newer cycle had started; the result was dropped
    Stale,
}

/// Result of handling one selection-change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Empty selection, nothing was done
    Ignored,
    TrainingFailed {
        token: u64,
        message: String,
    },
    Completed {
        token: u64,
        history: StepOutcome,
        prediction: StepOutcome,
    },
}

/// Drives train → {history, prediction} → display for every selection.
///
/// Every cycle gets a token from a monotonically increasing counter. Results
/// are written to the chart or the prediction panel only while their token
/// is still the latest one, so a slow earlier cycle cannot overwrite a later
/// one. Failures are always reported.
pub struct SelectionOrchestrator<M, S> {
    market: Arc<M>,
    models: Arc<S>,
    reporter: Arc<dyn Reporter>,
    chart: Arc<Mutex<ChartSurface>>,
    prediction: Arc<Mutex<PredictionPanel>>,
    latest_cycle: Arc<AtomicU64>,
    phase: Arc<StdMutex<CyclePhase>>,
    horizon_days: u32,
}

impl<M, S> Clone for SelectionOrchestrator<M, S> {
    fn clone(&self) -> Self {
        Self {
            market: Arc::clone(&self.market),
            models: Arc::clone(&self.models),
            reporter: Arc::clone(&self.reporter),
            chart: Arc::clone(&self.chart),
            prediction: Arc::clone(&self.prediction),
            latest_cycle: Arc::clone(&self.latest_cycle),
            phase: Arc::clone(&self.phase),
            horizon_days: self.horizon_days,
        }
    }
}

impl<M, S> SelectionOrchestrator<M, S>
where
    M: MarketDataProvider + 'static,
    S: ModelService + 'static,
{
    pub fn new(market: Arc<M>, models: Arc<S>, chart: ChartSurface, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            market,
            models,
            reporter,
            chart: Arc::new(Mutex::new(chart)),
            prediction: Arc::new(Mutex::new(PredictionPanel::new())),
            latest_cycle: Arc::new(AtomicU64::new(0)),
            phase: Arc::new(StdMutex::new(CyclePhase::Idle)),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Run a cycle on its own task. Earlier cycles keep running.
    pub fn spawn_selection(&self, selection: String) -> JoinHandle<CycleOutcome> {
        let orchestrator = self.clone();
        tokio::spawn(async move { orchestrator.handle_selection(&selection).await })
    }

    /// Handle one selection-change event from start to finish
    pub async fn handle_selection(&self, selection: &str) -> CycleOutcome {
        let asset_id = selection.trim();
        if asset_id.is_empty() {
            debug!("Empty selection ignored");
            return CycleOutcome::Ignored;
        }

        let token = self.latest_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Cycle {} started for {}", token, asset_id);
        self.set_phase(token, CyclePhase::Training);

        if let Err(err) = training_service::train(self.models.as_ref(), asset_id).await {
            self.reporter.report(&err);
            self.set_phase(token, CyclePhase::Idle);
            return CycleOutcome::TrainingFailed {
                token,
                message: err.message(),
            };
        }

        self.reporter.notify(&format!("Model trained for {}.", asset_id));
        self.set_phase(token, CyclePhase::FetchingResults);

        let (history, prediction) = tokio::join!(
            self.run_history(token, asset_id),
            self.run_prediction(token, asset_id),
        );

        self.set_phase(token, CyclePhase::Idle);
        info!(
            "Cycle {} finished for {} (history: {:?}, prediction: {:?})",
            token, asset_id, history, prediction
        );

        CycleOutcome::Completed {
            token,
            history,
            prediction,
        }
    }

    async fn run_history(&self, token: u64, asset_id: &str) -> StepOutcome {
        match history_service::fetch_history(self.market.as_ref(), asset_id).await {
            Ok(series) => {
                let mut chart = self.chart.lock().await;
                if !self.is_current(token) {
                    debug!("Discarding stale history for {} (cycle {})", asset_id, token);
                    return StepOutcome::Stale;
                }
                chart.update(&series);
                StepOutcome::Applied
            }
            Err(reason) => {
                self.reporter.report(&PipelineError::History(reason));
                StepOutcome::Failed
            }
        }
    }

    async fn run_prediction(&self, token: u64, asset_id: &str) -> StepOutcome {
        match prediction_service::predict(self.models.as_ref(), asset_id, self.horizon_days).await {
            Ok(result) => {
                let mut panel = self.prediction.lock().await;
                if !self.is_current(token) {
                    debug!("Discarding stale prediction for {} (cycle {})", asset_id, token);
                    return StepOutcome::Stale;
                }
                panel.show(result);
                StepOutcome::Applied
            }
            Err(err) => {
                self.reporter.report(&err);
                StepOutcome::Failed
            }
        }
    }
}

impl<M, S> SelectionOrchestrator<M, S> {
    fn is_current(&self, token: u64) -> bool {
        self.latest_cycle.load(Ordering::SeqCst) == token
    }

    fn set_phase(&self, token: u64, phase: CyclePhase) {
        if !self.is_current(token) {
            return;
        }
        let mut current = self.phase.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        debug!("Cycle {}: {:?} -> {:?}", token, *current, phase);
        *current = phase;
    }

    /// Phase of the most recent cycle
    pub fn phase(&self) -> CyclePhase {
        *self.phase.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Token of the most recently started cycle (0 before the first one)
    pub fn latest_cycle(&self) -> u64 {
        self.latest_cycle.load(Ordering::SeqCst)
    }

    pub fn chart(&self) -> Arc<Mutex<ChartSurface>> {
        Arc::clone(&self.chart)
    }

    pub fn prediction_panel(&self) -> Arc<Mutex<PredictionPanel>> {
        Arc::clone(&self.prediction)
    }
}

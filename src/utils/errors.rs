use std::fmt;

use thiserror::Error;

/// Why a history fetch produced nothing to chart
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryFailure {
    #[error("{0}")]
    Transport(String),
    #[error("No historical data found")]
    EmptyData,
}

/// Failures surfaced to the user, one per pipeline component
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Error fetching cryptocurrency list: {0}")]
    CatalogLoad(String),
    #[error("Error training model: {0}")]
    Training(String),
    #[error("Error fetching historical data: {0}")]
    History(HistoryFailure),
    #[error("Error fetching prediction: {0}")]
    Prediction(String),
}

/// The kind half of a user-facing report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CatalogLoad,
    Training,
    History,
    Prediction,
}

impl ErrorKind {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::CatalogLoad => "Error fetching cryptocurrency list",
            ErrorKind::Training => "Error training model",
            ErrorKind::History => "Error fetching historical data",
            ErrorKind::Prediction => "Error fetching prediction",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::CatalogLoad(_) => ErrorKind::CatalogLoad,
            PipelineError::Training(_) => ErrorKind::Training,
            PipelineError::History(_) => ErrorKind::History,
            PipelineError::Prediction(_) => ErrorKind::Prediction,
        }
    }

    /// The message without the kind prefix, as shown to the user
    pub fn message(&self) -> String {
        match self {
            PipelineError::CatalogLoad(msg)
            | PipelineError::Training(msg)
            | PipelineError::Prediction(msg) => msg.clone(),
            PipelineError::History(reason) => reason.to_string(),
        }
    }
}

//! Data models shared by the services and commands
//!
//! Each model is a plain value produced by one pipeline step and consumed by
//! the next one (or by the terminal surface).

pub mod asset;
pub mod chart;
pub mod prediction;

// Re-export commonly used types for convenience
pub use asset::Asset;
pub use chart::{PricePoint, Series};
pub use prediction::PredictionResult;

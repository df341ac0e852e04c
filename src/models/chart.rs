//! Chart models

/// A single data point on a price chart
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// Calendar date derived from the provider timestamp
    pub label: String,
    pub value: f64,
}

/// Price points in ascending source-time order. Labels may repeat.
pub type Series = Vec<PricePoint>;

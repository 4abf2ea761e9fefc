use serde::{Deserialize, Serialize};

/// Constants mapping raw price and distance onto the 0–100 goodness scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Price that still earns a full budget score.
    pub baseline_price: f64,
    /// Currency units per budget point lost above the baseline.
    pub price_scale: f64,
    /// Commute points lost per mile.
    pub distance_penalty_per_mile: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            baseline_price: 800.0,
            price_scale: 10.0,
            distance_penalty_per_mile: 10.0,
        }
    }
}

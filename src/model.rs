use std::time::Instant;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_MIN_ABS_CHANGE_PCT, DEFAULT_MIN_VOLATILITY_PCT, DEFAULT_MIN_VOLUME_MILLIONS,
};

/// One asset row as the provider reports it. The change and 24h-bound fields
/// are genuinely optional upstream (newly listed assets), so they deserialize
/// as `None` rather than defaulting to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAssetRecord {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    #[serde(default, rename = "price_change_percentage_1h_in_currency")]
    pub price_change_pct_1h: Option<f64>,
    #[serde(default, rename = "price_change_percentage_24h_in_currency")]
    pub price_change_pct_24h: Option<f64>,
    pub total_volume: f64,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
}

/// A raw record plus the derived metrics. Created once per fetch and never
/// mutated; the next fetch replaces the whole batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedAssetRecord {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub price_change_pct_1h: Option<f64>,
    pub price_change_pct_24h: Option<f64>,
    pub total_volume: f64,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub volume_millions: f64,
    /// `None` when the price is zero or the 24h bounds are missing.
    pub volatility_pct: Option<f64>,
}

/// One fetched-and-derived batch, in provider order (volume descending).
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<DerivedAssetRecord>,
    pub fetched_at: Instant,
}

/// User-adjustable thresholds. All three predicates are strict inequalities
/// combined with AND.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub min_volume_millions: f64,
    pub min_abs_change_pct_24h: f64,
    pub min_volatility_pct: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_volume_millions: DEFAULT_MIN_VOLUME_MILLIONS,
            min_abs_change_pct_24h: DEFAULT_MIN_ABS_CHANGE_PCT,
            min_volatility_pct: DEFAULT_MIN_VOLATILITY_PCT,
        }
    }
}

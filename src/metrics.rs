//! Derives the scanner's two metrics from raw provider rows: intraday
//! volatility (24h range as a percentage of the current price) and volume in
//! millions of the quote currency.

use serde_json::json;

use crate::logging;
use crate::model::{DerivedAssetRecord, RawAssetRecord};

/// Derive metrics for a whole batch, preserving order and cardinality. A row
/// the metrics cannot be computed for keeps its place with an undefined
/// volatility instead of being dropped.
pub fn derive_records(raw: Vec<RawAssetRecord>) -> Vec<DerivedAssetRecord> {
    raw.into_iter().map(derive_record).collect()
}

fn derive_record(raw: RawAssetRecord) -> DerivedAssetRecord {
    let volatility_pct = match (raw.high_24h, raw.low_24h) {
        (Some(high), Some(low)) if raw.current_price != 0.0 => {
            Some((high - low) / raw.current_price * 100.0)
        }
        (Some(_), Some(_)) => {
            logging::warn(
                "derive.anomaly",
                "zero price reported, volatility undefined",
                json!({ "symbol": raw.symbol }),
            );
            None
        }
        _ => {
            logging::warn(
                "derive.anomaly",
                "24h bounds missing, volatility undefined",
                json!({ "symbol": raw.symbol }),
            );
            None
        }
    };

    DerivedAssetRecord {
        volume_millions: raw.total_volume / 1e6,
        volatility_pct,
        symbol: raw.symbol,
        name: raw.name,
        current_price: raw.current_price,
        price_change_pct_1h: raw.price_change_pct_1h,
        price_change_pct_24h: raw.price_change_pct_24h,
        total_volume: raw.total_volume,
        high_24h: raw.high_24h,
        low_24h: raw.low_24h,
    }
}

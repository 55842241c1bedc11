//! The scan and watch commands: glue from cache to table.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tokio::signal;
use tokio::time::{self, MissedTickBehavior};

use crate::cache::{SnapshotCache, SystemClock};
use crate::coingecko::CoinGeckoClient;
use crate::constants::{
    DEFAULT_MIN_ABS_CHANGE_PCT, DEFAULT_MIN_VOLATILITY_PCT, DEFAULT_MIN_VOLUME_MILLIONS, TOP_N,
    WATCH_INTERVAL_SECS,
};
use crate::logging;
use crate::model::FilterCriteria;
use crate::{filter, rank, table};

#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    /// Minimum 24h volume in millions of USD
    #[arg(long, default_value_t = DEFAULT_MIN_VOLUME_MILLIONS)]
    pub min_volume: f64,

    /// Minimum absolute 24h price change in percent
    #[arg(long, default_value_t = DEFAULT_MIN_ABS_CHANGE_PCT)]
    pub min_change: f64,

    /// Minimum volatility in percent
    #[arg(long, default_value_t = DEFAULT_MIN_VOLATILITY_PCT)]
    pub min_volatility: f64,

    /// Number of assets to display
    #[arg(long, default_value_t = TOP_N)]
    pub top: usize,

    /// Discard any cached snapshot and fetch fresh data first
    #[arg(long)]
    pub refresh: bool,
}

impl ScanArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_volume_millions: self.min_volume,
            min_abs_change_pct_24h: self.min_change,
            min_volatility_pct: self.min_volatility,
        }
    }
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            min_volume: DEFAULT_MIN_VOLUME_MILLIONS,
            min_change: DEFAULT_MIN_ABS_CHANGE_PCT,
            min_volatility: DEFAULT_MIN_VOLATILITY_PCT,
            top: TOP_N,
            refresh: false,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Seconds between re-renders; refetches only when the snapshot expires
    #[arg(short, long, default_value_t = WATCH_INTERVAL_SECS)]
    pub interval_secs: u64,
}

pub async fn run(args: ScanArgs) -> Result<()> {
    let mut cache = SnapshotCache::new(CoinGeckoClient::new()?, SystemClock);
    if args.refresh {
        cache.invalidate();
    }

    let snapshot = cache.get().await?;
    let ranked = rank::rank(filter::apply(snapshot, &args.criteria()), args.top);
    println!("{}", table::render(&ranked));
    Ok(())
}

pub async fn watch(args: WatchArgs) -> Result<()> {
    let mut cache = SnapshotCache::new(CoinGeckoClient::new()?, SystemClock);
    if args.scan.refresh {
        cache.invalidate();
    }
    let criteria = args.scan.criteria();

    let mut ticker = time::interval(Duration::from_secs(args.interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match cache.get().await {
                    Ok(snapshot) => {
                        let total = snapshot.records.len();
                        let ranked =
                            rank::rank(filter::apply(snapshot, &criteria), args.scan.top);
                        logging::info(
                            "watch.render",
                            "rendering ranked snapshot",
                            json!({
                                "cache_state": cache.state().to_string(),
                                "snapshot_records": total,
                                "matches": ranked.len(),
                            }),
                        );
                        println!("{}", table::render(&ranked));
                    }
                    Err(err) => {
                        logging::error(
                            "fetch.error",
                            "market snapshot unavailable",
                            json!({ "error": format!("{err:#}") }),
                        );
                    }
                }
            }
            _ = signal::ctrl_c() => {
                logging::info_simple("watch.stop", "interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}

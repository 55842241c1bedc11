//! Time-bounded memoization of the fetch + derive step.
//!
//! Filter and rank run on every user interaction; fetching does not. The cache
//! holds the most recent derived [`Snapshot`] for a validity window and only
//! goes back to the provider when that window has lapsed or the user asked for
//! a forced refresh. The clock is injected so expiry is testable without real
//! delays.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde_json::json;

use crate::constants::CACHE_TTL_SECS;
use crate::logging;
use crate::metrics;
use crate::model::{RawAssetRecord, Snapshot};

/// Seam to the market-data provider. The real implementation lives in
/// [`crate::coingecko`]; tests substitute a scripted stub.
pub trait MarketDataSource {
    fn fetch(&mut self) -> impl Future<Output = Result<Vec<RawAssetRecord>>> + Send;
}

/// Injected time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No snapshot has ever been fetched.
    Empty,
    /// The held snapshot is within the validity window.
    Valid,
    /// A snapshot is held but aged out or explicitly invalidated.
    Stale,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CacheState::Empty => "empty",
            CacheState::Valid => "valid",
            CacheState::Stale => "stale",
        };
        f.write_str(label)
    }
}

pub struct SnapshotCache<S, C> {
    source: S,
    clock: C,
    ttl: Duration,
    snapshot: Option<Snapshot>,
    invalidated: bool,
}

impl<S: MarketDataSource, C: Clock> SnapshotCache<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self::with_ttl(source, clock, Duration::from_secs(CACHE_TTL_SECS))
    }

    pub fn with_ttl(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            snapshot: None,
            invalidated: false,
        }
    }

    pub fn state(&self) -> CacheState {
        match &self.snapshot {
            None => CacheState::Empty,
            Some(_) if self.invalidated => CacheState::Stale,
            Some(snapshot)
                if self.clock.now().duration_since(snapshot.fetched_at) > self.ttl =>
            {
                CacheState::Stale
            }
            Some(_) => CacheState::Valid,
        }
    }

    /// Manual eviction: the next [`SnapshotCache::get`] refetches regardless
    /// of the snapshot's age.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Returns a snapshot no older than the validity window when the provider
    /// cooperates. A failed refetch falls back to the last known snapshot with
    /// a warning; only with nothing to fall back on does the error surface.
    pub async fn get(&mut self) -> Result<&Snapshot> {
        match self.state() {
            CacheState::Valid => {
                logging::info_simple("cache.hit", "serving cached snapshot");
            }
            CacheState::Empty => {
                self.refresh().await?;
            }
            CacheState::Stale => {
                if let Err(err) = self.refresh().await {
                    logging::warn(
                        "cache.degraded",
                        "refetch failed, serving last known snapshot",
                        json!({ "error": format!("{err:#}") }),
                    );
                }
            }
        }

        self.snapshot
            .as_ref()
            .context("no market snapshot available")
    }

    async fn refresh(&mut self) -> Result<()> {
        let raw = self.source.fetch().await?;
        let records = metrics::derive_records(raw);
        logging::info(
            "cache.refresh",
            "stored fresh market snapshot",
            json!({ "records": records.len() }),
        );
        self.snapshot = Some(Snapshot {
            records,
            fetched_at: self.clock.now(),
        });
        self.invalidated = false;
        Ok(())
    }
}

pub mod testkit {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use anyhow::{anyhow, Result};

    use super::{Clock, MarketDataSource};
    use crate::model::{RawAssetRecord, Snapshot};

    /// Deterministic clock that only moves when told to.
    #[derive(Clone)]
    pub struct ManualClock {
        base: Instant,
        offset: Arc<Mutex<Duration>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Arc::new(Mutex::new(Duration::ZERO)),
            }
        }

        pub fn advance(&self, delta: Duration) {
            let mut offset = self.offset.lock().expect("clock lock poisoned");
            *offset += delta;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock().expect("clock lock poisoned")
        }
    }

    /// Scripted provider: hands out queued responses and counts fetches.
    pub struct StubSource {
        responses: VecDeque<Result<Vec<RawAssetRecord>, String>>,
        fetches: Arc<AtomicUsize>,
    }

    impl StubSource {
        pub fn new() -> Self {
            Self {
                responses: VecDeque::new(),
                fetches: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn push_ok(&mut self, records: Vec<RawAssetRecord>) {
            self.responses.push_back(Ok(records));
        }

        pub fn push_err(&mut self, message: &str) {
            self.responses.push_back(Err(message.to_string()));
        }

        /// Shared fetch counter, readable after the cache takes ownership.
        pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.fetches)
        }
    }

    impl Default for StubSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MarketDataSource for StubSource {
        async fn fetch(&mut self) -> Result<Vec<RawAssetRecord>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.responses.pop_front() {
                Some(Ok(records)) => Ok(records),
                Some(Err(message)) => Err(anyhow!(message)),
                None => Err(anyhow!("stub source exhausted")),
            }
        }
    }

    pub fn sample_record(
        symbol: &str,
        current_price: f64,
        low_24h: f64,
        high_24h: f64,
        total_volume: f64,
        price_change_pct_24h: Option<f64>,
    ) -> RawAssetRecord {
        RawAssetRecord {
            symbol: symbol.to_string(),
            name: symbol.to_uppercase(),
            current_price,
            price_change_pct_1h: price_change_pct_24h.map(|change| change / 4.0),
            price_change_pct_24h,
            total_volume,
            high_24h: Some(high_24h),
            low_24h: Some(low_24h),
        }
    }

    pub fn sample_snapshot(raw: Vec<RawAssetRecord>) -> Snapshot {
        crate::logging::set_silent(true);
        Snapshot {
            records: crate::metrics::derive_records(raw),
            fetched_at: Instant::now(),
        }
    }
}

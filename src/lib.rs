//! Crypto intraday volatility scanner.
//!
//! A single-pass fetch → derive → filter → rank → display pipeline over a
//! snapshot of the top-100 crypto assets by volume. A time-bounded cache sits
//! between fetch and consumption so threshold adjustments never re-trigger
//! network I/O.

pub mod cache;
pub mod chart;
pub mod cli;
pub mod coingecko;
pub mod constants;
pub mod filter;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod rank;
pub mod scan;
pub mod table;

//! REST client for the CoinGecko markets endpoint.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::json;

use crate::cache::MarketDataSource;
use crate::constants::{HTTP_TIMEOUT_SECS, MARKETS_ENDPOINT, SNAPSHOT_SIZE, VS_CURRENCY};
use crate::logging;
use crate::model::RawAssetRecord;

#[derive(Serialize)]
struct MarketsQuery<'a> {
    vs_currency: &'a str,
    order: &'a str,
    per_page: u32,
    page: u32,
    sparkline: bool,
    price_change_percentage: &'a str,
}

impl Default for MarketsQuery<'_> {
    fn default() -> Self {
        Self {
            vs_currency: VS_CURRENCY,
            order: "volume_desc",
            per_page: SNAPSHOT_SIZE,
            page: 1,
            sparkline: false,
            price_change_percentage: "1h,24h",
        }
    }
}

pub struct CoinGeckoClient {
    http: reqwest::Client,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("crypto-scanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http })
    }
}

impl MarketDataSource for CoinGeckoClient {
    /// One bounded request for the top assets by volume. Network failures,
    /// non-success statuses, and unparseable bodies all come back as errors
    /// for the cache boundary to absorb.
    async fn fetch(&mut self) -> Result<Vec<RawAssetRecord>> {
        logging::info(
            "fetch.start",
            "requesting market snapshot",
            json!({ "endpoint": MARKETS_ENDPOINT }),
        );

        let response = self
            .http
            .get(MARKETS_ENDPOINT)
            .query(&MarketsQuery::default())
            .send()
            .await
            .context("market data request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("market data provider returned {status}");
        }

        let records: Vec<RawAssetRecord> = response
            .json()
            .await
            .context("malformed market data response")?;
        if records.is_empty() {
            bail!("market data provider returned an empty snapshot");
        }

        logging::info(
            "fetch.ok",
            "market snapshot received",
            json!({ "records": records.len() }),
        );
        Ok(records)
    }
}

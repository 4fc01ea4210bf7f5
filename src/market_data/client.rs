// =============================================================================
// Market Data Client — time series, asset list and backtest report providers
// =============================================================================
//
// Thin async wrapper over the backend HTTP API:
//
//   GET {base}/time_series_{interval}/{symbol}            -> [{time, value}]
//   GET {base}/list_assets                                -> {assets: {sym: name}}
//   GET {base}/backtest/{strategy}/{symbol}?start_date&end_date&short&long&commission
//                                                         -> HTML document
//
// Non-2xx statuses are errors carrying the status and body.  Callers decide
// whether to swallow them; this client never retries.
// =============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Months, NaiveDate, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::{Interval, PricePoint};

/// Response body of `GET /list_assets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub assets: BTreeMap<String, String>,
}

/// One autocomplete entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetEntry {
    pub symbol: String,
    pub name: String,
}

impl AssetList {
    /// Entries whose symbol or display name contains `query`
    /// (case-insensitive).  An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<AssetEntry> {
        let needle = query.trim().to_lowercase();
        self.assets
            .iter()
            .filter(|(symbol, name)| {
                needle.is_empty()
                    || symbol.to_lowercase().contains(&needle)
                    || name.to_lowercase().contains(&needle)
            })
            .map(|(symbol, name)| AssetEntry {
                symbol: symbol.clone(),
                name: name.clone(),
            })
            .collect()
    }
}

// =============================================================================
// Backtest parameters
// =============================================================================

/// Query parameters forwarded to the backtest report provider.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Short moving-average window, in bars.
    pub short: u32,
    /// Long moving-average window, in bars.
    pub long: u32,
    pub commission: f64,
}

impl Default for BacktestParams {
    /// Last ten years up to today, 10/25 crossover, 0.2% commission.
    fn default() -> Self {
        let end_date = Utc::now().date_naive();
        let start_date = end_date
            .checked_sub_months(Months::new(120))
            .unwrap_or(end_date);
        Self {
            start_date,
            end_date,
            short: 10,
            long: 25,
            commission: 0.002,
        }
    }
}

impl BacktestParams {
    /// Sanitise user input: a non-finite or > 1 commission becomes 0 and an
    /// inverted range ends at its start.
    pub fn normalized(mut self) -> Self {
        if !self.commission.is_finite() || self.commission > 1.0 {
            self.commission = 0.0;
        }
        if self.end_date < self.start_date {
            self.end_date = self.start_date;
        }
        self
    }

    fn query_pairs(&self) -> [(&'static str, String); 5] {
        [
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            ("short", self.short.to_string()),
            ("long", self.long.to_string()),
            ("commission", self.commission.to_string()),
        ]
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the market data backend.
#[derive(Clone)]
pub struct MarketDataClient {
    base_url: Url,
    client: reqwest::Client,
}

impl MarketDataClient {
    /// Create a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid backend URL {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("backend URL {base_url} cannot carry a path");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        debug!(base_url = %base_url, "MarketDataClient initialised");

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` with `segments` appended as escaped path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("backend URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn series_url(&self, interval: Interval, symbol: &str) -> Result<Url> {
        self.endpoint(&[&interval.path_segment(), symbol])
    }

    // -------------------------------------------------------------------------
    // Time series
    // -------------------------------------------------------------------------

    /// GET /time_series_{interval}/{symbol}.
    #[instrument(skip(self), name = "market_data::fetch_series")]
    pub async fn fetch_series(&self, interval: Interval, symbol: &str) -> Result<Vec<PricePoint>> {
        let url = self.series_url(interval, symbol)?;

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GET {url} returned {status}: {body}");
        }

        let series: Vec<PricePoint> = resp
            .json()
            .await
            .with_context(|| format!("failed to parse time series from {url}"))?;

        debug!(symbol, %interval, points = series.len(), "time series retrieved");
        Ok(series)
    }

    // -------------------------------------------------------------------------
    // Asset list
    // -------------------------------------------------------------------------

    /// GET /list_assets.
    #[instrument(skip(self), name = "market_data::list_assets")]
    pub async fn list_assets(&self) -> Result<AssetList> {
        let url = self.endpoint(&["list_assets"])?;

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url} request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GET {url} returned {status}: {body}");
        }

        let list: AssetList = resp
            .json()
            .await
            .with_context(|| format!("failed to parse asset list from {url}"))?;

        debug!(count = list.assets.len(), "asset list retrieved");
        Ok(list)
    }

    // -------------------------------------------------------------------------
    // Backtest report
    // -------------------------------------------------------------------------

    /// GET /backtest/{strategy}/{symbol}, returning the raw HTML report.
    #[instrument(skip(self, params), name = "market_data::backtest_report")]
    pub async fn fetch_backtest_report(
        &self,
        strategy: &str,
        symbol: &str,
        params: &BacktestParams,
    ) -> Result<String> {
        let url = self.endpoint(&["backtest", strategy, symbol])?;

        let resp = self
            .client
            .get(url.clone())
            .query(&params.query_pairs())
            .send()
            .await
            .with_context(|| format!("GET {url} request failed"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("failed to read backtest report from {url}"))?;

        if !status.is_success() {
            anyhow::bail!("GET {url} returned {status}: {body}");
        }

        debug!(strategy, symbol, bytes = body.len(), "backtest report retrieved");
        Ok(body)
    }
}

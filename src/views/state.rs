// =============================================================================
// View State — per-view selection with a most-recent-request-wins guard
// =============================================================================
//
// Every view owns one `ViewHandle`.  A selection change takes a fresh
// generation from an atomic counter and stamps it into the state before the
// fetch starts.  When the fetch resolves, its result is applied only if the
// state still carries that generation; anything older is dropped.  The lock
// is never held across the network call.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::market_data::MarketDataClient;
use crate::types::{sort_series, Interval, PricePoint};
use crate::views::catalog::{IndicatorView, RenderOptions};
use crate::views::chart::ChartSeries;

/// Current selection and the series derived from it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub symbol: Option<String>,
    pub interval: Interval,
    pub options: RenderOptions,
    /// Generation of the selection this state belongs to.
    pub generation: u64,
    pub loading: bool,
    /// Rendered chart series; the first is always the sorted `price` line.
    pub series: Vec<ChartSeries>,
    pub last_error: Option<String>,
    pub updated_at: Option<String>,
}

/// What happened to a fetch result handed to [`ViewHandle::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Applied as an empty series because the fetch failed.
    Failed(String),
    /// A newer selection superseded this one; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub view: IndicatorView,
    #[serde(flatten)]
    pub state: ViewState,
}

pub struct ViewHandle {
    view: IndicatorView,
    state: RwLock<ViewState>,
    next_generation: AtomicU64,
}

impl ViewHandle {
    pub fn new(view: IndicatorView) -> Self {
        Self {
            view,
            state: RwLock::new(ViewState::default()),
            next_generation: AtomicU64::new(0),
        }
    }

    pub fn view(&self) -> IndicatorView {
        self.view
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            view: self.view,
            state: self.state.read().clone(),
        }
    }

    /// Record a new selection and return its generation.  The previous
    /// series is cleared so it is never shown under the new symbol.
    pub fn begin(&self, symbol: &str, interval: Interval, options: RenderOptions) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut state = self.state.write();
        state.symbol = Some(symbol.to_string());
        state.interval = interval;
        state.options = options;
        state.generation = generation;
        state.loading = true;
        state.series.clear();
        state.last_error = None;

        debug!(view = %self.view, symbol, %interval, generation, "selection started");
        generation
    }

    /// Apply a fetch result if `generation` is still current.
    pub fn complete(&self, generation: u64, result: Result<Vec<PricePoint>>) -> Completion {
        let mut state = self.state.write();
        if state.generation != generation {
            debug!(
                view = %self.view,
                generation,
                current = state.generation,
                "stale response discarded"
            );
            return Completion::Stale;
        }

        let options = state.options;
        let completion = match result {
            Ok(mut series) => {
                sort_series(&mut series);
                state.series = self.view.render(&series, &options);
                info!(
                    view = %self.view,
                    symbol = state.symbol.as_deref().unwrap_or(""),
                    points = series.len(),
                    "view updated"
                );
                state.last_error = None;
                Completion::Applied
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!(
                    view = %self.view,
                    symbol = state.symbol.as_deref().unwrap_or(""),
                    error = %message,
                    "fetch failed, view left empty"
                );
                state.series = self.view.render(&[], &options);
                state.last_error = Some(message.clone());
                Completion::Failed(message)
            }
        };

        state.loading = false;
        state.updated_at = Some(Utc::now().to_rfc3339());
        completion
    }

    /// Select `symbol`/`interval`, fetch it and apply the result under the
    /// generation guard.
    pub async fn select(
        &self,
        client: &MarketDataClient,
        symbol: &str,
        interval: Interval,
        options: RenderOptions,
    ) -> Completion {
        let generation = self.begin(symbol, interval, options);
        let result = client.fetch_series(interval, symbol).await;
        self.complete(generation, result)
    }
}

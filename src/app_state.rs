// =============================================================================
// Central Application State — Indicator Builder
// =============================================================================
//
// Ties together the configuration, the market data client and one view
// handle per indicator view.  Shared across axum handlers via
// `Arc<AppState>`.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for mutable shared collections.
//   - Each `ViewHandle` manages its own interior mutability and generation.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::AppConfig;
use crate::market_data::MarketDataClient;
use crate::views::{IndicatorView, ViewHandle};

// =============================================================================
// Error Record
// =============================================================================

/// A recorded upstream failure for the error log endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub message: String,
    /// Where it happened, e.g. `view:ema` or `assets`.
    pub source: Option<String>,
    /// RFC 3339 timestamp.
    pub at: String,
}

// =============================================================================
// AppState
// =============================================================================

/// Maximum number of recent errors to retain.
const MAX_RECENT_ERRORS: usize = 50;

pub struct AppState {
    /// Incremented on every applied view update and recorded error.
    pub state_version: AtomicU64,

    /// Read-only after startup.
    pub config: AppConfig,
    pub client: MarketDataClient,

    views: HashMap<IndicatorView, Arc<ViewHandle>>,

    pub recent_errors: RwLock<Vec<ErrorRecord>>,

    pub start_time: std::time::Instant,
}

impl AppState {
    /// Build the state and its market data client from `config`.
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = MarketDataClient::new(&config.backend_base_url, config.request_timeout())?;

        let views = IndicatorView::ALL
            .iter()
            .map(|&view| (view, Arc::new(ViewHandle::new(view))))
            .collect();

        Ok(Self {
            state_version: AtomicU64::new(1),
            config,
            client,
            views,
            recent_errors: RwLock::new(Vec::new()),
            start_time: std::time::Instant::now(),
        })
    }

    pub fn view(&self, view: IndicatorView) -> Option<Arc<ViewHandle>> {
        self.views.get(&view).cloned()
    }

    // ── Version Management ──────────────────────────────────────────────

    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    // ── Error Logging ───────────────────────────────────────────────────

    /// Record an error message. The ring buffer is capped at
    /// [`MAX_RECENT_ERRORS`]; oldest entries are evicted first.
    pub fn push_error(&self, msg: String, source: Option<String>) {
        let record = ErrorRecord {
            message: msg,
            source,
            at: Utc::now().to_rfc3339(),
        };

        let mut errors = self.recent_errors.write();
        errors.push(record);
        while errors.len() > MAX_RECENT_ERRORS {
            errors.remove(0);
        }
        drop(errors);

        self.increment_version();
    }

    pub fn recent_errors(&self) -> Vec<ErrorRecord> {
        self.recent_errors.read().clone()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_handle_per_view() {
        let state = AppState::new(AppConfig::default()).unwrap();
        for view in IndicatorView::ALL {
            assert_eq!(state.view(view).unwrap().view(), view);
        }
    }

    #[test]
    fn error_log_is_capped() {
        let state = AppState::new(AppConfig::default()).unwrap();
        let before = state.current_state_version();
        for i in 0..(MAX_RECENT_ERRORS + 7) {
            state.push_error(format!("err {i}"), None);
        }
        let errors = state.recent_errors();
        assert_eq!(errors.len(), MAX_RECENT_ERRORS);
        assert_eq!(errors[0].message, "err 7");
        assert_eq!(state.current_state_version(), before + (MAX_RECENT_ERRORS as u64 + 7));
    }

    #[test]
    fn invalid_backend_url_fails_construction() {
        let config = AppConfig {
            backend_base_url: "not a url".into(),
            ..AppConfig::default()
        };
        assert!(AppState::new(config).is_err());
    }
}

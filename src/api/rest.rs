// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`.  The chart renderer reads derived
// series either statelessly (`/indicators/{view}`) or through the shared
// per-view state (`/views/{view}` + `/views/{view}/selection`).
//
// Market data failures on the indicator endpoints are swallowed: the view is
// served with empty series and the error lands in the error log.  Asset list
// and backtest failures surface as 502.
//
// CORS origins come from the config; an empty list allows any origin.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::indicators::rsi::RsiMethod;
use crate::market_data::BacktestParams;
use crate::types::{sort_series, Interval};
use crate::views::{ChartSeries, Completion, IndicatorView, RenderOptions, ViewHandle};

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS, request tracing and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/views", get(list_views))
        .route("/api/v1/views/:view", get(view_state))
        .route("/api/v1/views/:view/selection", post(select_view))
        .route("/api/v1/indicators/:view", get(indicators))
        .route("/api/v1/assets", get(assets))
        .route("/api/v1/backtest/:strategy/:asset", get(backtest))
        .route("/api/v1/errors", get(errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

// =============================================================================
// Errors
// =============================================================================

/// An error response rendered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

fn parse_view(raw: &str) -> Result<IndicatorView, ApiError> {
    raw.parse::<IndicatorView>()
        .map_err(|e| ApiError::new(StatusCode::NOT_FOUND, e))
}

fn lookup_view(state: &AppState, raw: &str) -> Result<Arc<ViewHandle>, ApiError> {
    let view = parse_view(raw)?;
    state
        .view(view)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, format!("view '{view}' is not registered")))
}

/// Interval from `ti`, or the configured default when absent.
fn resolve_interval(state: &AppState, ti: Option<&str>) -> Result<Interval, ApiError> {
    match ti {
        Some(raw) => raw.parse::<Interval>().map_err(ApiError::bad_request),
        None => Ok(state.config.default_interval),
    }
}

fn require_asset(asset: &str) -> Result<&str, ApiError> {
    let asset = asset.trim();
    if asset.is_empty() {
        return Err(ApiError::bad_request("asset must not be empty"));
    }
    Ok(asset)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    server_time: i64,
    uptime_secs: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        server_time: chrono::Utc::now().timestamp_millis(),
        uptime_secs: state.uptime_secs(),
    };
    Json(resp)
}

// =============================================================================
// Views
// =============================================================================

#[derive(Serialize)]
struct ViewInfo {
    view: IndicatorView,
    series: Vec<String>,
}

async fn list_views() -> impl IntoResponse {
    let views: Vec<ViewInfo> = IndicatorView::ALL
        .iter()
        .map(|&view| ViewInfo {
            view,
            series: view.series_names(),
        })
        .collect();
    Json(views)
}

async fn view_state(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = lookup_view(&state, &view)?;
    Ok(Json(handle.snapshot()))
}

#[derive(Debug, Deserialize)]
struct SelectionRequest {
    asset: String,
    #[serde(default)]
    ti: Option<String>,
    #[serde(default)]
    rsi: Option<RsiMethod>,
    #[serde(default)]
    senkou_shift: Option<usize>,
}

async fn select_view(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
    Json(req): Json<SelectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = lookup_view(&state, &view)?;
    let asset = require_asset(&req.asset)?;
    let interval = resolve_interval(&state, req.ti.as_deref())?;
    let options = RenderOptions {
        rsi: req.rsi.unwrap_or_default(),
        senkou_shift: req.senkou_shift.unwrap_or_default(),
    };

    let outcome = handle.select(&state.client, asset, interval, options).await;
    match &outcome {
        Completion::Applied => {
            state.increment_version();
        }
        Completion::Failed(message) => {
            state.push_error(message.clone(), Some(format!("view:{}", handle.view())));
        }
        Completion::Stale => {}
    }

    info!(view = %handle.view(), asset, %interval, ?outcome, "selection handled");
    Ok(Json(handle.snapshot()))
}

// =============================================================================
// Stateless indicator computation
// =============================================================================

#[derive(Debug, Deserialize)]
struct IndicatorQuery {
    asset: String,
    #[serde(default)]
    ti: Option<String>,
    #[serde(default)]
    rsi: Option<RsiMethod>,
    #[serde(default)]
    senkou_shift: Option<usize>,
}

#[derive(Serialize)]
struct IndicatorResponse {
    view: IndicatorView,
    asset: String,
    interval: Interval,
    series: Vec<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn indicators(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
    Query(query): Query<IndicatorQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let view = parse_view(&view)?;
    let asset = require_asset(&query.asset)?;
    let interval = resolve_interval(&state, query.ti.as_deref())?;
    let options = RenderOptions {
        rsi: query.rsi.unwrap_or_default(),
        senkou_shift: query.senkou_shift.unwrap_or_default(),
    };

    let (series, error) = match state.client.fetch_series(interval, asset).await {
        Ok(mut series) => {
            sort_series(&mut series);
            (series, None)
        }
        Err(e) => {
            let message = format!("{e:#}");
            warn!(%view, asset, %interval, error = %message, "fetch failed, serving empty view");
            state.push_error(message.clone(), Some(format!("indicators:{view}")));
            (Vec::new(), Some(message))
        }
    };

    Ok(Json(IndicatorResponse {
        view,
        asset: asset.to_string(),
        interval,
        series: view.render(&series, &options),
        error,
    }))
}

// =============================================================================
// Asset list
// =============================================================================

#[derive(Debug, Deserialize)]
struct AssetQuery {
    #[serde(default)]
    q: Option<String>,
}

async fn assets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AssetQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let list = state.client.list_assets().await.map_err(|e| {
        let message = format!("{e:#}");
        warn!(error = %message, "asset list unavailable");
        state.push_error(message.clone(), Some("assets".into()));
        ApiError::bad_gateway(message)
    })?;

    Ok(Json(list.search(query.q.as_deref().unwrap_or(""))))
}

// =============================================================================
// Backtest report passthrough
// =============================================================================

#[derive(Debug, Deserialize)]
struct BacktestQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    short: Option<String>,
    long: Option<String>,
    commission: Option<f64>,
}

/// Leading integer of `raw`, or 0 when there is none.  Trailing text such as
/// a fractional part is ignored, and negatives clamp to 0.
fn leading_int(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u32>().unwrap_or(0)
}

impl BacktestQuery {
    fn into_params(self) -> BacktestParams {
        let defaults = BacktestParams::default();
        BacktestParams {
            start_date: self.start_date.unwrap_or(defaults.start_date),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            short: self.short.as_deref().map_or(defaults.short, leading_int),
            long: self.long.as_deref().map_or(defaults.long, leading_int),
            commission: self.commission.unwrap_or(defaults.commission),
        }
        .normalized()
    }
}

async fn backtest(
    State(state): State<Arc<AppState>>,
    Path((strategy, asset)): Path<(String, String)>,
    Query(query): Query<BacktestQuery>,
) -> Result<Html<String>, ApiError> {
    let asset = require_asset(&asset)?;
    let params = query.into_params();

    let report = state
        .client
        .fetch_backtest_report(&strategy, asset, &params)
        .await
        .map_err(|e| {
            let message = format!("{e:#}");
            warn!(strategy = %strategy, asset, error = %message, "backtest report unavailable");
            state.push_error(message.clone(), Some("backtest".into()));
            ApiError::bad_gateway(message)
        })?;

    Ok(Html(report))
}

// =============================================================================
// Error log
// =============================================================================

async fn errors(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.recent_errors())
}

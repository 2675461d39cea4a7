//! HTTP surface: trigger a run cycle and read back the persisted state
//! it produces.

use crate::models::CycleReport;
use crate::persistence::reads;
use crate::pipeline;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_true")]
    pub auto_signals: bool,
    #[serde(default)]
    pub auto_trades: bool,
}

fn default_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub limit: usize,
    pub auto_signals: bool,
    pub auto_trades: bool,
}

/// Spawns one run cycle in the background and returns immediately; a
/// synchronous wait here would exceed any reasonable caller timeout. An
/// invalid query string (e.g. a non-numeric `limit`) never reaches this
/// handler at all — axum's `Query` extractor rejects it with 400 before
/// the background task is ever spawned.
///
/// A request with `auto_trades: true` but `auto_signals: false` is
/// accepted but never materializes a trade, since trades are only ever
/// derived from a gated signal.
pub async fn generate_predictions(
    State(state): State<AppState>,
    Query(request): Query<GenerateRequest>,
) -> Json<GenerateResponse> {
    let ctx = Arc::clone(&state.pipeline);
    let limit = request.limit;
    let auto_signals = request.auto_signals;
    let auto_trades = request.auto_trades && request.auto_signals;

    tokio::spawn(async move {
        let report: CycleReport = pipeline::run_cycle(ctx, limit, auto_signals, auto_trades).await;
        info!(?report, "background run cycle finished");
    });

    Json(GenerateResponse {
        status: "started",
        limit: request.limit,
        auto_signals: request.auto_signals,
        auto_trades: request.auto_trades,
    })
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page_limit")]
    pub limit: i64,
    pub market_id: Option<String>,
    pub status: Option<String>,
}

fn default_page_limit() -> i64 {
    100
}

pub async fn list_markets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let rows = reads::list_markets(&state.pipeline.pool, query.limit)
        .await
        .map_err(db_error)?;
    Ok(Json(serde_json::json!({ "markets": rows })))
}

pub async fn list_predictions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let rows = reads::list_predictions(&state.pipeline.pool, query.market_id.as_deref(), query.limit)
        .await
        .map_err(db_error)?;
    Ok(Json(serde_json::json!({ "predictions": rows })))
}

pub async fn list_signals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let rows = reads::list_signals(&state.pipeline.pool, query.market_id.as_deref(), query.limit)
        .await
        .map_err(db_error)?;
    Ok(Json(serde_json::json!({ "signals": rows })))
}

pub async fn list_trades(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let rows = reads::list_trades(&state.pipeline.pool, query.status.as_deref(), query.limit)
        .await
        .map_err(db_error)?;
    Ok(Json(serde_json::json!({ "trades": rows })))
}

pub async fn latest_portfolio(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let paper_trading = state.pipeline.config.paper_trading_mode;
    let snapshot = reads::latest_portfolio_snapshot(&state.pipeline.pool, paper_trading)
        .await
        .map_err(db_error)?;
    Ok(Json(serde_json::json!({ "snapshot": snapshot })))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

fn db_error(e: sqlx::Error) -> StatusCode {
    error!(error = %e, "database query failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

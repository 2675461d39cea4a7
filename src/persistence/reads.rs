//! Read queries backing the `/markets`, `/predictions`, `/signals`,
//! `/trades` and `/portfolio/latest` endpoints.

use super::rows::{MarketRow, PortfolioSnapshotRow, PredictionRow, SignalRow, TradeRow};
use chrono::{Duration, Utc};
use sqlx::PgPool;

const STALE_CUTOFF_DAYS: i64 = 30;

/// Mirrors `market_source::filters::is_fresh_enough`: excludes archived
/// markets and markets resolved more than 30 days ago.
pub async fn list_markets(pool: &PgPool, limit: i64) -> Result<Vec<MarketRow>, sqlx::Error> {
    let cutoff = Utc::now() - Duration::days(STALE_CUTOFF_DAYS);

    sqlx::query_as::<_, MarketRow>(
        r#"
        SELECT market_id, question, category, resolution_date, price_yes, price_no,
               volume_24h, liquidity, archived, active, closed
        FROM markets
        WHERE archived = FALSE
          AND (resolution_date IS NULL OR resolution_date >= $1)
        ORDER BY updated_at DESC
        LIMIT $2
        "#,
    )
    .bind(cutoff)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_predictions(
    pool: &PgPool,
    market_id: Option<&str>,
    limit: i64,
) -> Result<Vec<PredictionRow>, sqlx::Error> {
    match market_id {
        Some(id) => {
            sqlx::query_as::<_, PredictionRow>(
                r#"
                SELECT id, market_id, prediction_time, model_probability, market_price, edge, confidence
                FROM predictions
                WHERE market_id = $1
                ORDER BY prediction_time DESC
                LIMIT $2
                "#,
            )
            .bind(id)
            .bind(limit)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, PredictionRow>(
                r#"
                SELECT id, market_id, prediction_time, model_probability, market_price, edge, confidence
                FROM predictions
                ORDER BY prediction_time DESC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn list_signals(
    pool: &PgPool,
    market_id: Option<&str>,
    limit: i64,
) -> Result<Vec<SignalRow>, sqlx::Error> {
    match market_id {
        Some(id) => {
            sqlx::query_as::<_, SignalRow>(
                r#"
                SELECT id, prediction_id, market_id, created_at, side, strength, suggested_size, executed
                FROM signals
                WHERE market_id = $1
                ORDER BY created_at DESC
                LIMIT $2
                "#,
            )
            .bind(id)
            .bind(limit)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, SignalRow>(
                r#"
                SELECT id, prediction_id, market_id, created_at, side, strength, suggested_size, executed
                FROM signals
                ORDER BY created_at DESC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn list_trades(
    pool: &PgPool,
    status: Option<&str>,
    limit: i64,
) -> Result<Vec<TradeRow>, sqlx::Error> {
    match status {
        Some(s) => {
            sqlx::query_as::<_, TradeRow>(
                r#"
                SELECT id, signal_id, market_id, side, entry_price, size, entry_time,
                       exit_price, exit_time, pnl, status, paper_trading
                FROM trades
                WHERE status = $1
                ORDER BY entry_time DESC
                LIMIT $2
                "#,
            )
            .bind(s)
            .bind(limit)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, TradeRow>(
                r#"
                SELECT id, signal_id, market_id, side, entry_price, size, entry_time,
                       exit_price, exit_time, pnl, status, paper_trading
                FROM trades
                ORDER BY entry_time DESC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .fetch_all(pool)
            .await
        }
    }
}

/// Latest portfolio snapshot for the given book (paper vs live), if any
/// snapshot has been recorded yet.
pub async fn latest_portfolio_snapshot(
    pool: &PgPool,
    paper_trading: bool,
) -> Result<Option<PortfolioSnapshotRow>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioSnapshotRow>(
        r#"
        SELECT id, snapshot_time, total_value, cash, positions_value, total_exposure,
               daily_pnl, unrealized_pnl, realized_pnl, paper_trading
        FROM portfolio_snapshots
        WHERE paper_trading = $1
        ORDER BY snapshot_time DESC
        LIMIT 1
        "#,
    )
    .bind(paper_trading)
    .fetch_optional(pool)
    .await
}

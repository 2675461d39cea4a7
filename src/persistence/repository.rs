//! C5 — the transactional write side: upsert market, append prediction,
//! gate a signal, optionally materialize a trade, optionally append a
//! portfolio snapshot. Steps 1-5 commit or roll back together; concurrent
//! markets use separate transactions (a separate pool connection each).

use crate::config::Config;
use crate::errors::PipelineError;
use crate::models::{
    EnsemblePrediction, GateRejection, Market, PortfolioSnapshot, Prediction, Side, Signal, Trade,
    TradeStatus,
};
use crate::signals::gating::{self, GateInput};
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct PersistedCycleResult {
    pub prediction: Prediction,
    pub signal: Option<Signal>,
    pub trade: Option<Trade>,
}

pub async fn persist_cycle_result(
    pool: &PgPool,
    market: &Market,
    prediction: &EnsemblePrediction,
    auto_signals: bool,
    auto_trades: bool,
    config: &Config,
) -> Result<PersistedCycleResult, PipelineError> {
    let mut tx = pool.begin().await.map_err(|e| PipelineError::PersistenceConflict {
        market_id: market.market_id.clone(),
        source: e,
    })?;

    // Step 1: upsert market by market_id.
    sqlx::query(
        r#"
        INSERT INTO markets (market_id, question, category, resolution_date, price_yes, price_no, volume_24h, liquidity, archived, active, closed, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
        ON CONFLICT (market_id) DO UPDATE SET
            question = EXCLUDED.question,
            category = EXCLUDED.category,
            resolution_date = EXCLUDED.resolution_date,
            price_yes = EXCLUDED.price_yes,
            price_no = EXCLUDED.price_no,
            volume_24h = EXCLUDED.volume_24h,
            liquidity = EXCLUDED.liquidity,
            archived = EXCLUDED.archived,
            active = EXCLUDED.active,
            closed = EXCLUDED.closed,
            updated_at = now()
        "#,
    )
    .bind(&market.market_id)
    .bind(&market.question)
    .bind(&market.category)
    .bind(market.resolution_date)
    .bind(market.price_yes)
    .bind(market.price_no)
    .bind(market.volume_24h)
    .bind(market.liquidity)
    .bind(market.archived)
    .bind(market.active)
    .bind(market.closed)
    .execute(&mut *tx)
    .await
    .map_err(|e| PipelineError::PersistenceConflict {
        market_id: market.market_id.clone(),
        source: e,
    })?;

    // Step 2: append prediction.
    let prediction_row = Prediction {
        id: Uuid::new_v4(),
        market_id: market.market_id.clone(),
        prediction_time: Utc::now(),
        model_probability: prediction.probability,
        market_price: market.price_yes,
        edge: prediction.probability - market.price_yes,
        confidence: prediction.confidence,
    };

    sqlx::query(
        r#"
        INSERT INTO predictions (id, market_id, prediction_time, model_probability, market_price, edge, confidence)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(prediction_row.id)
    .bind(&prediction_row.market_id)
    .bind(prediction_row.prediction_time)
    .bind(prediction_row.model_probability)
    .bind(prediction_row.market_price)
    .bind(prediction_row.edge)
    .bind(prediction_row.confidence)
    .execute(&mut *tx)
    .await
    .map_err(|e| PipelineError::PersistenceConflict {
        market_id: market.market_id.clone(),
        source: e,
    })?;

    // Step 3: signal gating.
    let mut signal_row: Option<Signal> = None;

    if auto_signals {
        let gate_input = GateInput {
            edge: prediction_row.edge,
            confidence: prediction_row.confidence,
            volume_24h: market.volume_24h,
        };

        match gating::evaluate(&gate_input, config) {
            Ok(outcome) => {
                let signal = Signal {
                    id: Uuid::new_v4(),
                    prediction_id: prediction_row.id,
                    market_id: market.market_id.clone(),
                    created_at: Utc::now(),
                    side: outcome.side,
                    strength: outcome.strength,
                    suggested_size: outcome.suggested_size,
                    executed: false,
                };

                sqlx::query(
                    r#"
                    INSERT INTO signals (id, prediction_id, market_id, created_at, side, strength, suggested_size, executed)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(signal.id)
                .bind(signal.prediction_id)
                .bind(&signal.market_id)
                .bind(signal.created_at)
                .bind(signal.side.as_str())
                .bind(signal.strength.as_str())
                .bind(signal.suggested_size)
                .bind(signal.executed)
                .execute(&mut *tx)
                .await
                .map_err(|e| PipelineError::PersistenceConflict {
                    market_id: market.market_id.clone(),
                    source: e,
                })?;

                signal_row = Some(signal);
            }
            Err(rejection) => {
                log_gate_rejection(&market.market_id, rejection);
            }
        }
    }

    // Step 4: trade materialization.
    let mut trade_row: Option<Trade> = None;

    if auto_trades {
        if let Some(signal) = signal_row.as_mut() {
            let trade = Trade {
                id: Uuid::new_v4(),
                signal_id: signal.id,
                market_id: market.market_id.clone(),
                side: signal.side,
                entry_price: prediction_row.market_price,
                size: signal.suggested_size,
                entry_time: Utc::now(),
                exit_price: None,
                exit_time: None,
                pnl: None,
                status: TradeStatus::Open,
                paper_trading: config.paper_trading_mode,
            };

            sqlx::query(
                r#"
                INSERT INTO trades (id, signal_id, market_id, side, entry_price, size, entry_time, status, paper_trading)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(trade.id)
            .bind(trade.signal_id)
            .bind(&trade.market_id)
            .bind(trade.side.as_str())
            .bind(trade.entry_price)
            .bind(trade.size)
            .bind(trade.entry_time)
            .bind(trade.status.as_str())
            .bind(trade.paper_trading)
            .execute(&mut *tx)
            .await
            .map_err(|e| PipelineError::PersistenceConflict {
                market_id: market.market_id.clone(),
                source: e,
            })?;

            sqlx::query("UPDATE signals SET executed = TRUE WHERE id = $1")
                .bind(signal.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| PipelineError::PersistenceConflict {
                    market_id: market.market_id.clone(),
                    source: e,
                })?;

            signal.executed = true;
            trade_row = Some(trade);
        }
    }

    // Step 5: portfolio snapshot, only if a trade was created this cycle.
    if trade_row.is_some() {
        let snapshot = compute_portfolio_snapshot(&mut tx, market, config)
            .await
            .map_err(|e| PipelineError::PersistenceConflict {
                market_id: market.market_id.clone(),
                source: e,
            })?;

        sqlx::query(
            r#"
            INSERT INTO portfolio_snapshots
                (id, snapshot_time, total_value, cash, positions_value, total_exposure, daily_pnl, unrealized_pnl, realized_pnl, paper_trading)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(snapshot.id)
        .bind(snapshot.snapshot_time)
        .bind(snapshot.total_value)
        .bind(snapshot.cash)
        .bind(snapshot.positions_value)
        .bind(snapshot.total_exposure)
        .bind(snapshot.daily_pnl)
        .bind(snapshot.unrealized_pnl)
        .bind(snapshot.realized_pnl)
        .bind(snapshot.paper_trading)
        .execute(&mut *tx)
        .await
        .map_err(|e| PipelineError::PersistenceConflict {
            market_id: market.market_id.clone(),
            source: e,
        })?;
    }

    tx.commit().await.map_err(|e| PipelineError::PersistenceConflict {
        market_id: market.market_id.clone(),
        source: e,
    })?;

    Ok(PersistedCycleResult {
        prediction: prediction_row,
        signal: signal_row,
        trade: trade_row,
    })
}

fn log_gate_rejection(market_id: &str, rejection: GateRejection) {
    info!(market_id, reason = rejection.as_str(), "signal gating rejected prediction");
}

#[derive(sqlx::FromRow)]
struct OpenTradeRow {
    market_id: String,
    side: String,
    entry_price: f64,
    size: f64,
}

#[derive(sqlx::FromRow)]
struct RealizedPnlRow {
    realized_pnl: Option<f64>,
}

/// Computes the current portfolio snapshot across all OPEN trades.
/// `current_price` for a trade matching the market being processed comes
/// from the in-memory market snapshot; every other OPEN trade falls back
/// to its stored `entry_price` (this transaction has no fresher price for
/// markets it isn't processing).
async fn compute_portfolio_snapshot(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    market: &Market,
    config: &Config,
) -> Result<PortfolioSnapshot, sqlx::Error> {
    let open_trades: Vec<OpenTradeRow> =
        sqlx::query_as("SELECT market_id, side, entry_price, size FROM trades WHERE status = 'OPEN'")
            .fetch_all(&mut **tx)
            .await?;

    let realized: RealizedPnlRow =
        sqlx::query_as("SELECT SUM(pnl) as realized_pnl FROM trades WHERE status = 'CLOSED'")
            .fetch_one(&mut **tx)
            .await?;
    let realized_pnl = realized.realized_pnl.unwrap_or(0.0);

    let mut total_exposure = 0.0;
    let mut positions_value = 0.0;
    let mut unrealized_pnl = 0.0;

    for trade in &open_trades {
        let current_price = if trade.market_id == market.market_id {
            market.price_yes
        } else {
            trade.entry_price
        };

        let value = trade.size * current_price;
        positions_value += value;
        total_exposure += trade.size;

        let trade_unrealized = value - trade.size;
        unrealized_pnl += match Side::from_str_opt(&trade.side) {
            Some(Side::Yes) | None => trade_unrealized,
            Some(Side::No) => -trade_unrealized,
        };
    }

    let cash = config.starting_cash - total_exposure + realized_pnl;
    let total_value = cash + positions_value;
    let daily_pnl = unrealized_pnl + realized_pnl;

    Ok(PortfolioSnapshot {
        id: Uuid::new_v4(),
        snapshot_time: Utc::now(),
        total_value,
        cash,
        positions_value,
        total_exposure,
        daily_pnl,
        unrealized_pnl,
        realized_pnl,
        paper_trading: config.paper_trading_mode,
    })
}

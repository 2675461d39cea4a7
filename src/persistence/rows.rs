//! `sqlx::FromRow` shapes matching the `markets` / `predictions` /
//! `signals` / `trades` / `portfolio_snapshots` tables from the
//! persisted-state layout.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct MarketRow {
    pub market_id: String,
    pub question: String,
    pub category: Option<String>,
    pub resolution_date: Option<DateTime<Utc>>,
    pub price_yes: f64,
    pub price_no: f64,
    pub volume_24h: Option<f64>,
    pub liquidity: Option<f64>,
    pub archived: bool,
    pub active: bool,
    pub closed: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PredictionRow {
    pub id: Uuid,
    pub market_id: String,
    pub prediction_time: DateTime<Utc>,
    pub model_probability: f64,
    pub market_price: f64,
    pub edge: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct SignalRow {
    pub id: Uuid,
    pub prediction_id: Uuid,
    pub market_id: String,
    pub created_at: DateTime<Utc>,
    pub side: String,
    pub strength: String,
    pub suggested_size: f64,
    pub executed: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TradeRow {
    pub id: Uuid,
    pub signal_id: Uuid,
    pub market_id: String,
    pub side: String,
    pub entry_price: f64,
    pub size: f64,
    pub entry_time: DateTime<Utc>,
    pub exit_price: Option<f64>,
    pub exit_time: Option<DateTime<Utc>>,
    pub pnl: Option<f64>,
    pub status: String,
    pub paper_trading: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PortfolioSnapshotRow {
    pub id: Uuid,
    pub snapshot_time: DateTime<Utc>,
    pub total_value: f64,
    pub cash: f64,
    pub positions_value: f64,
    pub total_exposure: f64,
    pub daily_pnl: f64,
    pub unrealized_pnl: f64,
    pub realized_pnl: f64,
    pub paper_trading: bool,
}

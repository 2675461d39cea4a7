//! Core domain types for the prediction & signal pipeline.
//!
//! These are the in-memory shapes passed between components. Persisted
//! rows (with `sqlx::FromRow`) live in `persistence::rows`; these types are
//! the ones components actually compute with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable snapshot of one binary prediction market.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Market {
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

impl Market {
    /// `price_yes + price_no` should be approximately 1.0; this is an
    /// invariant check for tests, not a runtime gate.
    pub fn prices_balanced(&self, tolerance: f64) -> bool {
        (self.price_yes + self.price_no - 1.0).abs() <= tolerance
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialItem {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
}

/// Per-market transient bundle passed from the aggregator to the feature
/// engine. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedData {
    pub market: Market,
    pub news_items: Vec<NewsItem>,
    pub midpoint: Option<f64>,
    pub social_items: Vec<SocialItem>,
}

/// Fixed-length, fixed-order vector of feature values plus the aligned
/// name list the models were trained against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Output of running the model ensemble over one `FeatureVector`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsemblePrediction {
    pub probability: f64,
    pub confidence: f64,
    pub per_model: HashMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Yes => "YES",
            Side::No => "NO",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "YES" => Some(Side::Yes),
            "NO" => Some(Side::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "WEAK",
            Strength::Medium => "MEDIUM",
            Strength::Strong => "STRONG",
        }
    }

    /// Bucket boundaries are closed-below, open-above:
    /// `[min_edge, 0.10) -> WEAK`, `[0.10, 0.20) -> MEDIUM`, `[0.20, inf) -> STRONG`.
    pub fn bucket(abs_edge: f64) -> Self {
        if abs_edge >= 0.20 {
            Strength::Strong
        } else if abs_edge >= 0.10 {
            Strength::Medium
        } else {
            Strength::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
    Cancelled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "OPEN",
            TradeStatus::Closed => "CLOSED",
            TradeStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Appended once per (market, cycle); never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: uuid::Uuid,
    pub market_id: String,
    pub prediction_time: DateTime<Utc>,
    pub model_probability: f64,
    pub market_price: f64,
    pub edge: f64,
    pub confidence: f64,
}

/// Created iff the prediction passes signal thresholds. Never mutated
/// except `executed` flipping true when a trade is materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: uuid::Uuid,
    pub prediction_id: uuid::Uuid,
    pub market_id: String,
    pub created_at: DateTime<Utc>,
    pub side: Side,
    pub strength: Strength,
    pub suggested_size: f64,
    pub executed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: uuid::Uuid,
    pub signal_id: uuid::Uuid,
    pub market_id: String,
    pub side: Side,
    pub entry_price: f64,
    pub size: f64,
    pub entry_time: DateTime<Utc>,
    pub exit_price: Option<f64>,
    pub exit_time: Option<DateTime<Utc>>,
    pub pnl: Option<f64>,
    pub status: TradeStatus,
    pub paper_trading: bool,
}

/// Append-only observation of portfolio state. Readers always take the
/// row with the maximum `snapshot_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub id: uuid::Uuid,
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

/// Why a prediction failed signal gating, for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    EdgeTooSmall,
    ConfidenceTooLow,
    LiquidityTooLow,
}

impl GateRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateRejection::EdgeTooSmall => "edge_too_small",
            GateRejection::ConfidenceTooLow => "confidence_too_low",
            GateRejection::LiquidityTooLow => "liquidity_too_low",
        }
    }
}

/// Aggregate counters returned by one `RunCycle` invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleReport {
    pub markets_considered: usize,
    pub predictions_saved: usize,
    pub signals_created: usize,
    pub trades_created: usize,
    pub errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_bucket_boundaries_are_closed_below_open_above() {
        assert_eq!(Strength::bucket(0.05), Strength::Weak);
        assert_eq!(Strength::bucket(0.0999), Strength::Weak);
        assert_eq!(Strength::bucket(0.10), Strength::Medium);
        assert_eq!(Strength::bucket(0.1999), Strength::Medium);
        assert_eq!(Strength::bucket(0.20), Strength::Strong);
        assert_eq!(Strength::bucket(0.99), Strength::Strong);
    }

    #[test]
    fn market_price_balance_invariant() {
        let m = Market {
            market_id: "M1".into(),
            question: "q".into(),
            category: None,
            resolution_date: None,
            price_yes: 0.5,
            price_no: 0.5,
            volume_24h: None,
            liquidity: None,
            archived: false,
            active: true,
            closed: false,
        };
        assert!(m.prices_balanced(1e-6));
    }
}

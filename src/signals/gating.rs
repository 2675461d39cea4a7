//! Pure signal-gating logic: no I/O, so Testable Properties 3 and 4 are
//! directly exercisable in unit tests.

use crate::config::Config;
use crate::models::{GateRejection, Side, Strength};
use uuid::Uuid;

pub struct GateInput {
    pub edge: f64,
    pub confidence: f64,
    pub volume_24h: Option<f64>,
}

pub struct GateOutcome {
    pub side: Side,
    pub strength: Strength,
    pub suggested_size: f64,
}

/// A Signal is emitted iff all three thresholds hold:
/// `|edge| >= min_edge`, `confidence >= min_confidence`,
/// `volume_24h >= min_liquidity` (null volume treated as 0, which always
/// fails a positive `min_liquidity`).
pub fn evaluate(input: &GateInput, config: &Config) -> Result<GateOutcome, GateRejection> {
    let abs_edge = input.edge.abs();
    if abs_edge < config.min_edge {
        return Err(GateRejection::EdgeTooSmall);
    }

    if input.confidence < config.min_confidence {
        return Err(GateRejection::ConfidenceTooLow);
    }

    let volume = input.volume_24h.unwrap_or(0.0);
    if volume < config.min_liquidity {
        return Err(GateRejection::LiquidityTooLow);
    }

    let side = if input.edge > 0.0 { Side::Yes } else { Side::No };
    let strength = Strength::bucket(abs_edge);

    let multiplier = match strength {
        Strength::Weak => config.weak_multiplier,
        Strength::Medium => config.medium_multiplier,
        Strength::Strong => config.strong_multiplier,
    };

    let suggested_size = (config.base_unit * multiplier).min(config.max_position_size).max(0.0);

    Ok(GateOutcome {
        side,
        strength,
        suggested_size,
    })
}

/// Convenience used by the runner once a `GateOutcome` has been accepted:
/// assigns fresh identifiers for the persisted Signal row.
pub fn new_signal_id() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: String::new(),
            pool_size: 8,
            port: 8080,
            news_api_key: None,
            news_api_base: String::new(),
            price_api_base: String::new(),
            metadata_api_base: String::new(),
            midpoint_api_base: String::new(),
            social_enabled: false,
            min_edge: 0.05,
            min_confidence: 0.55,
            min_liquidity: 500.0,
            max_position_size: 500.0,
            base_unit: 50.0,
            weak_multiplier: 1.0,
            medium_multiplier: 2.0,
            strong_multiplier: 4.0,
            paper_trading_mode: true,
            starting_cash: 10_000.0,
            per_market_timeout: std::time::Duration::from_secs(30),
            batch_concurrency: 3,
            midpoint_concurrency: 20,
            single_model_confidence_floor: 0.5,
            model_paths: vec![],
            model_weights: vec![],
        }
    }

    #[test]
    fn spec_corollary_thresholds_emit_a_signal() {
        let input = GateInput {
            edge: 0.3755,
            confidence: 0.88,
            volume_24h: Some(1000.0),
        };
        let outcome = evaluate(&input, &config()).unwrap();
        assert_eq!(outcome.side, Side::Yes);
        assert_eq!(outcome.strength, Strength::Strong);
    }

    #[test]
    fn edge_too_small_is_rejected() {
        let input = GateInput {
            edge: 0.01,
            confidence: 0.9,
            volume_24h: Some(1000.0),
        };
        assert_eq!(evaluate(&input, &config()).unwrap_err(), GateRejection::EdgeTooSmall);
    }

    #[test]
    fn confidence_too_low_is_rejected() {
        let input = GateInput {
            edge: 0.2,
            confidence: 0.5,
            volume_24h: Some(1000.0),
        };
        assert_eq!(
            evaluate(&input, &config()).unwrap_err(),
            GateRejection::ConfidenceTooLow
        );
    }

    #[test]
    fn null_volume_is_treated_as_zero_and_rejected() {
        let input = GateInput {
            edge: 0.2,
            confidence: 0.9,
            volume_24h: None,
        };
        assert_eq!(
            evaluate(&input, &config()).unwrap_err(),
            GateRejection::LiquidityTooLow
        );
    }

    #[test]
    fn negative_edge_yields_no_side() {
        let input = GateInput {
            edge: -0.3,
            confidence: 0.9,
            volume_24h: Some(1000.0),
        };
        let outcome = evaluate(&input, &config()).unwrap();
        assert_eq!(outcome.side, Side::No);
    }

    #[test]
    fn suggested_size_is_capped_by_max_position_size() {
        let mut cfg = config();
        cfg.base_unit = 1000.0;
        cfg.strong_multiplier = 10.0;
        let input = GateInput {
            edge: 0.5,
            confidence: 0.9,
            volume_24h: Some(1000.0),
        };
        let outcome = evaluate(&input, &cfg).unwrap();
        assert_eq!(outcome.suggested_size, cfg.max_position_size);
    }
}

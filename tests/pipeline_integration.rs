//! Integration tests against a live Postgres instance. Skipped (not
//! failed) when `DATABASE_URL` isn't set, since these need a real
//! database and migrations applied.

use chrono::Utc;
use prediction_engine::config::Config;
use prediction_engine::inference::{Ensemble, JsonWeightedModel, ProbabilityModel};
use prediction_engine::models::{EnsemblePrediction, Market};
use prediction_engine::persistence;
use std::collections::HashMap;

fn test_config(database_url: String) -> Config {
    Config {
        database_url,
        pool_size: 4,
        port: 0,
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

fn sample_market(market_id: &str, volume_24h: Option<f64>) -> Market {
    Market {
        market_id: market_id.to_string(),
        question: "Will the thing happen?".into(),
        category: Some("politics".into()),
        resolution_date: None,
        price_yes: 0.50,
        price_no: 0.50,
        volume_24h,
        liquidity: Some(2000.0),
        archived: false,
        active: true,
        closed: false,
    }
}

fn sample_prediction(probability: f64, confidence: f64) -> EnsemblePrediction {
    let mut per_model = HashMap::new();
    per_model.insert("test".to_string(), probability);
    EnsemblePrediction {
        probability,
        confidence,
        per_model,
    }
}

macro_rules! skip_without_db {
    () => {
        match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}

#[tokio::test]
async fn s1_happy_path_produces_prediction_signal_and_trade() {
    let database_url = skip_without_db!();
    let config = test_config(database_url);
    let pool = persistence::connect(&config.database_url, config.pool_size)
        .await
        .expect("connect");

    let market = sample_market("S1-M1", Some(1000.0));
    let prediction = sample_prediction(0.8755, 0.88);

    let result = persistence::persist_cycle_result(&pool, &market, &prediction, true, true, &config)
        .await
        .expect("persist");

    assert!((result.prediction.edge - 0.3755).abs() < 1e-9);
    let signal = result.signal.expect("signal should be created");
    assert_eq!(signal.side.as_str(), "YES");
    assert_eq!(signal.strength.as_str(), "STRONG");

    let trade = result.trade.expect("trade should be materialized");
    assert_eq!(trade.entry_price, 0.50);
    assert_eq!(trade.status.as_str(), "OPEN");

    let snapshot = persistence::reads::latest_portfolio_snapshot(&pool, true)
        .await
        .expect("query snapshot")
        .expect("snapshot should exist");
    assert_eq!(snapshot.total_exposure, trade.size);
}

#[tokio::test]
async fn s2_confidence_gate_blocks_signal_and_trade() {
    let database_url = skip_without_db!();
    let config = test_config(database_url);
    let pool = persistence::connect(&config.database_url, config.pool_size)
        .await
        .expect("connect");

    let market = sample_market("S2-M1", Some(1000.0));
    let prediction = sample_prediction(0.8755, 0.50);

    let result = persistence::persist_cycle_result(&pool, &market, &prediction, true, true, &config)
        .await
        .expect("persist");

    assert!(result.signal.is_none());
    assert!(result.trade.is_none());
}

#[tokio::test]
async fn s3_liquidity_gate_blocks_signal() {
    let database_url = skip_without_db!();
    let config = test_config(database_url);
    let pool = persistence::connect(&config.database_url, config.pool_size)
        .await
        .expect("connect");

    let market = sample_market("S3-M1", Some(100.0));
    let prediction = sample_prediction(0.8755, 0.88);

    let result = persistence::persist_cycle_result(&pool, &market, &prediction, true, true, &config)
        .await
        .expect("persist");

    assert!(result.signal.is_none());
}

#[test]
fn ensemble_over_json_models_is_deterministic() {
    let m1: Box<dyn ProbabilityModel> = Box::new(JsonWeightedModel::from_spec("a", 0.0, vec![1.0]));
    let m2: Box<dyn ProbabilityModel> = Box::new(JsonWeightedModel::from_spec("b", 0.1, vec![0.5]));
    let ensemble = Ensemble::new(vec![(m1, 1.0), (m2, 2.0)], 0.5).expect("at least one model");

    let features = prediction_engine::models::FeatureVector {
        names: vec!["x".into()],
        values: vec![1.0],
    };

    let a = ensemble.predict(&features);
    let b = ensemble.predict(&features);
    assert_eq!(a.probability, b.probability);
    assert_eq!(a.confidence, b.confidence);
}

#[tokio::test]
async fn filter_consistency_excludes_stale_markets_from_reads() {
    let database_url = skip_without_db!();
    let config = test_config(database_url);
    let pool = persistence::connect(&config.database_url, config.pool_size)
        .await
        .expect("connect");

    let mut stale = sample_market("STALE-M1", Some(1000.0));
    stale.resolution_date = Some(Utc::now() - chrono::Duration::days(31));
    let prediction = sample_prediction(0.6, 0.6);

    persistence::persist_cycle_result(&pool, &stale, &prediction, false, false, &config)
        .await
        .expect("persist");

    let rows = persistence::reads::list_markets(&pool, 1000).await.expect("list markets");
    assert!(rows.iter().all(|m| m.market_id != "STALE-M1"));
}

//! Runtime configuration, loaded once at startup from the environment.
//!
//! All of the gating thresholds and concurrency knobs enumerated in the
//! design notes are typed fields here rather than ad-hoc `env::var` calls
//! scattered through the pipeline.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    pub port: u16,

    pub news_api_key: Option<String>,
    pub news_api_base: String,
    pub price_api_base: String,
    pub metadata_api_base: String,
    pub midpoint_api_base: String,
    pub social_enabled: bool,

    /// Minimum `|edge|` required before a Signal is emitted.
    pub min_edge: f64,
    /// Minimum ensemble confidence required before a Signal is emitted.
    pub min_confidence: f64,
    /// Minimum 24h volume required before a Signal is emitted.
    pub min_liquidity: f64,
    /// Hard cap on `suggested_size`.
    pub max_position_size: f64,
    /// Base unit multiplied by the strength multiplier to derive `suggested_size`.
    pub base_unit: f64,
    pub weak_multiplier: f64,
    pub medium_multiplier: f64,
    pub strong_multiplier: f64,

    pub paper_trading_mode: bool,
    pub starting_cash: f64,

    pub per_market_timeout: Duration,
    pub batch_concurrency: usize,
    pub midpoint_concurrency: usize,

    /// Confidence floor used when only one model loaded.
    pub single_model_confidence_floor: f64,

    /// Paths to JSON-weights model files to load at startup. Loading zero
    /// models is a fatal startup error (`PipelineError::ModelLoadFailure`).
    pub model_paths: Vec<String>,
    /// Ensemble weight for the model loaded from the same index in
    /// `model_paths`. A model past the end of this list, or one skipped
    /// because it failed to load, falls back to a weight of `1.0`.
    pub model_weights: Vec<f64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/prediction_engine".to_string());

        let port = env_parse("PORT", 8080);

        Ok(Self {
            database_url,
            pool_size: env_parse("DB_POOL_SIZE", 8),
            port,

            news_api_key: env::var("NEWS_API_KEY").ok(),
            news_api_base: env::var("NEWS_API_BASE")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            price_api_base: env::var("PRICE_API_BASE")
                .unwrap_or_else(|_| "https://clob.polymarket.com".to_string()),
            metadata_api_base: env::var("METADATA_API_BASE")
                .unwrap_or_else(|_| "https://gamma-api.polymarket.com".to_string()),
            midpoint_api_base: env::var("MIDPOINT_API_BASE")
                .unwrap_or_else(|_| "https://clob.polymarket.com".to_string()),
            social_enabled: env_bool("SOCIAL_SIGNALS_ENABLED", false),

            min_edge: env_parse("MIN_EDGE", 0.05),
            min_confidence: env_parse("MIN_CONFIDENCE", 0.55),
            min_liquidity: env_parse("MIN_LIQUIDITY", 500.0),
            max_position_size: env_parse("MAX_POSITION_SIZE", 500.0),
            base_unit: env_parse("BASE_UNIT", 50.0),
            weak_multiplier: env_parse("WEAK_SIZE_MULTIPLIER", 1.0),
            medium_multiplier: env_parse("MEDIUM_SIZE_MULTIPLIER", 2.0),
            strong_multiplier: env_parse("STRONG_SIZE_MULTIPLIER", 4.0),

            paper_trading_mode: env_bool("PAPER_TRADING_MODE", true),
            starting_cash: env_parse("STARTING_CASH", 10_000.0),

            per_market_timeout: Duration::from_secs(env_parse("PER_MARKET_TIMEOUT_SECONDS", 30)),
            batch_concurrency: env_parse("BATCH_CONCURRENCY", 3),
            midpoint_concurrency: env_parse("MIDPOINT_CONCURRENCY", 20),

            single_model_confidence_floor: env_parse("SINGLE_MODEL_CONFIDENCE_FLOOR", 0.5),

            model_paths: env::var("MODEL_PATHS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| vec!["models/primary.json".to_string()]),
            model_weights: env::var("MODEL_WEIGHTS")
                .ok()
                .map(|v| v.split(',').filter_map(|s| s.trim().parse().ok()).collect())
                .unwrap_or_default(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(default)
}

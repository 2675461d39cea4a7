//! Price/orderbook API client — authoritative for `outcome_prices` and
//! `market_id`.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PriceApiClient {
    client: Client,
    base_url: String,
}

/// One token on a market, as the price API reports it.
#[derive(Debug, Deserialize)]
struct Token {
    outcome: String,
    price: f64,
}

/// Raw price-API market payload. Real upstream keys a market by either
/// `condition_id` or `question_id` depending on API version; both are
/// tried in order, per the design notes.
#[derive(Debug, Deserialize)]
struct RawPriceMarket {
    #[serde(default)]
    condition_id: Option<String>,
    #[serde(default)]
    question_id: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    end_date_iso: Option<String>,
}

/// Normalized record this client returns to the merge step.
#[derive(Debug, Clone)]
pub struct PriceRecord {
    pub market_id: String,
    pub question: Option<String>,
    pub price_yes: f64,
    pub price_no: f64,
    pub archived: bool,
    pub active: bool,
    pub closed: bool,
    pub resolution_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl PriceApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build price API HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_markets(&self) -> Result<Vec<PriceRecord>> {
        let url = format!("{}/markets", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("price API request failed")?
            .error_for_status()
            .context("price API returned an error status")?;

        let raw: Vec<RawPriceMarket> = response
            .json()
            .await
            .context("failed to parse price API response")?;

        info!(count = raw.len(), "fetched markets from price API");

        Ok(raw.into_iter().filter_map(to_record).collect())
    }
}

fn to_record(raw: RawPriceMarket) -> Option<PriceRecord> {
    let market_id = raw.condition_id.or(raw.question_id)?;

    let mut price_yes = 0.0;
    let mut price_no = 0.0;
    for token in &raw.tokens {
        match token.outcome.as_str() {
            "YES" => price_yes = token.price,
            "NO" => price_no = token.price,
            _ => {}
        }
    }

    let resolution_date = raw
        .end_date_iso
        .as_deref()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc));

    Some(PriceRecord {
        market_id,
        question: raw.question,
        price_yes,
        price_no,
        archived: raw.archived,
        active: raw.active,
        closed: raw.closed,
        resolution_date,
    })
}

//! Metadata API client — authoritative for `volume_24h`, `liquidity`,
//! `category`.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct MetadataApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RawMetadataMarket {
    #[serde(default)]
    condition_id: Option<String>,
    #[serde(default)]
    question_id: Option<String>,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    liquidity: Option<f64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    end_date_iso: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataRecord {
    pub market_id: String,
    pub volume_24h: Option<f64>,
    pub liquidity: Option<f64>,
    pub category: Option<String>,
    pub resolution_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl MetadataApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build metadata API HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_markets(&self) -> Result<Vec<MetadataRecord>> {
        let url = format!("{}/markets", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("metadata API request failed")?
            .error_for_status()
            .context("metadata API returned an error status")?;

        let raw: Vec<RawMetadataMarket> = response
            .json()
            .await
            .context("failed to parse metadata API response")?;

        info!(count = raw.len(), "fetched markets from metadata API");

        Ok(raw.into_iter().filter_map(to_record).collect())
    }
}

fn to_record(raw: RawMetadataMarket) -> Option<MetadataRecord> {
    let market_id = raw.condition_id.or(raw.question_id)?;

    let resolution_date = raw
        .end_date_iso
        .as_deref()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc));

    Some(MetadataRecord {
        market_id,
        volume_24h: raw.volume,
        liquidity: raw.liquidity,
        category: raw.category,
        resolution_date,
    })
}

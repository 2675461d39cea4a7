//! News provider client — free-text query derived from the market
//! question. Rate-limit exhaustion is non-fatal: it just yields empty
//! results for the remainder of the day, same as any other upstream
//! failure from this client's point of view.

use crate::models::NewsItem;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(serde::Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(serde::Deserialize)]
struct RawArticle {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: RawSource,
}

#[derive(serde::Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

impl NewsClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build news HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Never fails: any upstream error yields an empty list at debug log
    /// level.
    pub async fn search(&self, query: &str) -> Vec<NewsItem> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("news API key not configured, skipping news fetch");
            return Vec::new();
        };

        let url = format!("{}/everything", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("q", query), ("apiKey", api_key), ("pageSize", "20")])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, query, "news API request failed");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), query, "news API returned non-success");
            return Vec::new();
        }

        match response.json::<NewsApiResponse>().await {
            Ok(parsed) => parsed.articles.into_iter().map(to_news_item).collect(),
            Err(e) => {
                debug!(error = %e, query, "failed to parse news API response");
                Vec::new()
            }
        }
    }
}

fn to_news_item(raw: RawArticle) -> NewsItem {
    let published_at = raw
        .published_at
        .as_deref()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    NewsItem {
        title: raw.title,
        body: raw.content.or(raw.description).unwrap_or_default(),
        published_at,
        source: raw.source.name.unwrap_or_else(|| "unknown".to_string()),
    }
}

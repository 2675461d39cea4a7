//! Orderbook midpoint endpoint client.
//!
//! A 404 here is an expected, non-error outcome meaning "no midpoint
//! available" — it must not be logged as an error, only at debug.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MidpointClient {
    client: Client,
    base_url: String,
}

#[derive(serde::Deserialize)]
struct MidpointResponse {
    mid: f64,
}

impl MidpointClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build midpoint HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Returns `None` on any failure, including the expected 404, and
    /// never propagates an error to the caller.
    pub async fn fetch(&self, token_id: &str) -> Option<f64> {
        let url = format!("{}/midpoint?token_id={}", self.base_url, token_id);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, token_id, "midpoint request failed");
                return None;
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            debug!(token_id, "midpoint not available (404)");
            return None;
        }

        if !response.status().is_success() {
            debug!(status = %response.status(), token_id, "midpoint endpoint returned non-success");
            return None;
        }

        match response.json::<MidpointResponse>().await {
            Ok(parsed) => Some(parsed.mid),
            Err(e) => {
                debug!(error = %e, token_id, "failed to parse midpoint response");
                None
            }
        }
    }
}

//! C2 — Market Source Adapter.
//!
//! Merges two upstream APIs into the canonical `Market` list and applies
//! the archival/age filter described in the design notes. No other filter
//! may be applied here; the 30-day cutoff is also reused by the `/markets`
//! read endpoint so ingestion and reads agree (Testable Property 7).

mod filters;
mod merge;
pub mod metadata_api;
pub mod price_api;

pub use filters::is_fresh_enough;
pub use merge::merge_sources;
pub use metadata_api::{MetadataApiClient, MetadataRecord};
pub use price_api::{PriceApiClient, PriceRecord};

use crate::models::Market;
use tracing::warn;

/// Fetches and merges the active market list from both upstreams,
/// tolerating the failure of either. If both fail, returns an empty list
/// rather than propagating an error to the caller.
pub async fn fetch_active_markets(
    price_client: &PriceApiClient,
    metadata_client: &MetadataApiClient,
    limit: usize,
) -> Vec<Market> {
    let prices = match price_client.fetch_markets().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "price API fetch failed, continuing with metadata only");
            Vec::new()
        }
    };

    let metadata = match metadata_client.fetch_markets().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "metadata API fetch failed, continuing with price only");
            Vec::new()
        }
    };

    let merged = merge_sources(prices, metadata);

    let mut filtered: Vec<Market> = merged.into_iter().filter(|m| is_fresh_enough(m)).collect();

    filtered.truncate(limit);
    filtered
}

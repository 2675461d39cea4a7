//! C3 — Data Aggregator.
//!
//! Per market, concurrently fetches news and (optionally) social items.
//! Never fails: every upstream failure degrades to an empty/null value
//! for that field only, logged at debug. The orderbook midpoint is
//! fetched separately, batch-wide, by the run cycle (see
//! `pipeline::runner::prefetch_midpoints`) under its own concurrency
//! bound, so it is passed in here rather than fetched per market.

pub mod midpoint;
pub mod news;
pub mod social;

use crate::models::AggregatedData;
use crate::models::Market;
pub use midpoint::MidpointClient;
pub use news::NewsClient;
pub use social::SocialClient;

pub struct Aggregator {
    pub news: NewsClient,
    pub midpoint: MidpointClient,
    pub social: SocialClient,
}

impl Aggregator {
    pub fn new(news: NewsClient, midpoint: MidpointClient, social: SocialClient) -> Self {
        Self {
            news,
            midpoint,
            social,
        }
    }

    /// Fetches news and social data for one market concurrently; `midpoint`
    /// is prefetched batch-wide by the caller. This function cannot fail;
    /// every upstream's failure just produces an empty/null value for that
    /// field.
    pub async fn fetch_all_for_market(&self, market: Market, midpoint: Option<f64>) -> AggregatedData {
        let (news_items, social_items) = tokio::join!(
            self.news.search(&market.question),
            self.social.fetch(&market.question),
        );

        AggregatedData {
            market,
            news_items,
            midpoint,
            social_items,
        }
    }
}

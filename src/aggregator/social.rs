//! Optional social (Twitter/Reddit) item fetcher. May be disabled by
//! configuration, in which case it silently yields empty lists — no
//! network call is attempted at all.

use crate::models::SocialItem;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SocialClient {
    enabled: bool,
}

impl SocialClient {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub async fn fetch(&self, _query: &str) -> Vec<SocialItem> {
        if !self.enabled {
            debug!("social signals disabled by configuration");
            return Vec::new();
        }

        // No social provider is wired up in this deployment; disabled
        // providers and unreachable providers both degrade the same way.
        Vec::new()
    }
}

//! The one filter contract C2 is allowed to apply, shared verbatim with
//! the `/markets` read endpoint so ingestion and reads never disagree.

use crate::models::Market;
use chrono::{Duration, Utc};

const STALE_CUTOFF_DAYS: i64 = 30;

/// Rejects archived markets and markets whose resolution date is more
/// than 30 days in the past. Markets with no resolution date pass this
/// check (unknown resolution is not staleness).
pub fn is_fresh_enough(market: &Market) -> bool {
    if market.archived {
        return false;
    }

    if let Some(resolution_date) = market.resolution_date {
        let cutoff = Utc::now() - Duration::days(STALE_CUTOFF_DAYS);
        if resolution_date < cutoff {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_market() -> Market {
        Market {
            market_id: "M1".into(),
            question: "q".into(),
            category: None,
            resolution_date: None,
            price_yes: 0.5,
            price_no: 0.5,
            volume_24h: None,
            liquidity: None,
            archived: false,
            active: true,
            closed: false,
        }
    }

    #[test]
    fn archived_market_is_rejected() {
        let mut m = base_market();
        m.archived = true;
        assert!(!is_fresh_enough(&m));
    }

    #[test]
    fn market_resolved_31_days_ago_is_rejected() {
        let mut m = base_market();
        m.resolution_date = Some(Utc::now() - Duration::days(31));
        assert!(!is_fresh_enough(&m));
    }

    #[test]
    fn market_resolved_29_days_ago_is_retained() {
        let mut m = base_market();
        m.resolution_date = Some(Utc::now() - Duration::days(29));
        assert!(is_fresh_enough(&m));
    }

    #[test]
    fn market_with_no_resolution_date_is_retained() {
        assert!(is_fresh_enough(&base_market()));
    }
}

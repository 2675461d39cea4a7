//! Market features: price, spread, log-volume, log-liquidity,
//! time-to-resolution, and a category one-hot.

use super::CATEGORY_VOCAB;
use crate::models::Market;

pub fn feature_names() -> Vec<String> {
    let mut names = vec![
        "price".to_string(),
        "spread".to_string(),
        "log_volume".to_string(),
        "log_liquidity".to_string(),
        "time_to_resolution_days".to_string(),
    ];
    names.extend(CATEGORY_VOCAB.iter().map(|c| format!("category_{c}")));
    names
}

/// Spread comes from the orderbook when available; this extractor has no
/// orderbook access (that's C3's job), so it always contributes 0 here —
/// the aggregator-sourced midpoint is what would inform a real spread,
/// and is folded in by the caller before this is invoked in a richer
/// build if ever needed. `(|price_yes - 0.5| * 2)` is explicitly
/// forbidden as a spread proxy per the design notes.
pub fn extract(market: &Market) -> Vec<f64> {
    let price = market.price_yes;
    let spread = 0.0;
    let log_volume = market.volume_24h.map(|v| (v + 1.0).ln()).unwrap_or(0.0);
    let log_liquidity = market.liquidity.map(|v| (v + 1.0).ln()).unwrap_or(0.0);

    let time_to_resolution_days = market
        .resolution_date
        .map(|d| (d - chrono::Utc::now()).num_seconds() as f64 / 86_400.0)
        .filter(|d| *d > 0.0)
        .unwrap_or(0.0);

    let mut values = vec![price, spread, log_volume, log_liquidity, time_to_resolution_days];

    let category_index = market
        .category
        .as_deref()
        .and_then(|c| CATEGORY_VOCAB.iter().position(|v| *v == c));

    for (i, _) in CATEGORY_VOCAB.iter().enumerate() {
        values.push(if category_index == Some(i) { 1.0 } else { 0.0 });
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_yields_all_zero_one_hot() {
        let market = Market {
            market_id: "M1".into(),
            question: "q".into(),
            category: Some("not_a_real_category".into()),
            resolution_date: None,
            price_yes: 0.5,
            price_no: 0.5,
            volume_24h: None,
            liquidity: None,
            archived: false,
            active: true,
            closed: false,
        };
        let values = extract(&market);
        let one_hot = &values[5..];
        assert!(one_hot.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn missing_volume_and_liquidity_are_neutral_zero() {
        let market = Market {
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
        };
        let values = extract(&market);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 0.0);
    }

    #[test]
    fn feature_name_count_matches_extracted_value_count() {
        let market = Market {
            market_id: "M1".into(),
            question: "q".into(),
            category: Some("crypto".into()),
            resolution_date: None,
            price_yes: 0.5,
            price_no: 0.5,
            volume_24h: Some(10.0),
            liquidity: Some(10.0),
            archived: false,
            active: true,
            closed: false,
        };
        assert_eq!(feature_names().len(), extract(&market).len());
    }
}

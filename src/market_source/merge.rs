//! Join contract between the price and metadata upstreams: join on
//! `market_id`; price-source wins for overlapping fields except
//! volume/liquidity/category where metadata-source wins. Markets present
//! in only one source are retained with nullable fields for the missing
//! data.

use super::metadata_api::MetadataRecord;
use super::price_api::PriceRecord;
use crate::models::Market;
use std::collections::HashMap;

pub fn merge_sources(prices: Vec<PriceRecord>, metadata: Vec<MetadataRecord>) -> Vec<Market> {
    let mut metadata_by_id: HashMap<String, MetadataRecord> = metadata
        .into_iter()
        .map(|m| (m.market_id.clone(), m))
        .collect();

    let mut merged = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for price in prices {
        seen.insert(price.market_id.clone());
        let meta = metadata_by_id.remove(&price.market_id);

        merged.push(Market {
            market_id: price.market_id,
            question: price.question.unwrap_or_default(),
            category: meta.as_ref().and_then(|m| m.category.clone()),
            resolution_date: price.resolution_date.or(meta.as_ref().and_then(|m| m.resolution_date)),
            price_yes: price.price_yes,
            price_no: price.price_no,
            volume_24h: meta.as_ref().and_then(|m| m.volume_24h),
            liquidity: meta.as_ref().and_then(|m| m.liquidity),
            archived: price.archived,
            active: price.active,
            closed: price.closed,
        });
    }

    // Remaining metadata-only entries: retained with nullable price fields.
    for (market_id, meta) in metadata_by_id {
        if seen.contains(&market_id) {
            continue;
        }
        merged.push(Market {
            market_id,
            question: String::new(),
            category: meta.category,
            resolution_date: meta.resolution_date,
            price_yes: 0.0,
            price_no: 0.0,
            volume_24h: meta.volume_24h,
            liquidity: meta.liquidity,
            archived: false,
            active: true,
            closed: false,
        });
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_source_wins_for_overlapping_price_fields() {
        let prices = vec![PriceRecord {
            market_id: "M1".into(),
            question: Some("q".into()),
            price_yes: 0.6,
            price_no: 0.4,
            archived: false,
            active: true,
            closed: false,
            resolution_date: None,
        }];
        let metadata = vec![MetadataRecord {
            market_id: "M1".into(),
            volume_24h: Some(1000.0),
            liquidity: Some(2000.0),
            category: Some("politics".into()),
            resolution_date: None,
        }];

        let merged = merge_sources(prices, metadata);
        assert_eq!(merged.len(), 1);
        let m = &merged[0];
        assert_eq!(m.price_yes, 0.6);
        assert_eq!(m.volume_24h, Some(1000.0));
        assert_eq!(m.category.as_deref(), Some("politics"));
    }

    #[test]
    fn market_present_in_only_one_source_is_retained() {
        let prices = vec![PriceRecord {
            market_id: "M1".into(),
            question: Some("q".into()),
            price_yes: 0.5,
            price_no: 0.5,
            archived: false,
            active: true,
            closed: false,
            resolution_date: None,
        }];
        let merged = merge_sources(prices, vec![]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].volume_24h, None);

        let metadata = vec![MetadataRecord {
            market_id: "M2".into(),
            volume_24h: Some(500.0),
            liquidity: None,
            category: None,
            resolution_date: None,
        }];
        let merged2 = merge_sources(vec![], metadata);
        assert_eq!(merged2.len(), 1);
        assert_eq!(merged2[0].market_id, "M2");
    }
}

//! Feature pipeline: composes four extractor families into one
//! fixed-schema `FeatureVector`. The name list is frozen here; any
//! extractor that would widen/narrow its slice fails the whole market
//! (`PipelineError::FeatureShapeMismatch`) rather than silently reshaping.

pub mod embedding;
pub mod market;
pub mod sentiment;
pub mod temporal;

use crate::errors::PipelineError;
use crate::models::{AggregatedData, FeatureVector};

/// Fixed small category vocabulary used for the one-hot market feature.
/// Frozen at "training time" alongside the rest of the name list.
pub const CATEGORY_VOCAB: &[&str] = &[
    "politics",
    "crypto",
    "sports",
    "economics",
    "entertainment",
    "science",
    "other",
];

pub const EMBEDDING_DIM: usize = 384;

/// The frozen feature name list, in the exact order `build_vector`
/// concatenates values. Changing this requires retraining the models, so
/// it is a single source of truth rather than derived per-call.
pub fn frozen_feature_names() -> Vec<String> {
    let mut names = Vec::new();
    names.extend(market::feature_names());
    names.extend(sentiment::feature_names());
    names.extend(temporal::feature_names());
    names.extend(embedding::feature_names());
    names
}

/// Builds the `FeatureVector` for one market's aggregated data. Returns
/// `FeatureShapeMismatch` if the concatenated length doesn't match the
/// frozen name list — this should only happen if an extractor is changed
/// without updating `frozen_feature_names`, which is itself a bug this
/// check is meant to catch during development and defend against in
/// production.
pub fn build_vector(data: &AggregatedData, snapshot_time: chrono::DateTime<chrono::Utc>) -> Result<FeatureVector, PipelineError> {
    let mut values = Vec::new();
    values.extend(market::extract(&data.market));
    values.extend(sentiment::extract(&data.news_items, &data.social_items, snapshot_time));
    values.extend(temporal::extract(snapshot_time));
    values.extend(embedding::extract(&data.market.question));

    let names = frozen_feature_names();

    if values.len() != names.len() {
        return Err(PipelineError::FeatureShapeMismatch {
            expected: names.len(),
            actual: values.len(),
        });
    }

    Ok(FeatureVector { names, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Market;

    fn sample_market() -> Market {
        Market {
            market_id: "M1".into(),
            question: "Will the thing happen?".into(),
            category: Some("politics".into()),
            resolution_date: None,
            price_yes: 0.5,
            price_no: 0.5,
            volume_24h: Some(1000.0),
            liquidity: Some(2000.0),
            archived: false,
            active: true,
            closed: false,
        }
    }

    #[test]
    fn vector_length_matches_frozen_name_list() {
        let data = AggregatedData {
            market: sample_market(),
            news_items: vec![],
            midpoint: None,
            social_items: vec![],
        };
        let vector = build_vector(&data, chrono::Utc::now()).unwrap();
        assert_eq!(vector.len(), frozen_feature_names().len());
        assert_eq!(vector.names, frozen_feature_names());
    }
}

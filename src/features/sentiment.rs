//! Sentiment features: age-decayed weighted mean of per-item sentiment
//! scores, computed separately for news and social items, plus a raw
//! item count.

use crate::models::{NewsItem, SocialItem};
use chrono::{DateTime, Utc};

/// Half-life, in hours, used for the age-decay weighting. An article
/// published `HALF_LIFE_HOURS` ago carries half the weight of one
/// published now.
const HALF_LIFE_HOURS: f64 = 12.0;

pub fn feature_names() -> Vec<String> {
    vec![
        "news_sentiment_mean".to_string(),
        "social_sentiment_mean".to_string(),
        "sentiment_item_count".to_string(),
    ]
}

pub fn extract(news: &[NewsItem], social: &[SocialItem], snapshot_time: DateTime<Utc>) -> Vec<f64> {
    let news_scores: Vec<(f64, f64)> = news
        .iter()
        .map(|item| {
            let text = format!("{} {}", item.title, item.body);
            (score_text(&text), decay_weight(item.published_at, snapshot_time))
        })
        .collect();

    let social_scores: Vec<(f64, f64)> = social
        .iter()
        .map(|item| (score_text(&item.text), decay_weight(item.published_at, snapshot_time)))
        .collect();

    let news_mean = weighted_mean(&news_scores);
    let social_mean = weighted_mean(&social_scores);
    let count = (news.len() + social.len()) as f64;

    vec![news_mean, social_mean, count]
}

fn decay_weight(published_at: DateTime<Utc>, snapshot_time: DateTime<Utc>) -> f64 {
    let age_hours = (snapshot_time - published_at).num_seconds() as f64 / 3600.0;
    let age_hours = age_hours.max(0.0);
    0.5_f64.powf(age_hours / HALF_LIFE_HOURS)
}

fn weighted_mean(scores: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = scores.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted_sum: f64 = scores.iter().map(|(s, w)| s * w).sum();
    weighted_sum / total_weight
}

/// Stand-in for the pre-trained sentiment scorer: a small deterministic
/// lexicon. The model's file format is out of scope for this pipeline;
/// what matters here is that this function always returns a value in
/// `[-1, 1]` for any input text.
fn score_text(text: &str) -> f64 {
    const POSITIVE: &[&str] = &[
        "win", "wins", "won", "gain", "gains", "growth", "approve", "approved", "surge", "bullish",
        "up", "rally", "strong", "record", "success",
    ];
    const NEGATIVE: &[&str] = &[
        "loss", "lose", "lost", "decline", "crash", "reject", "rejected", "bearish", "down",
        "fail", "failed", "weak", "crisis", "scandal",
    ];

    let lower = text.to_lowercase();
    let mut score = 0.0_f64;
    let mut hits = 0.0_f64;

    for word in POSITIVE {
        if lower.contains(word) {
            score += 1.0;
            hits += 1.0;
        }
    }
    for word in NEGATIVE {
        if lower.contains(word) {
            score -= 1.0;
            hits += 1.0;
        }
    }

    if hits == 0.0 {
        return 0.0;
    }

    (score / hits).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_items_yields_neutral_zero_means_and_zero_count() {
        let values = extract(&[], &[], Utc::now());
        assert_eq!(values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn older_items_are_weighted_less_than_recent_ones() {
        let now = Utc::now();
        let recent = NewsItem {
            title: "record growth win".into(),
            body: String::new(),
            published_at: now,
            source: "s".into(),
        };
        let old = NewsItem {
            title: "crisis crash fail".into(),
            body: String::new(),
            published_at: now - chrono::Duration::hours(48),
            source: "s".into(),
        };
        let values = extract(&[recent, old], &[], now);
        // Recent positive item dominates over the far-older negative one.
        assert!(values[0] > 0.0);
    }

    #[test]
    fn sentiment_score_is_always_bounded() {
        assert!(score_text("win win win crash crash").abs() <= 1.0);
        assert_eq!(score_text("no sentiment words here"), 0.0);
    }
}

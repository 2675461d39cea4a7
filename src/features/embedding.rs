//! Text embedding features: a fixed-dimension vector derived from the
//! market `question`. The sentence-embedder model file format is out of
//! scope for this pipeline (it is a trained artifact loaded alongside the
//! probability models); this is a deterministic stand-in with the same
//! shape contract: fixed dimension, bounded values, stable for identical
//! input.

use super::EMBEDDING_DIM;

pub fn feature_names() -> Vec<String> {
    (0..EMBEDDING_DIM)
        .map(|i| format!("question_embedding_{i}"))
        .collect()
}

/// Hashes overlapping word shingles of `question` into `EMBEDDING_DIM`
/// buckets and mean-pools, approximating the truncate/mean-pool contract
/// a real sentence embedder would follow for inputs that exceed its
/// context window.
pub fn extract(question: &str) -> Vec<f64> {
    let mut buckets = vec![0.0_f64; EMBEDDING_DIM];
    let mut counts = vec![0usize; EMBEDDING_DIM];

    let tokens: Vec<&str> = question.split_whitespace().collect();
    if tokens.is_empty() {
        return buckets;
    }

    for token in &tokens {
        let h = fnv1a(token.as_bytes());
        let bucket = (h % EMBEDDING_DIM as u64) as usize;
        let sign = if (h >> 1) & 1 == 0 { 1.0 } else { -1.0 };
        buckets[bucket] += sign;
        counts[bucket] += 1;
    }

    for i in 0..EMBEDDING_DIM {
        if counts[i] > 0 {
            buckets[i] /= counts[i] as f64;
        }
    }

    buckets
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_has_fixed_dimension() {
        assert_eq!(extract("Will the Fed cut rates?").len(), EMBEDDING_DIM);
        assert_eq!(extract("").len(), EMBEDDING_DIM);
    }

    #[test]
    fn embedding_is_deterministic_for_identical_input() {
        let q = "Will team A win the championship?";
        assert_eq!(extract(q), extract(q));
    }

    #[test]
    fn embedding_values_are_bounded() {
        for v in extract("a long question with many repeated words words words words") {
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}

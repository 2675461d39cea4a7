//! The model trait each ensemble member implements, plus a reference
//! implementation. Model *training* and the real gradient-boosting
//! artifact format are out of scope for this pipeline (per the design
//! notes) — what the pipeline owns is the loading contract (fail fatally
//! if nothing loads) and the inference contract (deterministic
//! YES-probability in `[0, 1]` for a given `FeatureVector`).

use crate::models::FeatureVector;
use std::fs;
use std::path::Path;

/// A single pre-trained probability model. Implementations must be
/// deterministic: the same `FeatureVector` always yields the same
/// probability.
pub trait ProbabilityModel: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// Reference model: a linear layer over the feature vector followed by a
/// sigmoid, with weights loaded from a JSON file
/// `{"name": ..., "bias": ..., "weights": [...]}`. Stands in for the
/// gradient-boosting artifact the production system would load; the
/// artifact *format* is explicitly out of scope, but the loader's
/// fail-fast behavior on a missing/malformed file is not.
pub struct JsonWeightedModel {
    name: String,
    bias: f64,
    weights: Vec<f64>,
}

#[derive(serde::Deserialize)]
struct JsonModelSpec {
    name: String,
    bias: f64,
    weights: Vec<f64>,
}

impl JsonWeightedModel {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let spec: JsonModelSpec = serde_json::from_str(&contents)?;
        Ok(Self {
            name: spec.name,
            bias: spec.bias,
            weights: spec.weights,
        })
    }

    pub fn from_spec(name: impl Into<String>, bias: f64, weights: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            bias,
            weights,
        }
    }
}

impl ProbabilityModel for JsonWeightedModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .zip(features.values.iter())
            .map(|(w, v)| w * v)
            .sum();
        sigmoid(dot + self.bias)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_is_deterministic_and_bounded() {
        let model = JsonWeightedModel::from_spec("m1", 0.0, vec![1.0, -1.0]);
        let features = FeatureVector {
            names: vec!["a".into(), "b".into()],
            values: vec![2.0, 1.0],
        };
        let p1 = model.predict(&features);
        let p2 = model.predict(&features);
        assert_eq!(p1, p2);
        assert!((0.0..=1.0).contains(&p1));
    }
}

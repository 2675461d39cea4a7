//! C4 ensemble inference: combines the per-model probabilities into a
//! single calibrated probability plus a confidence derived from
//! inter-model agreement.

use super::model::ProbabilityModel;
use crate::errors::PipelineError;
use crate::models::{EnsemblePrediction, FeatureVector};
use std::collections::HashMap;

pub struct Ensemble {
    /// (model, weight) pairs. Weight is applied in the weighted average;
    /// models are kept in load order.
    members: Vec<(Box<dyn ProbabilityModel>, f64)>,
    single_model_confidence_floor: f64,
}

impl Ensemble {
    /// Fails with `ModelLoadFailure` if `members` is empty — the core is
    /// non-operational without at least one loaded model.
    pub fn new(
        members: Vec<(Box<dyn ProbabilityModel>, f64)>,
        single_model_confidence_floor: f64,
    ) -> Result<Self, PipelineError> {
        if members.is_empty() {
            return Err(PipelineError::ModelLoadFailure);
        }
        Ok(Self {
            members,
            single_model_confidence_floor,
        })
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.members.iter().map(|(m, _)| m.name()).collect()
    }

    /// Deterministic for a given feature vector and weight set: ensemble
    /// probability is the weight-normalized average of per-model
    /// probabilities; confidence is `clamp(1 - (max - min), 0, 1)` across
    /// the loaded models, or the configured floor when only one model is
    /// loaded (spread is undefined with a single point).
    pub fn predict(&self, features: &FeatureVector) -> EnsemblePrediction {
        let mut per_model = HashMap::with_capacity(self.members.len());
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut min_p = f64::MAX;
        let mut max_p = f64::MIN;

        for (model, weight) in &self.members {
            let p = model.predict(features);
            per_model.insert(model.name().to_string(), p);
            weighted_sum += p * weight;
            weight_total += weight;
            min_p = min_p.min(p);
            max_p = max_p.max(p);
        }

        let probability = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            per_model.values().sum::<f64>() / per_model.len() as f64
        };

        let confidence = if self.members.len() == 1 {
            self.single_model_confidence_floor
        } else {
            (1.0 - (max_p - min_p)).clamp(0.0, 1.0)
        };

        EnsemblePrediction {
            probability,
            confidence,
            per_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::model::JsonWeightedModel;

    fn features() -> FeatureVector {
        FeatureVector {
            names: vec!["x".into()],
            values: vec![1.0],
        }
    }

    #[test]
    fn empty_member_list_fails_to_load() {
        let result = Ensemble::new(vec![], 0.5);
        assert!(matches!(result, Err(PipelineError::ModelLoadFailure)));
    }

    #[test]
    fn single_model_uses_configured_confidence_floor() {
        let model: Box<dyn ProbabilityModel> =
            Box::new(JsonWeightedModel::from_spec("m1", 0.0, vec![1.0]));
        let ensemble = Ensemble::new(vec![(model, 1.0)], 0.42).unwrap();
        let prediction = ensemble.predict(&features());
        assert_eq!(prediction.confidence, 0.42);
    }

    #[test]
    fn agreeing_models_yield_high_confidence() {
        let m1: Box<dyn ProbabilityModel> = Box::new(JsonWeightedModel::from_spec("m1", 0.0, vec![1.0]));
        let m2: Box<dyn ProbabilityModel> = Box::new(JsonWeightedModel::from_spec("m2", 0.0, vec![1.0]));
        let ensemble = Ensemble::new(vec![(m1, 1.0), (m2, 1.0)], 0.5).unwrap();
        let prediction = ensemble.predict(&features());
        assert!(prediction.confidence > 0.99);
    }

    #[test]
    fn prediction_is_deterministic() {
        let m1: Box<dyn ProbabilityModel> = Box::new(JsonWeightedModel::from_spec("m1", 0.0, vec![1.0]));
        let m2: Box<dyn ProbabilityModel> = Box::new(JsonWeightedModel::from_spec("m2", 1.0, vec![0.5]));
        let ensemble = Ensemble::new(vec![(m1, 2.0), (m2, 1.0)], 0.5).unwrap();
        let p1 = ensemble.predict(&features());
        let p2 = ensemble.predict(&features());
        assert_eq!(p1.probability, p2.probability);
        assert_eq!(p1.confidence, p2.confidence);
    }
}

//! C4 — Feature & Inference Engine's model-ensemble half. The feature
//! half lives in `crate::features`.

pub mod ensemble;
pub mod model;

pub use ensemble::Ensemble;
pub use model::{JsonWeightedModel, ProbabilityModel};

//! C5's signal-gating half. Persistence (the transactional write side of
//! C5) lives in `crate::persistence`.

pub mod gating;

pub use gating::{evaluate, GateInput, GateOutcome};

//! C1 — Run Cycle orchestration.

pub mod runner;

pub use runner::{run_cycle, PipelineContext};

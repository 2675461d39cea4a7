//! Error taxonomy for the prediction pipeline.
//!
//! Mirrors the error kinds a conforming implementation must distinguish:
//! transient upstream failures are logged and tolerated, expected misses
//! are silent, shape mismatches and persistence conflicts fail one market
//! without aborting the cycle, and model load failure is the one fatal
//! condition the process refuses to start without.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("upstream call failed: {0}")]
    UpstreamTransient(String),

    #[error("expected miss from upstream: {0}")]
    UpstreamExpectedMiss(String),

    #[error("feature vector shape mismatch: expected {expected} values, got {actual}")]
    FeatureShapeMismatch { expected: usize, actual: usize },

    #[error("no probability models loaded at startup")]
    ModelLoadFailure,

    #[error("persistence conflict for market {market_id}: {source}")]
    PersistenceConflict {
        market_id: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("per-market task cancelled (timeout exceeded)")]
    CycleCancelled,

    #[error("invalid caller input: {0}")]
    CallerError(String),
}

impl PipelineError {
    /// The log level this error kind should be surfaced at, per the
    /// error-handling policy table: transient upstream noise stays at
    /// debug/warn, expected misses never rise above debug, shape and
    /// persistence failures are worth an operator's attention.
    pub fn severity(&self) -> Severity {
        match self {
            PipelineError::UpstreamTransient(_) => Severity::Warn,
            PipelineError::UpstreamExpectedMiss(_) => Severity::Debug,
            PipelineError::FeatureShapeMismatch { .. } => Severity::Error,
            PipelineError::ModelLoadFailure => Severity::Fatal,
            PipelineError::PersistenceConflict { .. } => Severity::Error,
            PipelineError::CycleCancelled => Severity::Error,
            PipelineError::CallerError(_) => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Warn,
    Error,
    Fatal,
}

pub mod aggregator;
pub mod api;
pub mod config;
pub mod errors;
pub mod features;
pub mod inference;
pub mod market_source;
pub mod middleware;
pub mod models;
pub mod persistence;
pub mod pipeline;
pub mod signals;

use pipeline::PipelineContext;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PipelineContext>,
}

use anyhow::Context;
use prediction_engine::aggregator::{Aggregator, MidpointClient, NewsClient, SocialClient};
use prediction_engine::config::Config;
use prediction_engine::inference::{Ensemble, JsonWeightedModel, ProbabilityModel};
use prediction_engine::market_source::{MetadataApiClient, PriceApiClient};
use prediction_engine::pipeline::PipelineContext;
use prediction_engine::{api, persistence, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, paper_trading = config.paper_trading_mode, "starting up");

    let pool = persistence::connect(&config.database_url, config.pool_size)
        .await
        .context("failed to connect to database")?;

    let ensemble = load_ensemble(&config)?;
    info!(models = ?ensemble.model_names(), "loaded probability models");

    let price_client = PriceApiClient::new(config.price_api_base.clone());
    let metadata_client = MetadataApiClient::new(config.metadata_api_base.clone());

    let aggregator = Aggregator::new(
        NewsClient::new(config.news_api_base.clone(), config.news_api_key.clone()),
        MidpointClient::new(config.midpoint_api_base.clone()),
        SocialClient::new(config.social_enabled),
    );

    let port = config.port;

    let ctx = Arc::new(PipelineContext {
        config,
        pool,
        price_client,
        metadata_client,
        aggregator,
        ensemble,
    });

    let state = AppState { pipeline: ctx };
    let router = api::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_ensemble(config: &Config) -> anyhow::Result<Ensemble> {
    let mut members = Vec::new();

    for (index, path) in config.model_paths.iter().enumerate() {
        match JsonWeightedModel::load(path) {
            Ok(model) => {
                let weight = config.model_weights.get(index).copied().unwrap_or(1.0);
                let model: Box<dyn ProbabilityModel> = Box::new(model);
                members.push((model, weight));
            }
            Err(e) => {
                warn!(path, error = %e, "failed to load model, skipping");
            }
        }
    }

    Ensemble::new(members, config.single_model_confidence_floor).map_err(|e| {
        error!(error = %e, "no probability models loaded, refusing to start");
        anyhow::anyhow!(e)
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

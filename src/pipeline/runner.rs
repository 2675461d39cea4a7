//! C1 — Run Cycle orchestration. Fetches the active market list, then
//! processes each market through the aggregator / feature / inference /
//! persistence chain with bounded concurrency and a per-market timeout.
//! One market's failure is caught and counted; it never aborts the cycle.

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::errors::PipelineError;
use crate::features;
use crate::inference::Ensemble;
use crate::market_source::{self, MetadataApiClient, PriceApiClient};
use crate::models::{CycleReport, Market};
use crate::persistence;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

pub struct PipelineContext {
    pub config: Config,
    pub pool: PgPool,
    pub price_client: PriceApiClient,
    pub metadata_client: MetadataApiClient,
    pub aggregator: Aggregator,
    pub ensemble: Ensemble,
}

/// Runs one prediction cycle over up to `limit` active markets.
///
/// `auto_signals` gates whether passing predictions are turned into
/// persisted Signals; `auto_trades` additionally gates whether passing
/// Signals are materialized into paper/live Trades. Both default to the
/// caller's request; a cycle with `auto_signals = false` still persists
/// every prediction, it just never gates one into a Signal.
pub async fn run_cycle(
    ctx: Arc<PipelineContext>,
    limit: usize,
    auto_signals: bool,
    auto_trades: bool,
) -> CycleReport {
    let markets =
        market_source::fetch_active_markets(&ctx.price_client, &ctx.metadata_client, limit).await;

    let mut report = CycleReport {
        markets_considered: markets.len(),
        ..Default::default()
    };

    let midpoints = prefetch_midpoints(&ctx, &markets).await;

    let semaphore = Arc::new(Semaphore::new(ctx.config.batch_concurrency.max(1)));
    let mut handles = Vec::with_capacity(markets.len());

    for market in markets {
        let ctx = Arc::clone(&ctx);
        let semaphore = Arc::clone(&semaphore);
        let auto_signals = auto_signals;
        let auto_trades = auto_trades;
        let midpoint = midpoints.get(&market.market_id).copied().flatten();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("semaphore closed unexpectedly");

            let market_id = market.market_id.clone();
            let timeout = ctx.config.per_market_timeout;

            match tokio::time::timeout(
                timeout,
                process_market(&ctx, market, midpoint, auto_signals, auto_trades),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => {
                    warn!(market_id, "market processing timed out");
                    Err(PipelineError::CycleCancelled)
                }
            }
        }));
    }

    for handle in handles {
        match handle.await {
            Ok(Ok(outcome)) => {
                report.predictions_saved += 1;
                if outcome.signal_created {
                    report.signals_created += 1;
                }
                if outcome.trade_created {
                    report.trades_created += 1;
                }
            }
            Ok(Err(e)) => {
                log_at_severity(&e);
                report.errors += 1;
            }
            Err(join_err) => {
                error!(error = %join_err, "market processing task panicked");
                report.errors += 1;
            }
        }
    }

    info!(
        markets_considered = report.markets_considered,
        predictions_saved = report.predictions_saved,
        signals_created = report.signals_created,
        trades_created = report.trades_created,
        errors = report.errors,
        "run cycle complete"
    );

    report
}

/// Fetches the orderbook midpoint for every market in the batch
/// concurrently, bounded by `midpoint_concurrency` rather than the
/// per-market `batch_concurrency` semaphore — a batch of hundreds of
/// markets would otherwise serialize midpoint calls behind the full
/// aggregate/feature/inference/persistence pipeline of each market ahead
/// of it.
async fn prefetch_midpoints(ctx: &PipelineContext, markets: &[Market]) -> HashMap<String, Option<f64>> {
    let semaphore = Arc::new(Semaphore::new(ctx.config.midpoint_concurrency.max(1)));
    let mut handles = Vec::with_capacity(markets.len());

    for market in markets {
        let market_id = market.market_id.clone();
        let client = ctx.aggregator.midpoint.clone();
        let semaphore = Arc::clone(&semaphore);

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("semaphore closed unexpectedly");
            let midpoint = client.fetch(&market_id).await;
            (market_id, midpoint)
        }));
    }

    let mut results = HashMap::with_capacity(markets.len());
    for handle in handles {
        match handle.await {
            Ok((market_id, midpoint)) => {
                results.insert(market_id, midpoint);
            }
            Err(join_err) => {
                error!(error = %join_err, "midpoint prefetch task panicked");
            }
        }
    }
    results
}

struct MarketOutcome {
    signal_created: bool,
    trade_created: bool,
}

async fn process_market(
    ctx: &PipelineContext,
    market: Market,
    midpoint: Option<f64>,
    auto_signals: bool,
    auto_trades: bool,
) -> Result<MarketOutcome, PipelineError> {
    let snapshot_time = Utc::now();
    let aggregated = ctx.aggregator.fetch_all_for_market(market.clone(), midpoint).await;
    let feature_vector = features::build_vector(&aggregated, snapshot_time)?;
    let prediction = ctx.ensemble.predict(&feature_vector);

    let persisted = persistence::persist_cycle_result(
        &ctx.pool,
        &market,
        &prediction,
        auto_signals,
        auto_trades,
        &ctx.config,
    )
    .await?;

    Ok(MarketOutcome {
        signal_created: persisted.signal.is_some(),
        trade_created: persisted.trade.is_some(),
    })
}

fn log_at_severity(err: &PipelineError) {
    use crate::errors::Severity;

    match err.severity() {
        Severity::Debug => tracing::debug!(error = %err, "market processing error"),
        Severity::Warn => warn!(error = %err, "market processing error"),
        Severity::Error | Severity::Fatal => error!(error = %err, "market processing error"),
    }
}

//! Game deals watcher binary.
//! Loads config, then polls the forum feed on an interval until Ctrl-C.

use anyhow::{Context, Result};
use game_deals_watcher::ingest::config::load_config_default;
use game_deals_watcher::ingest::scheduler::{spawn_poll_scheduler, PollSchedulerCfg};
use game_deals_watcher::{DealWatcher, NotifierMux};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("game_deals_watcher=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Expose Prometheus metrics when `METRICS_ADDR` is set (e.g. `0.0.0.0:9000`).
fn init_metrics() -> Result<()> {
    let Ok(addr) = std::env::var("METRICS_ADDR") else {
        return Ok(());
    };
    let addr: SocketAddr = addr.parse().context("invalid METRICS_ADDR")?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("prometheus: install exporter")?;
    tracing::info!(%addr, "metrics exporter listening");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();
    init_metrics()?;

    let cfg = load_config_default().context("loading watcher config")?;
    tracing::info!(
        feed = %cfg.feed_url,
        interval_secs = cfg.poll_interval_secs,
        terms = cfg.search_terms.as_ref().map_or(0, Vec::len),
        "starting game deals watcher"
    );

    let watcher = DealWatcher::from_config(&cfg);
    let mux = NotifierMux::from_env();
    let handle = spawn_poll_scheduler(
        PollSchedulerCfg {
            interval_secs: cfg.poll_interval_secs,
        },
        watcher,
        mux,
    );

    tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
    tracing::info!("shutting down");
    handle.abort();
    Ok(())
}

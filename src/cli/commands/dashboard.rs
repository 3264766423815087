//! Dashboard command implementation.

use anyhow::Result;
use coinwatch_config::AppConfig;
use coinwatch_core::traits::PriceSource;
use coinwatch_monitor::Dashboard;
use tracing::info;

use super::{engine, price_source};
use crate::cli::DashboardArgs;

pub async fn run(args: DashboardArgs, config: AppConfig) -> Result<()> {
    let source = price_source(&config, args.data.as_deref())?;
    let engine = engine(&config);
    let clock = config.report.clock;
    let refresh_secs = args.refresh_secs.unwrap_or(config.dashboard.refresh_secs);

    info!(
        source = source.name(),
        refresh_secs,
        assets = source.assets().len(),
        "Starting dashboard"
    );

    let dashboard = Dashboard::new(refresh_secs, config.dashboard.tick_ms);
    tokio::task::spawn_blocking(move || {
        // Every cycle loads a fresh matrix; nothing carries over
        dashboard.run(|| {
            source
                .load()
                .map(|matrix| engine.snapshot(matrix, clock.now()))
        })
    })
    .await??;

    info!("Dashboard closed");
    Ok(())
}

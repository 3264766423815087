//! Schedule command implementation.

use anyhow::Result;
use coinwatch_config::AppConfig;
use coinwatch_report::{PublishPolicy, ReportWriter};
use tracing::{error, info};

use super::report::ReportJob;
use super::{engine, price_source};
use crate::cli::ScheduleArgs;

pub async fn run(args: ScheduleArgs, config: AppConfig) -> Result<()> {
    let clock = config.report.clock;
    let policy = PublishPolicy::new(config.report.publish_hour);
    let output_dir = args.output.unwrap_or_else(|| config.report.output_dir.clone());
    let job = ReportJob {
        source: price_source(&config, args.data.as_deref())?,
        engine: engine(&config),
        writer: ReportWriter::new(output_dir),
        window_hours: config.report.window_hours,
    };

    info!(publish_hour = policy.hour(), "Report scheduler started");

    loop {
        let now = clock.now();
        let next = policy.next_run(now);
        let wait = (next - now).to_std().unwrap_or_default();
        info!(next_run = %next, "Waiting for next report");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Report scheduler stopped");
                return Ok(());
            }
        }

        // A failed run is logged and retried at the next slot
        match job.run(clock.now()) {
            Ok(written) => info!(path = %written.text.display(), "Scheduled report published"),
            Err(e) => error!(error = %format!("{:#}", e), "Scheduled report failed"),
        }
    }
}

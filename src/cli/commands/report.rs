//! Report command implementation.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use coinwatch_config::AppConfig;
use coinwatch_core::traits::PriceSource;
use coinwatch_data::CsvPriceSource;
use coinwatch_indicators::IndicatorEngine;
use coinwatch_report::{DailyReport, PublishPolicy, ReportWriter, WrittenReport};
use std::path::PathBuf;
use tracing::info;

use super::{engine, price_source};
use crate::cli::{OutputFormat, ReportArgs};

pub async fn run(args: ReportArgs, config: AppConfig) -> Result<()> {
    let now = config.report.clock.now();
    let policy = PublishPolicy::new(config.report.publish_hour);

    // Back-dated reports are never gated
    if !args.force && args.date.is_none() && !policy.should_publish(now) {
        info!(
            publish_hour = policy.hour(),
            "Outside the publish hour, skipping report (use --force to override)"
        );
        return Ok(());
    }

    let source = price_source(&config, args.data.as_deref())?;
    let output_dir = args.output.unwrap_or_else(|| config.report.output_dir.clone());
    let job = ReportJob {
        source,
        engine: engine(&config),
        writer: ReportWriter::new(output_dir),
        window_hours: config.report.window_hours,
    };

    let report = job.build(now, args.date)?;
    let written = job.writer.write(&report)?;

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            println!("{}", report.summary());
            print_written(&written);
        }
    }

    Ok(())
}

/// Everything needed to produce one report, reusable across scheduled runs.
pub(crate) struct ReportJob {
    pub source: CsvPriceSource,
    pub engine: IndicatorEngine,
    pub writer: ReportWriter,
    pub window_hours: i64,
}

impl ReportJob {
    pub fn build(&self, now: NaiveDateTime, date: Option<NaiveDate>) -> Result<DailyReport> {
        let matrix = self.source.load().context("Failed to load prices")?;
        let report = match date {
            Some(date) => DailyReport::for_date(matrix, date, now, self.window_hours, &self.engine),
            None => DailyReport::build(matrix, now, self.window_hours, &self.engine),
        };
        info!(
            generated_at = %report.generated_at,
            samples = report.samples,
            "Report built"
        );
        Ok(report)
    }

    pub fn run(&self, now: NaiveDateTime) -> Result<WrittenReport> {
        let report = self.build(now, None)?;
        let written = self
            .writer
            .write(&report)
            .with_context(|| format!("Failed to write report to {}", self.writer.output_dir().display()))?;
        Ok(written)
    }
}

fn print_written(written: &WrittenReport) {
    let mut paths: Vec<&PathBuf> = vec![&written.text, &written.json, &written.price_chart];
    paths.extend(&written.asset_charts);
    println!("Files written:");
    for path in paths {
        println!("  {}", path.display());
    }
}

//! Report output files.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::report::DailyReport;

pub const TEXT_FILE: &str = "daily_report.txt";
pub const JSON_FILE: &str = "daily_report.json";
pub const PRICE_CHART_FILE: &str = "daily_price_chart.csv";

/// Report output errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Paths of the files one report produced.
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub text: PathBuf,
    pub json: PathBuf,
    pub price_chart: PathBuf,
    pub asset_charts: Vec<PathBuf>,
}

/// Writes reports into an output directory, replacing earlier ones.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the text summary, JSON export and chart series.
    pub fn write(&self, report: &DailyReport) -> Result<WrittenReport, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let text = self.write_file(TEXT_FILE, &report.summary())?;
        let json = self.write_file(JSON_FILE, &report.to_json()?)?;
        let price_chart = self.write_file(PRICE_CHART_FILE, &report.price_chart_csv())?;

        let mut asset_charts = Vec::with_capacity(report.charts().len());
        for chart in report.charts() {
            if let Some(csv) = report.asset_chart_csv(&chart.asset) {
                asset_charts.push(self.write_file(&format!("chart_{}.csv", chart.asset), &csv)?);
            }
        }

        info!(
            dir = %self.output_dir.display(),
            charts = asset_charts.len(),
            "Report written"
        );

        Ok(WrittenReport {
            text,
            json,
            price_chart,
            asset_charts,
        })
    }

    fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(name);
        fs::write(&path, contents).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

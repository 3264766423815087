//! Daily report generation.
//!
//! Builds a [`DailyReport`] from a price matrix, renders it as text or
//! JSON, and writes it alongside plot-ready chart series.

mod publish;
mod report;
mod statistics;
mod writer;

pub use publish::PublishPolicy;
pub use report::{AssetOverview, ChartSeries, DailyReport};
pub use statistics::{describe, DescriptiveStats};
pub use writer::{ReportError, ReportWriter, WrittenReport};

//! Logging setup.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Where and how log lines are written.
#[derive(Debug, Clone, Copy)]
pub struct LogOptions<'a> {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: &'a str,
    pub json: bool,
    /// Daily rolling log file, named after this path
    pub file: Option<&'a Path>,
    /// Also log to stderr. Off while the dashboard owns the terminal.
    pub console: bool,
}

/// Setup logging.
///
/// The returned guard flushes the file writer on drop and must be held
/// for as long as logging is needed.
pub fn setup_logging(options: LogOptions<'_>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.level));

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if options.console {
        let layer = if options.json {
            fmt::layer().json().with_writer(io::stderr).boxed()
        } else {
            fmt::layer().pretty().with_writer(io::stderr).boxed()
        };
        layers.push(layer);
    }

    let guard = options.file.map(|path| {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let prefix = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "coinwatch.log".to_string());

        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, prefix));
        let layer = if options.json {
            fmt::layer().json().with_ansi(false).with_writer(writer).boxed()
        } else {
            fmt::layer().with_ansi(false).with_writer(writer).boxed()
        };
        layers.push(layer);
        guard
    });

    tracing_subscriber::registry().with(layers).with(filter).init();

    guard
}

//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The formatter crates only emit events; installing a subscriber is left to
//! the embedding application. This module offers a ready-made one.
//!
//! # Log Levels
//!
//! - `warn`: Skipped rules and unusable bundle entries
//! - `debug`: Pipeline decisions (territory overrides, template fallback)
//! - `trace`: Per-component values (redacted unless `log_data` is enabled)
//!
//! # Usage
//!
//! ```ignore
//! use addrfmt_format::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default().with_level(tracing::Level::DEBUG);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged in place of address data.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events the default filter lets through at the configured level.
const CRATES: [&str; 3] = ["addrfmt_model", "addrfmt_rules", "addrfmt_format"];

/// Returns true if component values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the value when data logging is enabled, otherwise a redacted token.
///
/// Address components identify people and places; they never reach a log
/// unless the application opted in.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (error, warn, info, debug, trace).
    pub level: Level,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path. When set, logs are appended to the file.
    pub log_file: Option<PathBuf>,
    /// Whether component values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_timestamps: false,
            with_target: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    /// Set log level directly.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    /// Enable or disable target (module path) in output.
    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Set output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Enable or disable logging of component values.
    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Install the global subscriber with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    build_subscriber(config, writer).init();
}

/// Build a subscriber without installing it.
///
/// Useful for scoped capture with `tracing::subscriber::with_default`. Unlike
/// [`init_logging_with_writer`], this leaves the data-logging switch alone.
pub fn build_subscriber<W>(config: &LogConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Compact if config.with_timestamps => fmt::layer()
            .compact()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(config.with_target)
            .without_time()
            .boxed(),
        LogFormat::Pretty if config.with_timestamps => fmt::layer()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(config.with_target)
            .without_time()
            .boxed(),
    };

    Box::new(tracing_subscriber::registry().with(layer).with(filter))
}

/// A `MakeWriter` sharing one writer between threads.
///
/// Wraps a log file for [`init_logging`], or an in-memory buffer when tests
/// capture output.
#[derive(Debug, Default)]
pub struct SharedWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> SharedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Lock the underlying writer, e.g. to read a captured buffer.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Write handle returned by [`SharedWriter`].
pub struct SharedWriterGuard<W> {
    inner: Arc<Mutex<W>>,
}

impl<W: Write> Write for SharedWriterGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        guard.flush()
    }
}

impl<'a, W: Write + 'a> MakeWriter<'a> for SharedWriter<W> {
    type Writer = SharedWriterGuard<W>;

    fn make_writer(&'a self) -> Self::Writer {
        SharedWriterGuard {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Other crates stay at warn
        let directives: Vec<String> = std::iter::once("warn".to_string())
            .chain(CRATES.iter().map(|name| format!("{name}={level}")))
            .collect();
        EnvFilter::new(directives.join(","))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_by_default() {
        assert_eq!(redact_value("Warschauer Straße"), REDACTED_VALUE);
    }

    #[test]
    fn test_captures_events() {
        let buffer = SharedWriter::new(Vec::<u8>::new());
        let config = LogConfig::default()
            .with_level(Level::DEBUG)
            .with_ansi(false)
            .with_format(LogFormat::Compact);
        let subscriber = build_subscriber(&config, buffer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(country = "DE", "Template chosen");
        });

        let output = String::from_utf8_lossy(&buffer.lock()).to_string();
        assert!(output.contains("Template chosen"), "{output}");
        assert!(output.contains("country"), "{output}");
    }

    #[test]
    fn test_json_format() {
        let buffer = SharedWriter::new(Vec::<u8>::new());
        let config = LogConfig::default().with_format(LogFormat::Json);
        let subscriber = build_subscriber(&config, buffer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(location = "templates.XX", "Skipping unusable rule");
        });

        let output = String::from_utf8_lossy(&buffer.lock()).to_string();
        let line = output.lines().next().expect("one event");
        let event: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert_eq!(event["level"], "WARN");
        assert_eq!(event["fields"]["location"], "templates.XX");
    }
}

//! # Logging Utilities
//!
//! Logging infrastructure for msprobe using `tracing`.
//!
//! Standard output belongs to the status reports, so every console layer set
//! up here writes to **stderr**. Logs can additionally be mirrored to a
//! daily-rolled file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msprobe_utils::init_logging;
//!
//! // Keep the guard alive for as long as the process logs
//! let _guard = init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=msprobe_core=debug`)
//! - `MSPROBE_LOG_FORMAT`: Set output format (`json` or `pretty`, default: `pretty`)
//! - `MSPROBE_LOG_FILE`: Optional path to log file (if not set, logs only to stderr)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the log output format
pub const LOG_FORMAT_ENV: &str = "MSPROBE_LOG_FORMAT";

/// Environment variable naming an optional log file
pub const LOG_FILE_ENV: &str = "MSPROBE_LOG_FILE";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    Pretty,
    /// JSON format, one object per line
    Json,
}

impl FromStr for LogFormat
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            )),
        }
    }
}

/// Keeps the background log-file writer alive
///
/// Dropping the guard flushes and stops the file writer, so hold it until
/// the process is about to exit. It is empty when no log file is configured.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging with default settings
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: Log level filter (e.g., `debug`, `msprobe_core=debug`)
/// - `MSPROBE_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
/// - `MSPROBE_LOG_FILE`: Optional path to log file
///
/// ## Errors
///
/// Returns an error if:
/// - `MSPROBE_LOG_FORMAT` holds an unknown format
/// - Logging is already initialized
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    init_logging_with(None, format_from_env()?)
}

/// Initialize logging with an explicit level and format
///
/// An explicit level takes precedence over `RUST_LOG`; pass `None` to fall
/// back to `RUST_LOG`, then to `INFO`.
///
/// ## Example
///
/// ```rust,no_run
/// use msprobe_utils::{LogFormat, LogLevel, init_logging_with};
///
/// let _guard = init_logging_with(Some(LogLevel::Debug), LogFormat::Pretty)
///     .expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if logging is already initialized.
pub fn init_logging_with(level: Option<LogLevel>, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    let log_file = env::var(LOG_FILE_ENV).ok().map(PathBuf::from);
    init_logging_internal(format, level.map(Into::into), log_file)
}

/// Read `MSPROBE_LOG_FORMAT`, defaulting to pretty output when unset
///
/// ## Errors
///
/// Returns [`LoggingError::InvalidFormat`] when the variable is set to an
/// unknown format.
pub fn format_from_env() -> Result<LogFormat, LoggingError>
{
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => LogFormat::from_str(&raw).map_err(LoggingError::InvalidFormat),
        Err(_) => Ok(LogFormat::Pretty),
    }
}

/// Build the level filter
///
/// Priority:
/// 1. An explicit level (from the `--log-level` CLI flag)
/// 2. `RUST_LOG`, which also allows module filters like `msprobe_core=debug`
/// 3. `INFO`
fn build_filter(explicit_level: Option<Level>) -> EnvFilter
{
    if let Some(level) = explicit_level {
        EnvFilter::new(level.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// One formatting layer with its own copy of the filter
///
/// Console and file output share timestamps, targets and source locations;
/// only the writer and ANSI colouring differ.
fn format_layer<W>(format: LogFormat, writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339());

    match format {
        LogFormat::Pretty => layer.with_ansi(ansi).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn init_logging_internal(
    format: LogFormat,
    explicit_level: Option<Level>,
    log_file: Option<PathBuf>,
) -> Result<LoggingGuard, LoggingError>
{
    let mut guard = LoggingGuard::default();
    let mut layers = vec![format_layer(format, io::stderr, true, build_filter(explicit_level))];

    if let Some(path) = log_file {
        let appender = tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name().unwrap_or_default(),
        );
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard._file = Some(file_guard);
        layers.push(format_layer(format, writer, false, build_filter(explicit_level)));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;
    Ok(guard)
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),
}

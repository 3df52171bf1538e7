//! # Logging Utilities
//!
//! Logging infrastructure for diegraph using `tracing`.
//!
//! Library crates only emit events through the `tracing` macros; binaries
//! pick a subscriber here. Console output goes to stderr so that anything a
//! command prints on stdout stays machine-readable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diegraph_utils::init_logging;
//!
//! // Reads RUST_LOG, DIEGRAPH_LOG_FORMAT and DIEGRAPH_LOG_FILE
//! let _guard = init_logging().expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: filter directives (e.g. `debug`, `diegraph_core=trace`)
//! - `DIEGRAPH_LOG_FORMAT`: `pretty` (default) or `json`
//! - `DIEGRAPH_LOG_FILE`: optional path of a daily-rolling log file, written
//!   in addition to the console
//!
//! ## Examples
//!
//! ```rust,no_run
//! use diegraph_utils::{LogConfig, LogFormat, LogLevel};
//!
//! // Environment first, command-line flags on top
//! let _guard = LogConfig::from_env()
//!     .with_level(Some(LogLevel::Debug))
//!     .with_format(Some(LogFormat::Json))
//!     .init()
//!     .expect("Failed to initialize logging");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format
pub const LOG_FORMAT_VAR: &str = "DIEGRAPH_LOG_FORMAT";
/// Environment variable naming an optional log file
pub const LOG_FILE_VAR: &str = "DIEGRAPH_LOG_FILE";
/// Standard `tracing` filter variable
pub const FILTER_VAR: &str = "RUST_LOG";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
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
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Resolved logging configuration.
///
/// Filter precedence: an explicit [`level`](Self::with_level) wins over
/// `RUST_LOG` directives, which win over the `info` default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig
{
    format: LogFormat,
    level: Option<LogLevel>,
    directives: Option<String>,
    file: Option<PathBuf>,
}

impl LogConfig
{
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup` instead of the environment.
    ///
    /// An unparseable format falls back to pretty output; empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            format: get(LOG_FORMAT_VAR)
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            level: None,
            directives: get(FILTER_VAR),
            file: get(LOG_FILE_VAR).map(PathBuf::from),
        }
    }

    /// Override the level; `None` keeps what the environment said.
    #[must_use]
    pub fn with_level(mut self, level: Option<LogLevel>) -> Self
    {
        if level.is_some() {
            self.level = level;
        }
        self
    }

    /// Override the format; `None` keeps what the environment said.
    #[must_use]
    pub fn with_format(mut self, format: Option<LogFormat>) -> Self
    {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self
    {
        self.file = file;
        self
    }

    #[must_use]
    pub fn format(&self) -> LogFormat
    {
        self.format
    }

    #[must_use]
    pub fn file(&self) -> Option<&Path>
    {
        self.file.as_deref()
    }

    /// Filter directive string the subscriber will be built with.
    #[must_use]
    pub fn filter_directives(&self) -> String
    {
        match (self.level, &self.directives) {
            (Some(level), _) => Level::from(level).to_string(),
            (None, Some(directives)) => directives.clone(),
            (None, None) => Level::INFO.to_string(),
        }
    }

    fn env_filter(&self) -> EnvFilter
    {
        EnvFilter::try_new(self.filter_directives()).unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    }

    /// Install the global subscriber.
    ///
    /// Keep the returned guard alive for as long as logging is needed: a
    /// file sink flushes when it is dropped.
    ///
    /// ## Errors
    ///
    /// `InitializationFailed` if a global subscriber is already set.
    pub fn init(self) -> Result<LoggingGuard, LoggingError>
    {
        let mut layers: Vec<BoxedLayer> = vec![console_layer(self.format, self.env_filter())];
        let mut guard = None;

        if let Some(file_path) = &self.file {
            let file_appender = tracing_appender::rolling::daily(
                file_path.parent().unwrap_or_else(|| Path::new(".")),
                file_path.file_name().unwrap_or_default(),
            );
            let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
            layers.push(file_layer(self.format, non_blocking, self.env_filter()));
            guard = Some(worker);
        }

        Registry::default()
            .with(layers)
            .try_init()
            .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

        Ok(LoggingGuard { _file: guard })
    }
}

/// Keeps the file sink's background writer alive.
#[derive(Debug)]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// ## Errors
///
/// Returns an error if logging is already initialized.
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    LogConfig::from_env().init()
}

/// Initialize logging with explicit level and format
///
/// `DIEGRAPH_LOG_FILE` is still honoured.
///
/// ## Errors
///
/// Returns an error if logging is already initialized.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    LogConfig::from_env()
        .with_level(Some(level))
        .with_format(Some(format))
        .init()
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(true)
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer(format: LogFormat, writer: NonBlocking, filter: EnvFilter) -> BoxedLayer
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false) // No ANSI in files
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Unknown log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Unknown log level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String>
    {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("dev").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("PROD").unwrap(), LogFormat::Json);
        assert!(matches!(LogFormat::from_str("xml"), Err(LoggingError::InvalidFormat(s)) if s == "xml"));
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(matches!(LogLevel::from_str("loud"), Err(LoggingError::InvalidLevel(_))));
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_config_defaults_without_environment()
    {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config.format(), LogFormat::Pretty);
        assert!(config.file().is_none());
        assert_eq!(config.filter_directives(), "INFO");
    }

    #[test]
    fn test_config_reads_environment()
    {
        let config = LogConfig::from_lookup(lookup(&[
            (FILTER_VAR, "diegraph_core=trace"),
            (LOG_FORMAT_VAR, "json"),
            (LOG_FILE_VAR, "/tmp/diegraph.log"),
        ]));
        assert_eq!(config.format(), LogFormat::Json);
        assert_eq!(config.file(), Some(Path::new("/tmp/diegraph.log")));
        assert_eq!(config.filter_directives(), "diegraph_core=trace");
    }

    #[test]
    fn test_config_bad_format_falls_back_to_pretty()
    {
        let config = LogConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "yaml"), (LOG_FILE_VAR, "  ")]));
        assert_eq!(config.format(), LogFormat::Pretty);
        assert!(config.file().is_none());
    }

    #[test]
    fn test_explicit_level_overrides_directives()
    {
        let config = LogConfig::from_lookup(lookup(&[(FILTER_VAR, "warn")]))
            .with_level(Some(LogLevel::Debug))
            .with_format(None);
        assert_eq!(config.filter_directives(), "DEBUG");
        assert_eq!(config.format(), LogFormat::Pretty);

        let unchanged = LogConfig::from_lookup(lookup(&[(FILTER_VAR, "warn")])).with_level(None);
        assert_eq!(unchanged.filter_directives(), "warn");
    }
}

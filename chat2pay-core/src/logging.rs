//! Structured logging system.
//!
//! Provides tracing-based structured logging with support for:
//! - Multi-level logging (TRACE, DEBUG, INFO, WARN, ERROR)
//! - `RUST_LOG` overrides through `EnvFilter`
//! - Pretty, compact and JSON output

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level: frame-by-frame transport detail.
    Trace,
    /// Debug level: request/response detail.
    Debug,
    /// Info level: connection lifecycle and important events.
    Info,
    /// Warn level: dropped sends, failed opens.
    Warn,
    /// Error level: error information.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable formatted output.
    Pretty,
    /// Compact format.
    Compact,
    /// JSON format for production environments.
    Json,
}

/// Log configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level.
    pub level: LogLevel,
    /// Log format.
    pub format: LogFormat,
    /// Whether to show timestamps.
    pub show_time: bool,
    /// Whether to show thread IDs.
    pub show_thread_ids: bool,
    /// Whether to show target module.
    pub show_target: bool,
    /// Whether to show span events (function enter/exit).
    pub show_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            show_time: true,
            show_thread_ids: false,
            show_target: true,
            show_span_events: false,
        }
    }
}

impl LogConfig {
    /// Creates a log configuration for development environments.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            show_time: true,
            show_thread_ids: false,
            show_target: true,
            show_span_events: true,
        }
    }

    /// Creates a log configuration for production environments.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            show_time: true,
            show_thread_ids: true,
            show_target: true,
            show_span_events: false,
        }
    }

    /// Creates a log configuration for test environments.
    pub fn test() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            show_time: false,
            show_thread_ids: false,
            show_target: false,
            show_span_events: false,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        format!(
            "chat2pay_core={level},chat2pay_api={level},chat2pay_rust={level}",
            level = self.level
        )
    }
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_directive()))
}

fn build_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let span_events = if config.show_span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let filter = env_filter(config);

    match config.format {
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_thread_ids(config.show_thread_ids)
                .with_target(config.show_target)
                .with_span_events(span_events);
            if config.show_time {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_thread_ids(config.show_thread_ids)
                .with_target(config.show_target)
                .with_span_events(span_events);
            if config.show_time {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_thread_ids(config.show_thread_ids)
                .with_target(config.show_target)
                .with_span_events(span_events);
            if config.show_time {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
    }
}

/// Initializes the logging system.
///
/// Panics if a global subscriber is already installed; use
/// [`try_init_logging`] where that can happen.
///
/// ```no_run
/// use chat2pay_core::logging::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::development());
/// ```
pub fn init_logging(config: &LogConfig) {
    tracing_subscriber::registry()
        .with(build_layer(config))
        .init();
}

/// Attempts to initialize the logging system, ignoring duplicate initialization.
///
/// Returns `true` when this call installed the subscriber.
pub fn try_init_logging(config: &LogConfig) -> bool {
    tracing_subscriber::registry()
        .with(build_layer(config))
        .try_init()
        .is_ok()
}

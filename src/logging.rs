// ABOUTME: Logging configuration and structured logging setup for the plugin runtime
// ABOUTME: Configures log levels, formatters, and output destinations via tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tutor Tools Contributors

//! Structured logging configuration

use std::env;
use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{info, warn, Subscriber};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use tutor_core::constants::service_names;
use tutor_core::errors::ToolErrorCode;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events (one per plugin execution)
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to `Pretty`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::TUTOR_TOOLS.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// `ENVIRONMENT=production` turns on source locations and thread ids
    /// regardless of the individual switches.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env_or("ENVIRONMENT", &defaults.environment);
        let production = environment == "production";

        Self {
            level: env_or("RUST_LOG", &defaults.level),
            format: env::var("LOG_FORMAT").map_or(defaults.format, |v| LogFormat::parse(&v)),
            include_location: production || env_present("LOG_INCLUDE_LOCATION"),
            include_thread: production || env_present("LOG_INCLUDE_THREAD"),
            include_spans: env_present("LOG_INCLUDE_SPANS"),
            service_name: env_or("SERVICE_NAME", &defaults.service_name),
            service_version: env_or("SERVICE_VERSION", &defaults.service_version),
            environment,
        }
    }

    fn output_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    {
        let spans = if self.include_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_span_events(spans)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(EnvFilter::new(&self.level))
            .with(self.output_layer())
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Tool plugin runtime logging initialized"
        );
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_present(key: &str) -> bool {
    env::var_os(key).is_some()
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Execution events emitted by the orchestrator.
///
/// Field names are stable so log pipelines can aggregate on `plugin.id` and
/// `error.code`.
pub struct RuntimeLogger;

impl RuntimeLogger {
    /// Gates passed; the handler is about to run
    pub fn log_execution_started(plugin_id: &str, user_id: &str, arguments: Option<&str>) {
        info!(
            plugin.id = %plugin_id,
            user.id = %user_id,
            plugin.arguments = arguments,
            "Tool execution started"
        );
    }

    /// Handler returned a payload
    pub fn log_execution_completed(plugin_id: &str, duration: Duration) {
        info!(
            plugin.id = %plugin_id,
            duration_ms = duration_ms(duration),
            outcome = "success",
            "Tool execution completed"
        );
    }

    /// A gate rejected the call or the handler failed
    pub fn log_execution_failed(
        plugin_id: &str,
        code: ToolErrorCode,
        message: &str,
        duration: Duration,
    ) {
        warn!(
            plugin.id = %plugin_id,
            error.code = code.as_str(),
            error.message = %message,
            duration_ms = duration_ms(duration),
            outcome = "failure",
            "Tool execution failed"
        );
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("whatever"), LogFormat::Pretty);
    }

    #[test]
    fn defaults_name_the_service() {
        let config = LoggingConfig::default();
        assert_eq!(config.service_name, "tutor-tools");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.include_spans);
    }

    #[test]
    fn oversized_durations_saturate() {
        assert_eq!(duration_ms(Duration::from_millis(42)), 42);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }
}

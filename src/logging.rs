// ABOUTME: Logging configuration and structured logging setup for the WHOOP MCP server
// ABOUTME: Sends all log output to stderr because stdout carries the MCP protocol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use std::env;
use std::fmt;
use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::protocol;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `JSON` lines for log collectors
    Json,
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
}

impl LogFormat {
    /// Parse format from string parameter (case-insensitive)
    /// Returns `None` for unrecognized values
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive (e.g. `info`, `whoop_mcp_server=debug`)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Log span open/close events
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// Reads `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION` and
    /// `LOG_INCLUDE_SPANS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Create logging configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|v| v != "false" && v != "0");

        Self {
            level: lookup("RUST_LOG")
                .filter(|level| !level.trim().is_empty())
                .unwrap_or_else(|| "info".into()),
            format: lookup("LOG_FORMAT")
                .as_deref()
                .and_then(LogFormat::from_str_param)
                .unwrap_or_default(),
            include_location: flag("LOG_INCLUDE_LOCATION"),
            include_spans: flag("LOG_INCLUDE_SPANS"),
        }
    }

    /// Replace the output format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter with the configured level plus noise reduction for HTTP internals
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.level)
            .add_directive(
                "hyper=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "hyper_util=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "reqwest=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "rustls=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            LogFormat::Json => {
                let json_layer = tracing_fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()
            }
            LogFormat::Pretty => {
                let pretty_layer = tracing_fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()
            }
            LogFormat::Compact => {
                let compact_layer = tracing_fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()
            }
        };
        installed.context("failed to install tracing subscriber")?;

        info!(
            service.name = protocol::SERVER_NAME,
            service.version = protocol::SERVER_VERSION,
            log.level = %self.level,
            log.format = %self.format,
            "WHOOP MCP server logging initialized"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_defaults() {
        let config = LoggingConfig::from_source(|_| None);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.include_location);
    }

    #[test]
    fn test_from_source_reads_format_and_flags() {
        let config = LoggingConfig::from_source(|key| match key {
            "RUST_LOG" => Some("debug".to_owned()),
            "LOG_FORMAT" => Some("JSON".to_owned()),
            "LOG_INCLUDE_SPANS" => Some("1".to_owned()),
            "LOG_INCLUDE_LOCATION" => Some("false".to_owned()),
            _ => None,
        });
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.include_spans);
        assert!(!config.include_location);
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        assert_eq!(LogFormat::from_str_param("xml"), None);
        let config = LoggingConfig::from_source(|key| {
            (key == "LOG_FORMAT").then(|| "xml".to_owned())
        });
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_filter_quiets_http_internals() {
        let filter = LoggingConfig::default().env_filter().to_string();
        assert!(filter.contains("hyper=warn"));
        assert!(filter.contains("reqwest=warn"));
    }
}

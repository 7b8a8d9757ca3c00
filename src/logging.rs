// ABOUTME: Logging configuration and structured logging setup for the employ server
// ABOUTME: Selects level and output format from the environment and installs the tracing subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup

use std::env;
use std::io;

use anyhow::{anyhow, Result};
use employ_core::constants::service_names;
use serde_json::json;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{DeploymentType, LogLevel};

/// Crates whose chatter is capped regardless of `RUST_LOG`
const NOISE_DIRECTIVES: &[&str] = &[
    "hyper=warn",
    "hyper::proto=warn",
    "sqlx=info",
    "sqlx::query=warn",
    "tower_http=info",
];

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
    /// Parse a `LOG_FORMAT` value; anything unknown is pretty
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: LogLevel,
    /// Raw `RUST_LOG` directive, if set
    pub directive: Option<String>,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Deployment environment
    pub environment: DeploymentType,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            directive: None,
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: service_names::EMPLOY_SERVER.into(),
            environment: DeploymentType::Development,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// Production deployments default to JSON output with source locations.
    #[must_use]
    pub fn from_env(environment: DeploymentType) -> Self {
        let directive = env::var("RUST_LOG").ok().filter(|v| !v.trim().is_empty());
        let level = directive
            .as_deref()
            .map_or(LogLevel::Info, LogLevel::from_str_or_default);

        let is_production = environment.is_production();
        let format = env::var("LOG_FORMAT").map_or_else(
            |_| {
                if is_production {
                    LogFormat::Json
                } else {
                    LogFormat::Pretty
                }
            },
            |name| LogFormat::from_name(&name),
        );

        Self {
            level,
            directive,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::EMPLOY_SERVER.into()),
            environment,
        }
    }

    /// Filter built from `RUST_LOG` (or the level) plus the noise directives
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let base = self
            .directive
            .as_deref()
            .map_or_else(|| self.level.to_string(), str::to_owned);

        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level.to_tracing_level()).into())
            .parse_lossy(base);
        for directive in NOISE_DIRECTIVES {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
        filter
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
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stdout),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Employ server starting up"
        );

        let logging_summary = json!({
            "level": self.level.to_string(),
            "directive": self.directive,
            "format": format!("{:?}", self.format),
            "location": self.include_location,
            "spans": self.include_spans,
        });
        info!("Logging configured: {}", logging_summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_names() {
        assert_eq!(LogFormat::from_name("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_name("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_name("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn test_filter_includes_noise_directives() {
        let config = LoggingConfig {
            directive: Some("employ_server=debug".to_owned()),
            ..LoggingConfig::default()
        };
        let rendered = config.env_filter().to_string();

        assert!(rendered.contains("employ_server=debug"));
        assert!(rendered.contains("hyper=warn"));
        assert!(rendered.contains("tower_http=info"));
    }
}

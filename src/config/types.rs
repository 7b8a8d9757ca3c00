// ABOUTME: Core configuration type definitions for deployment, transport, GraphQL and logging
// ABOUTME: Contains DeploymentType, Protocol, GraphQLFramework and LogLevel enums used across config modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::section::SettingsEnum;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level - only critical errors
    Error,
    /// Warning level - potential issues
    Warn,
    /// Info level - normal operational messages (default)
    #[default]
    Info,
    /// Debug level - detailed debugging information
    Debug,
    /// Trace level - very verbose tracing
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info, // Default fallback (including "info")
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment; most health rules only fire in production
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    /// Local development (default)
    #[default]
    Development,
    /// Automated test runs
    Testing,
    /// Production with stricter security
    Production,
}

impl DeploymentType {
    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }


}

impl SettingsEnum for DeploymentType {
    const NAMES: &'static [&'static str] = &["dev", "development", "test", "testing", "prod", "production"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "dev" | "development" => Some(Self::Development),
            "test" | "testing" => Some(Self::Testing),
            "prod" | "production" => Some(Self::Production),
            _ => None,
        }
    }
}

impl Display for DeploymentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Testing => write!(f, "testing"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Transport protocol the server is exposed with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain HTTP
    #[default]
    Http,
    /// HTTP over TLS
    Https,
}

impl Protocol {
    /// Whether traffic is encrypted in transit
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        matches!(self, Self::Https)
    }
}

impl SettingsEnum for Protocol {
    const NAMES: &'static [&'static str] = &["http", "https"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            _ => None,
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
        }
    }
}

/// GraphQL engine serving the `/graphql` endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphQLFramework {
    /// No GraphQL endpoint is mounted
    #[default]
    Disabled,
    /// `async-graphql` engine
    AsyncGraphql,
    /// `juniper` engine
    Juniper,
}

impl GraphQLFramework {
    /// Whether an engine is mounted
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl SettingsEnum for GraphQLFramework {
    const NAMES: &'static [&'static str] = &["disabled", "async_graphql", "juniper"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "disabled" | "none" => Some(Self::Disabled),
            "async_graphql" | "async-graphql" => Some(Self::AsyncGraphql),
            "juniper" => Some(Self::Juniper),
            _ => None,
        }
    }
}

impl Display for GraphQLFramework {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::AsyncGraphql => write!(f, "async_graphql"),
            Self::Juniper => write!(f, "juniper"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info); // Default fallback
    }

    #[test]
    fn test_deployment_type_aliases() {
        assert_eq!(
            DeploymentType::from_name("prod"),
            Some(DeploymentType::Production)
        );
        assert_eq!(
            DeploymentType::from_name("testing"),
            Some(DeploymentType::Testing)
        );
        assert_eq!(DeploymentType::from_name("staging"), None);
        assert!(DeploymentType::Production.is_production());
    }

    #[test]
    fn test_framework_names_round_trip_through_display() {
        for framework in [
            GraphQLFramework::Disabled,
            GraphQLFramework::AsyncGraphql,
            GraphQLFramework::Juniper,
        ] {
            assert_eq!(
                GraphQLFramework::from_name(&framework.to_string()),
                Some(framework)
            );
        }
        assert!(!GraphQLFramework::Disabled.is_enabled());
    }
}

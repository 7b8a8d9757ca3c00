// ABOUTME: Structured errors produced while reading and validating configuration sections
// ABOUTME: Every variant names the dotted path that failed and maps onto a CFG.* error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use employ_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Result type for configuration resolution
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a configuration tree could not be turned into settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required key is absent
    #[error("Missing configuration key '{path}'")]
    MissingKey {
        /// Full dotted path
        path: String,
    },
    /// The text could not be coerced into the field's type
    #[error("Invalid value '{value}' for '{path}': expected {expected}")]
    InvalidValue {
        /// Full dotted path
        path: String,
        /// Raw value found in the tree
        value: String,
        /// Human-readable expected type
        expected: String,
    },
    /// An enumeration value matched none of the declared members
    #[error("Invalid value '{value}' for '{path}': expected one of [{expected}]")]
    InvalidEnum {
        /// Full dotted path
        path: String,
        /// Raw value found in the tree
        value: String,
        /// Accepted names, comma separated
        expected: String,
    },
    /// A parsed value violates a field rule
    #[error("Invalid setting '{path}': {reason}")]
    Invariant {
        /// Full dotted path
        path: String,
        /// Rule that was violated
        reason: String,
    },
    /// The declared section list did not produce this section
    #[error("Configuration section '{0}' was not resolved")]
    MissingSection(&'static str),
    /// The raw source (file, YAML) could not be read
    #[error("Failed to read configuration source: {0}")]
    Source(String),
}

impl ConfigError {
    /// Rule violation on a field, relative to the record being validated
    pub fn invariant(field: &str, reason: impl Into<String>) -> Self {
        Self::Invariant {
            path: field.to_owned(),
            reason: reason.into(),
        }
    }

    /// Prefix the path of an invariant violation with the section it was found in
    #[must_use]
    pub fn within(self, section_path: &str) -> Self {
        match self {
            Self::Invariant { path, reason } if !section_path.is_empty() => Self::Invariant {
                path: format!("{section_path}.{path}"),
                reason,
            },
            other => other,
        }
    }

    /// Fully-qualified code from the `CFG.` taxonomy group
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingKey { .. } => "CFG.01",
            Self::InvalidValue { .. } => "CFG.02",
            Self::InvalidEnum { .. } => "CFG.03",
            Self::Invariant { .. } => "CFG.04",
            Self::MissingSection(_) => "CFG.05",
            Self::Source(_) => "CFG.06",
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let message = format!("{} {error}", error.code());
        match error {
            ConfigError::MissingKey { .. } | ConfigError::MissingSection(_) => {
                Self::new(ErrorCode::ConfigMissing, message)
            }
            ConfigError::InvalidValue { .. }
            | ConfigError::InvalidEnum { .. }
            | ConfigError::Invariant { .. } => Self::new(ErrorCode::ConfigInvalid, message),
            ConfigError::Source(_) => Self::config(message),
        }
    }
}

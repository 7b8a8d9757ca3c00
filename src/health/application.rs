// ABOUTME: Application health check for API version and documentation exposure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use crate::config::AppSettings;

/// Application portion of the health report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCheck {
    /// Public API version
    pub api_version: String,
    /// Documentation routes served
    pub docs_enabled: bool,
    /// Findings
    #[serde(skip)]
    pub errors: Vec<String>,
}

impl ApplicationCheck {
    /// Evaluate the application rules
    #[must_use]
    pub fn evaluate(settings: &AppSettings) -> Self {
        let api_version = settings.deployment().api_version.clone();
        let docs_enabled = settings.docs().enabled;
        let mut errors = Vec::new();

        if settings.deployment().deployment_type.is_production() && docs_enabled {
            errors.push("API documentation is enabled in production.".to_owned());
        }
        if api_version.trim().is_empty() {
            errors.push("API version is blank.".to_owned());
        }

        Self {
            api_version,
            docs_enabled,
            errors,
        }
    }
}

// ABOUTME: Security health check reporting authentication mechanisms and rate limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use employ_core::constants::endpoints::HEALTH_CHECK;

use crate::config::AppSettings;

/// Security portion of the health report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCheck {
    /// JWT authentication active
    pub jwt_enabled: bool,
    /// Basic authentication active
    pub basic_auth_enabled: bool,
    /// Public API requests per refill
    pub public_api_rate_limit: i32,
    /// Public API refill period
    pub public_api_rate_refill_ms: i64,
    /// Token issuance requests per refill
    pub new_token_rate_limit: i32,
    /// Token issuance refill period
    pub new_token_rate_refill_ms: i64,
    /// Findings
    #[serde(skip)]
    pub errors: Vec<String>,
}

impl SecurityCheck {
    /// Evaluate the security rules
    #[must_use]
    pub fn evaluate(settings: &AppSettings) -> Self {
        let security = settings.security();
        let mut errors = Vec::new();

        if !security.jwt.is_enabled && !security.basic_auth.is_enabled {
            errors.push(
                "No security mechanism is enabled, enable JWT or basic authentication.".to_owned(),
            );
        }
        let production = settings.deployment().deployment_type.is_production();
        if production && !security.use_secure_connection {
            errors.push("Secure connection is disabled in production.".to_owned());
        }
        // Basic auth is the only guard on the diagnostic route
        if production && !security.basic_auth.is_enabled {
            errors.push(format!(
                "Diagnostic endpoint {HEALTH_CHECK} is unauthenticated in production, enable basic authentication."
            ));
        }

        let constraints = &security.constraints;
        Self {
            jwt_enabled: security.jwt.is_enabled,
            basic_auth_enabled: security.basic_auth.is_enabled,
            public_api_rate_limit: constraints.public_api.limit,
            public_api_rate_refill_ms: constraints.public_api.refill_ms,
            new_token_rate_limit: constraints.new_token.limit,
            new_token_rate_refill_ms: constraints.new_token.refill_ms,
            errors,
        }
    }
}

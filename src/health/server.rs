// ABOUTME: Server health check covering deployment mode, transport and CORS exposure
// ABOUTME: Production-only rules flag development mode, plain http and permissive CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::config::{AppSettings, DeploymentType, Protocol};

/// Server portion of the health report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCheck {
    /// Configured machine id
    pub machine_id: u16,
    /// Deployment environment
    pub environment_type: DeploymentType,
    /// Whether development mode is on
    pub development_mode_enabled: bool,
    /// Transport protocol
    pub protocol: Protocol,
    /// Bind host
    pub host: String,
    /// CORS allowed hosts
    pub allowed_hosts: Vec<String>,
    /// Evaluation time, UTC
    pub utc: DateTime<Utc>,
    /// Evaluation time, server local zone
    pub local: DateTime<Local>,
    /// Findings
    #[serde(skip)]
    pub errors: Vec<String>,
}

impl ServerCheck {
    /// Evaluate the server rules at `now`
    #[must_use]
    pub fn evaluate(settings: &AppSettings, now: DateTime<Utc>) -> Self {
        let deployment = settings.deployment();
        let production = deployment.deployment_type.is_production();
        let mut errors = Vec::new();

        if production && settings.server().development {
            errors.push("Development mode is enabled in production.".to_owned());
        }
        if production && !deployment.protocol.is_secure() {
            errors.push(format!(
                "Server protocol is {} in production, https is required.",
                deployment.protocol
            ));
        }
        if production && settings.cors().allows_all_hosts() {
            errors.push("CORS is allowing all hosts in production.".to_owned());
        }
        if deployment.host.trim().is_empty() {
            errors.push("Server host is blank.".to_owned());
        }

        Self {
            machine_id: settings.server().machine_id,
            environment_type: deployment.deployment_type,
            development_mode_enabled: settings.server().development,
            protocol: deployment.protocol,
            host: deployment.host.clone(),
            allowed_hosts: settings.cors().allowed_hosts.clone(),
            utc: now,
            local: now.with_timezone(&Local),
            errors,
        }
    }
}

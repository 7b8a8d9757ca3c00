// ABOUTME: Server and deployment settings sections
// ABOUTME: Machine identity, development mode, deployment type, transport protocol and bind address
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use employ_core::constants::snowflake::MAX_MACHINE_ID;
use serde::Serialize;

use super::error::{ConfigError, ConfigResult};
use super::section::{require_non_blank, require_positive, ConfigSection, Section, SettingsRecord};
use super::types::{DeploymentType, Protocol};

/// Process-level server settings (`server`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    /// Development mode switch (verbose errors, relaxed checks)
    pub development: bool,
    /// Machine id embedded in generated Snowflake ids
    pub machine_id: u16,
}

impl SettingsRecord for ServerSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            development: section.boolean_or("development", false)?,
            machine_id: section.parse("machine_id")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.machine_id > MAX_MACHINE_ID {
            return Err(ConfigError::invariant(
                "machine_id",
                format!("must be between 0 and {MAX_MACHINE_ID}, got {}", self.machine_id),
            ));
        }
        Ok(())
    }
}

impl ConfigSection for ServerSettings {
    const PATH: &'static str = "server";
}

/// Where and how the server is deployed (`deployment`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentSettings {
    /// Deployment environment
    pub deployment_type: DeploymentType,
    /// Transport protocol
    pub protocol: Protocol,
    /// Bind host
    pub host: String,
    /// Plain HTTP port
    pub port: u16,
    /// TLS port
    pub ssl_port: u16,
    /// Public API version string
    pub api_version: String,
}

impl DeploymentSettings {
    /// Port matching the configured protocol
    #[must_use]
    pub const fn active_port(&self) -> u16 {
        if self.protocol.is_secure() {
            self.ssl_port
        } else {
            self.port
        }
    }

    /// `host:port` of the active listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.active_port())
    }
}

impl SettingsRecord for DeploymentSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            deployment_type: section.enumeration("type")?,
            protocol: section.enumeration("protocol")?,
            host: section.string("host")?,
            port: section.parse("port")?,
            ssl_port: section.parse_or("ssl_port", 8443)?,
            api_version: section.string("api_version")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_non_blank("host", &self.host)?;
        require_positive("port", self.port)?;
        require_positive("ssl_port", self.ssl_port)?;
        require_non_blank("api_version", &self.api_version)
    }
}

impl ConfigSection for DeploymentSettings {
    const PATH: &'static str = "deployment";
}

// ABOUTME: Server context for dependency injection of resolved settings and runtime services
// ABOUTME: Built once at startup from the SettingsCell and shared with every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use employ_core::errors::{AppError, AppResult};
use tracing::info;

use crate::config::{AppSettings, ConfigTree, SettingsCell};
use crate::database::{DatabaseProbe, SqlitePoolProbe};
use crate::health::HealthChecker;
use crate::snowflake::SnowflakeGenerator;

/// Shared state handed to routes and middleware
///
/// # Dependencies
/// - `settings`: resolved, immutable application settings
/// - `snowflake`: id generator keyed by the configured machine id
/// - `health_checker`: diagnostic report builder
#[derive(Clone)]
pub struct ServerContext {
    settings: Arc<AppSettings>,
    snowflake: Arc<SnowflakeGenerator>,
    health_checker: HealthChecker,
}

impl ServerContext {
    /// Assemble a context from already built parts
    #[must_use]
    pub fn new(
        settings: Arc<AppSettings>,
        database: Arc<dyn DatabaseProbe>,
        snowflake: Arc<SnowflakeGenerator>,
    ) -> Self {
        let health_checker =
            HealthChecker::new(Arc::clone(&settings), database, Arc::clone(&snowflake));
        Self {
            settings,
            snowflake,
            health_checker,
        }
    }

    /// Resolve settings through `cell` and build the runtime services
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the database url
    /// cannot be turned into a pool
    pub fn bootstrap(cell: &SettingsCell, tree: &ConfigTree) -> AppResult<Self> {
        let settings = cell.get_or_resolve(tree).map_err(AppError::from)?;
        let deployment_type = settings.deployment().deployment_type;

        let database = SqlitePoolProbe::from_settings(settings.database(), deployment_type)?;
        let snowflake = SnowflakeGenerator::new(settings.server().machine_id)?;
        info!(
            machine_id = snowflake.machine_id(),
            datasource = %settings.database().url,
            "Runtime services initialized"
        );

        Ok(Self::new(settings, Arc::new(database), Arc::new(snowflake)))
    }

    /// Resolved settings
    #[must_use]
    pub const fn settings(&self) -> &Arc<AppSettings> {
        &self.settings
    }

    /// Id generator
    #[must_use]
    pub const fn snowflake(&self) -> &Arc<SnowflakeGenerator> {
        &self.snowflake
    }

    /// Health checker
    #[must_use]
    pub const fn health_checker(&self) -> &HealthChecker {
        &self.health_checker
    }
}

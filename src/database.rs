// ABOUTME: Persistence health probe backed by an sqlx SQLite pool
// ABOUTME: Folds connectivity failures and risky deployment choices into a DatabaseCheck report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::debug;

use crate::config::{DatabaseSettings, DeploymentType};
use employ_core::errors::{AppError, AppResult};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Health report of the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    /// Whether a trivial query succeeded
    pub alive: bool,
    /// Connection string the pool targets
    pub datasource: String,
    /// Configured pool size
    pub connection_pool_size: u32,
    /// Findings
    pub errors: Vec<String>,
}

/// Something able to report on the database
///
/// Implementations never fail; problems are reported as `errors` entries.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Run the probe
    async fn check(&self) -> DatabaseCheck;
}

/// Build a pool that connects on first use
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed
pub fn connect_lazy_pool(settings: &DatabaseSettings) -> AppResult<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(settings.connection_pool_size)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(&settings.url.to_connection_string())
        .map_err(|e| AppError::database(format!("Invalid database url: {e}")).with_source(e))
}

/// Probe running `SELECT 1` against a SQLite pool
#[derive(Debug, Clone)]
pub struct SqlitePoolProbe {
    pool: SqlitePool,
    settings: DatabaseSettings,
    deployment_type: DeploymentType,
}

impl SqlitePoolProbe {
    /// Wrap an existing pool
    #[must_use]
    pub const fn new(
        pool: SqlitePool,
        settings: DatabaseSettings,
        deployment_type: DeploymentType,
    ) -> Self {
        Self {
            pool,
            settings,
            deployment_type,
        }
    }

    /// Build a lazily connecting pool from settings and wrap it
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed
    pub fn from_settings(
        settings: &DatabaseSettings,
        deployment_type: DeploymentType,
    ) -> AppResult<Self> {
        let pool = connect_lazy_pool(settings)?;
        Ok(Self::new(pool, settings.clone(), deployment_type))
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProbe for SqlitePoolProbe {
    async fn check(&self) -> DatabaseCheck {
        let mut errors = Vec::new();

        let alive = match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Database probe query failed");
                errors.push(format!("Database is not reachable: {e}"));
                false
            }
        };

        if self.deployment_type.is_production() && self.settings.url.is_memory() {
            errors.push(
                "Database is in-memory in production, data will be lost on restart.".to_owned(),
            );
        }

        DatabaseCheck {
            alive,
            datasource: self.settings.url.to_connection_string(),
            connection_pool_size: self.settings.connection_pool_size,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseUrl;

    fn memory_settings() -> DatabaseSettings {
        DatabaseSettings {
            url: DatabaseUrl::Memory,
            connection_pool_size: 1,
            transaction_max_attempts: 3,
            warn_long_query_duration_ms: 3_500,
        }
    }

    #[tokio::test]
    async fn test_memory_database_is_alive() {
        let probe =
            SqlitePoolProbe::from_settings(&memory_settings(), DeploymentType::Development)
                .unwrap();
        let check = probe.check().await;

        assert!(check.alive);
        assert!(check.errors.is_empty());
        assert_eq!(check.datasource, "sqlite::memory:");
        assert_eq!(check.connection_pool_size, 1);
    }

    #[tokio::test]
    async fn test_memory_database_flagged_in_production() {
        let probe =
            SqlitePoolProbe::from_settings(&memory_settings(), DeploymentType::Production)
                .unwrap();
        let check = probe.check().await;

        assert!(check.alive);
        assert_eq!(check.errors.len(), 1);
        assert!(check.errors[0].contains("in-memory"));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let settings = DatabaseSettings {
            url: DatabaseUrl::SQLite {
                path: dir.path().join("missing").join("employ.db"),
            },
            ..memory_settings()
        };
        let probe = SqlitePoolProbe::from_settings(&settings, DeploymentType::Development).unwrap();
        let check = probe.check().await;

        assert!(!check.alive);
        assert!(check.errors[0].starts_with("Database is not reachable"));
    }
}

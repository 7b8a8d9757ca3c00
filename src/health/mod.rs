// ABOUTME: Health check aggregation merging server, security, database, application, GraphQL and id checks
// ABOUTME: Produces a fresh diagnostic report per call; findings are data, never errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Diagnostic health report
//!
//! Every check is evaluated from the resolved [`AppSettings`] (plus live
//! runtime state for the database and id generator) and records rule
//! violations as strings. [`HealthCheckReport::assemble`] concatenates them;
//! an empty result is replaced by [`NO_ERRORS_DETECTED`].

/// Application check
pub mod application;
/// GraphQL check
pub mod graphql;
/// Security check
pub mod security;
/// Server check
pub mod server;

use std::sync::Arc;

use chrono::Utc;
use employ_core::constants::health::{NO_ENDPOINTS_DETECTED, NO_ERRORS_DETECTED};
use serde::Serialize;
use tracing::{info, warn};

pub use application::ApplicationCheck;
pub use graphql::GraphQLCheck;
pub use security::SecurityCheck;
pub use server::ServerCheck;

use crate::config::AppSettings;
use crate::database::{DatabaseCheck, DatabaseProbe};
use crate::snowflake::{SnowflakeCheck, SnowflakeGenerator};

/// Point-in-time diagnostic snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckReport {
    /// Merged findings; never empty
    pub errors: Vec<String>,
    /// Server check
    pub server: ServerCheck,
    /// Security check
    pub security: SecurityCheck,
    /// Database check
    pub database: DatabaseCheck,
    /// Application check
    pub application: ApplicationCheck,
    /// GraphQL check
    #[serde(rename = "graphQL")]
    pub graphql: GraphQLCheck,
    /// Id generator check
    pub snowflake: SnowflakeCheck,
    /// Registered endpoint paths
    pub endpoints: Vec<String>,
}

impl HealthCheckReport {
    /// Merge evaluated checks and the endpoint inventory into one report
    #[must_use]
    pub fn assemble(
        server: ServerCheck,
        security: SecurityCheck,
        database: DatabaseCheck,
        application: ApplicationCheck,
        graphql: GraphQLCheck,
        snowflake: SnowflakeCheck,
        endpoints: Vec<String>,
    ) -> Self {
        let mut errors: Vec<String> = [
            &server.errors,
            &security.errors,
            &database.errors,
            &application.errors,
            &graphql.errors,
            &snowflake.errors,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        if endpoints.is_empty() {
            errors.push(NO_ENDPOINTS_DETECTED.to_owned());
        }
        if errors.is_empty() {
            errors.push(NO_ERRORS_DETECTED.to_owned());
        }

        Self {
            errors,
            server,
            security,
            database,
            application,
            graphql,
            snowflake,
            endpoints,
        }
    }

    /// Whether the only entry is the all-clear sentinel
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.len() == 1 && self.errors[0] == NO_ERRORS_DETECTED
    }
}

/// Runs every check against shared settings and runtime collaborators
#[derive(Clone)]
pub struct HealthChecker {
    settings: Arc<AppSettings>,
    database: Arc<dyn DatabaseProbe>,
    snowflake: Arc<SnowflakeGenerator>,
}

impl HealthChecker {
    /// Create a checker
    #[must_use]
    pub fn new(
        settings: Arc<AppSettings>,
        database: Arc<dyn DatabaseProbe>,
        snowflake: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            settings,
            database,
            snowflake,
        }
    }

    /// Evaluate every check now; results are never cached
    pub async fn check(&self, endpoints: &[String]) -> HealthCheckReport {
        info!("Performing configuration health check");
        let settings = self.settings.as_ref();

        let report = HealthCheckReport::assemble(
            ServerCheck::evaluate(settings, Utc::now()),
            SecurityCheck::evaluate(settings),
            self.database.check().await,
            ApplicationCheck::evaluate(settings),
            GraphQLCheck::evaluate(settings),
            self.snowflake.health_check(),
            endpoints.to_vec(),
        );

        if !report.is_clean() {
            for finding in &report.errors {
                warn!(finding = %finding, "Health check finding");
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::settings_with;
    use async_trait::async_trait;

    struct FixedProbe(Vec<String>);

    #[async_trait]
    impl DatabaseProbe for FixedProbe {
        async fn check(&self) -> DatabaseCheck {
            DatabaseCheck {
                alive: self.0.is_empty(),
                datasource: "sqlite::memory:".to_owned(),
                connection_pool_size: 1,
                errors: self.0.clone(),
            }
        }
    }

    fn checker(overrides: &[(&str, &str)], database_errors: &[&str]) -> HealthChecker {
        HealthChecker::new(
            Arc::new(settings_with(overrides)),
            Arc::new(FixedProbe(
                database_errors.iter().map(|e| (*e).to_owned()).collect(),
            )),
            Arc::new(SnowflakeGenerator::new(7).unwrap()),
        )
    }

    fn endpoints() -> Vec<String> {
        vec!["/health".to_owned()]
    }

    #[tokio::test]
    async fn test_clean_report_has_sentinel() {
        let report = checker(&[], &[]).check(&endpoints()).await;

        assert_eq!(report.errors, vec![NO_ERRORS_DETECTED]);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_missing_endpoints_is_a_finding() {
        let report = checker(&[], &[]).check(&[]).await;

        assert_eq!(report.errors, vec![NO_ENDPOINTS_DETECTED]);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_findings_keep_check_order() {
        let report = checker(
            &[
                ("deployment.type", "production"),
                ("cors.allowed_hosts", "*"),
                ("docs.enabled", "true"),
            ],
            &["Database is not reachable: boom"],
        )
        .check(&[])
        .await;

        assert_eq!(
            report.errors,
            vec![
                "CORS is allowing all hosts in production.",
                "Database is not reachable: boom",
                "API documentation is enabled in production.",
                NO_ENDPOINTS_DETECTED,
            ]
        );
    }

    #[tokio::test]
    async fn test_serializes_with_report_field_names() {
        let report = checker(&[], &[]).check(&endpoints()).await;
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["graphQL"]["framework"], "async_graphql");
        assert_eq!(json["server"]["machineId"], 7);
        assert_eq!(json["security"]["publicApiRateLimit"], 100);
        assert_eq!(json["application"]["apiVersion"], "v1");
        assert_eq!(json["database"]["connectionPoolSize"], 1);
        assert_eq!(json["endpoints"][0], "/health");
        assert!(json["server"].get("errors").is_none());
    }
}

// ABOUTME: GraphQL health check mirroring the configured engine and its developer tooling
// ABOUTME: Flags playground and schema dumping in production and inconsistent combinations anywhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use crate::config::{AppSettings, GraphQLFramework};

/// GraphQL portion of the health report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLCheck {
    /// Whether an engine is mounted
    pub enabled: bool,
    /// Configured engine
    pub framework: GraphQLFramework,
    /// Playground exposure
    pub playground: bool,
    /// Schema dumping
    pub dump_schema: bool,
    /// Schema dump destination
    pub schema_path: String,
    /// Findings
    #[serde(skip)]
    pub errors: Vec<String>,
}

impl GraphQLCheck {
    /// Evaluate the GraphQL rules
    #[must_use]
    pub fn evaluate(settings: &AppSettings) -> Self {
        let graphql = settings.graphql();
        let production = settings.deployment().deployment_type.is_production();
        let mut errors = Vec::new();

        if production && graphql.playground {
            errors.push("GraphQL playground is enabled in production.".to_owned());
        }
        if production && graphql.dump_schema {
            errors.push("GraphQL schema dumping is enabled in production.".to_owned());
        }
        if !graphql.is_enabled() && graphql.playground {
            errors.push("GraphQL playground is enabled while GraphQL is disabled.".to_owned());
        }
        if graphql.dump_schema && graphql.schema_path.trim().is_empty() {
            errors.push("GraphQL schema dumping is enabled without a schema path.".to_owned());
        }

        Self {
            enabled: graphql.is_enabled(),
            framework: graphql.framework,
            playground: graphql.playground,
            dump_schema: graphql.dump_schema,
            schema_path: graphql.schema_path.clone(),
            errors,
        }
    }
}

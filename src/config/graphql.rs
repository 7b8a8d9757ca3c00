// ABOUTME: GraphQL settings section selecting the engine and its developer tooling
// ABOUTME: Schema dumping requires a target path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use super::error::{ConfigError, ConfigResult};
use super::section::{ConfigSection, Section, SettingsRecord};
use super::types::GraphQLFramework;

/// GraphQL endpoint settings (`graphql`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQLSettings {
    /// Engine serving GraphQL, or disabled
    pub framework: GraphQLFramework,
    /// Interactive playground exposure
    pub playground: bool,
    /// Write the schema to `schema_path` at startup
    pub dump_schema: bool,
    /// Destination of the dumped schema
    pub schema_path: String,
}

impl GraphQLSettings {
    /// Whether a GraphQL engine is mounted
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.framework.is_enabled()
    }
}

impl SettingsRecord for GraphQLSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            framework: section.enumeration("framework")?,
            playground: section.boolean_or("playground", false)?,
            dump_schema: section.boolean_or("dump_schema", false)?,
            schema_path: section.string_or("schema_path", "")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.dump_schema && self.schema_path.trim().is_empty() {
            return Err(ConfigError::invariant(
                "schema_path",
                "must not be blank when dump_schema is enabled",
            ));
        }
        Ok(())
    }
}

impl ConfigSection for GraphQLSettings {
    const PATH: &'static str = "graphql";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tree::ConfigTree;

    #[test]
    fn test_dump_schema_requires_path() {
        let tree = ConfigTree::from_pairs([
            ("graphql.framework", "juniper"),
            ("graphql.dump_schema", "true"),
        ]);
        assert!(matches!(
            GraphQLSettings::from_tree(&tree),
            Err(ConfigError::Invariant { path, .. }) if path == "graphql.schema_path"
        ));
    }

    #[test]
    fn test_unknown_framework_rejected() {
        let tree = ConfigTree::from_pairs([("graphql.framework", "apollo")]);
        assert!(matches!(
            GraphQLSettings::from_tree(&tree),
            Err(ConfigError::InvalidEnum { .. })
        ));
    }
}

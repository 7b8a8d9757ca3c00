// ABOUTME: API documentation settings section (OpenAPI, Swagger UI and Redoc paths)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use super::error::ConfigResult;
use super::section::{require_non_blank, ConfigSection, Section, SettingsRecord};

/// Documentation endpoints (`docs`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocsSettings {
    /// Whether documentation routes are served
    pub enabled: bool,
    /// OpenAPI document path
    pub openapi_path: String,
    /// Swagger UI path
    pub swagger_path: String,
    /// Redoc path
    pub redoc_path: String,
}

impl SettingsRecord for DocsSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            enabled: section.boolean("enabled")?,
            openapi_path: section.string_or("openapi_path", "openapi")?,
            swagger_path: section.string_or("swagger_path", "swagger")?,
            redoc_path: section.string_or("redoc_path", "redoc")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_non_blank("openapi_path", &self.openapi_path)?;
        require_non_blank("swagger_path", &self.swagger_path)?;
        require_non_blank("redoc_path", &self.redoc_path)
    }
}

impl ConfigSection for DocsSettings {
    const PATH: &'static str = "docs";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;
    use crate::config::tree::ConfigTree;

    #[test]
    fn test_paths_default_when_absent() {
        let tree = ConfigTree::from_pairs([("docs.enabled", "true")]);
        let docs = DocsSettings::from_tree(&tree).unwrap();

        assert!(docs.enabled);
        assert_eq!(docs.openapi_path, "openapi");
        assert_eq!(docs.swagger_path, "swagger");
        assert_eq!(docs.redoc_path, "redoc");
    }

    #[test]
    fn test_blank_paths_rejected() {
        for key in ["openapi_path", "swagger_path", "redoc_path"] {
            let full = format!("docs.{key}");
            let tree = ConfigTree::from_pairs([("docs.enabled", "false"), (full.as_str(), "  ")]);

            match DocsSettings::from_tree(&tree) {
                Err(ConfigError::Invariant { path, .. }) => assert_eq!(path, full),
                other => panic!("blank {key} should be rejected, got {other:?}"),
            }
        }
    }
}

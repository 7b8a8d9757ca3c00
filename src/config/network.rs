// ABOUTME: CORS settings section listing the hosts allowed to call the API
// ABOUTME: An empty list or a "*" entry means every host is allowed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

use super::error::ConfigResult;
use super::section::{ConfigSection, Section, SettingsRecord};

/// Wildcard host entry
pub const ANY_HOST: &str = "*";

/// Cross-origin settings (`cors`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorsSettings {
    /// Allowed origin hosts
    pub allowed_hosts: Vec<String>,
}

impl CorsSettings {
    /// Whether any origin may call the API
    #[must_use]
    pub fn allows_all_hosts(&self) -> bool {
        self.allowed_hosts.is_empty() || self.allowed_hosts.iter().any(|host| host == ANY_HOST)
    }
}

impl SettingsRecord for CorsSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            allowed_hosts: section.list_or_empty("allowed_hosts"),
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

impl ConfigSection for CorsSettings {
    const PATH: &'static str = "cors";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tree::ConfigTree;

    #[test]
    fn test_allows_all_hosts() {
        assert!(CorsSettings::default().allows_all_hosts());
        assert!(CorsSettings {
            allowed_hosts: vec!["a.example.com".to_owned(), "*".to_owned()],
        }
        .allows_all_hosts());

        let tree = ConfigTree::from_pairs([("cors.allowed_hosts", "a.example.com, b.example.com")]);
        let cors = CorsSettings::from_tree(&tree).unwrap();
        assert_eq!(cors.allowed_hosts.len(), 2);
        assert!(!cors.allows_all_hosts());
    }
}

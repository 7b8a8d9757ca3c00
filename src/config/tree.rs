// ABOUTME: Read-only hierarchical configuration tree keyed by dotted paths
// ABOUTME: Built from YAML documents and overlaid with EMPLOY__* environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Raw configuration store
//!
//! The tree holds text only. Typing and validation happen in the section
//! records, never here.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde_yaml::Value as YamlValue;
use tracing::debug;

use super::error::{ConfigError, ConfigResult};

/// Separator between path segments in environment variable names
const ENV_SEGMENT_SEPARATOR: &str = "__";

/// A raw configuration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// Single textual value
    Scalar(String),
    /// Ordered list of textual values
    List(Vec<String>),
}

impl ConfigValue {
    /// The scalar text, if this is a scalar
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// View the value as a list; scalars are split on commas
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Scalar(value) => split_list(value),
            Self::List(items) => items.clone(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for ConfigValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_owned).collect())
    }
}

/// Flat map from dotted paths to raw values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(path, value)` pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<ConfigValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::new();
        for (path, value) in pairs {
            tree.insert(path, value);
        }
        tree
    }

    /// Parse a YAML document, flattening nested mappings into dotted paths
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] if the document is not valid YAML, its
    /// root is not a mapping, or a sequence contains non-scalar items
    pub fn from_yaml_str(document: &str) -> ConfigResult<Self> {
        let root: YamlValue = serde_yaml::from_str(document)
            .map_err(|e| ConfigError::Source(format!("invalid YAML: {e}")))?;

        let mut tree = Self::new();
        match root {
            YamlValue::Mapping(_) => flatten_yaml(&mut tree, "", &root)?,
            YamlValue::Null => {}
            _ => {
                return Err(ConfigError::Source(
                    "configuration root must be a mapping".to_owned(),
                ))
            }
        }
        Ok(tree)
    }

    /// Read and parse a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] if the file cannot be read or parsed
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path)
            .map_err(|e| ConfigError::Source(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "Read configuration file");
        Self::from_yaml_str(&document)
    }

    /// Overlay variables from the process environment
    #[must_use]
    pub fn with_env_overrides(mut self, prefix: &str) -> Self {
        self.apply_env_overrides(prefix, env::vars());
        self
    }

    /// Overlay `PREFIX__SECTION__KEY=value` variables onto the tree
    ///
    /// Segments are lowercased and joined with dots, so `EMPLOY__SECURITY__JWT__SECRET_KEY`
    /// overrides `security.jwt.secret_key`. Keys that already hold a list are
    /// overridden with the comma-separated items of the value.
    pub fn apply_env_overrides<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(path) = env_name_to_path(prefix, &name) else {
                continue;
            };
            let value = match self.entries.get(&path) {
                Some(ConfigValue::List(_)) => ConfigValue::List(split_list(&value)),
                _ => ConfigValue::Scalar(value),
            };
            debug!(path = %path, "Configuration overridden from environment");
            self.entries.insert(path, value);
        }
    }

    /// Insert or replace a value
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(path.into(), value.into());
    }

    /// Remove a value, returning it
    pub fn remove(&mut self, path: &str) -> Option<ConfigValue> {
        self.entries.remove(path)
    }

    /// Look up a value by full dotted path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        self.entries.get(path)
    }

    /// Whether the path holds a value
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of leaf values
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate leaf paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn flatten_yaml(tree: &mut ConfigTree, prefix: &str, value: &YamlValue) -> ConfigResult<()> {
    match value {
        YamlValue::Mapping(mapping) => {
            for (key, child) in mapping {
                let key = yaml_scalar(key).ok_or_else(|| {
                    ConfigError::Source(format!("non-scalar mapping key under '{prefix}'"))
                })?;
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_yaml(tree, &path, child)?;
            }
        }
        YamlValue::Sequence(items) => {
            let list = items
                .iter()
                .map(|item| {
                    yaml_scalar(item).ok_or_else(|| {
                        ConfigError::Source(format!("'{prefix}' must be a list of scalar values"))
                    })
                })
                .collect::<ConfigResult<Vec<_>>>()?;
            tree.insert(prefix, ConfigValue::List(list));
        }
        YamlValue::Tagged(tagged) => flatten_yaml(tree, prefix, &tagged.value)?,
        YamlValue::Null => {}
        scalar => {
            if let Some(text) = yaml_scalar(scalar) {
                tree.insert(prefix, ConfigValue::Scalar(text));
            }
        }
    }
    Ok(())
}

fn yaml_scalar(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(text) => Some(text.clone()),
        YamlValue::Bool(flag) => Some(flag.to_string()),
        YamlValue::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn env_name_to_path(prefix: &str, name: &str) -> Option<String> {
    let rest = name
        .strip_prefix(prefix)?
        .strip_prefix(ENV_SEGMENT_SEPARATOR)?;
    if rest.is_empty() {
        return None;
    }
    let segments: Vec<String> = rest
        .split(ENV_SEGMENT_SEPARATOR)
        .map(str::to_lowercase)
        .collect();
    if segments.iter().any(String::is_empty) {
        return None;
    }
    Some(segments.join("."))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

// ABOUTME: Typed view over one configuration subtree and the two-phase record construction traits
// ABOUTME: Section getters coerce text into primitives; records parse then validate their fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::any::type_name;
use std::fmt::Display;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use super::tree::{ConfigTree, ConfigValue};

/// A settings value built from one subtree
///
/// Construction is two-phase: [`SettingsRecord::parse`] builds a candidate from raw
/// text, [`SettingsRecord::validate`] checks the field rules. Use
/// [`SettingsRecord::load`] to get both; a record it returns always satisfies its rules.
pub trait SettingsRecord: Sized {
    /// Build a candidate from the subtree
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a key is missing or cannot be coerced
    fn parse(section: &Section<'_>) -> ConfigResult<Self>;

    /// Check the record's field rules, reporting paths relative to the record
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invariant`] for the first violated rule
    fn validate(&self) -> ConfigResult<()>;

    /// Parse then validate
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation failure, with its full dotted path
    fn load(section: &Section<'_>) -> ConfigResult<Self> {
        let candidate = Self::parse(section)?;
        candidate.validate().map_err(|e| e.within(section.path()))?;
        Ok(candidate)
    }
}

/// A record that lives at a fixed top-level path
pub trait ConfigSection: SettingsRecord {
    /// Dotted path of the section root
    const PATH: &'static str;

    /// Load the section from a whole tree
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation failure
    fn from_tree(tree: &ConfigTree) -> ConfigResult<Self> {
        Self::load(&Section::new(tree, Self::PATH))
    }
}

/// Enumeration that can be read from configuration text
pub trait SettingsEnum: Sized + Copy {
    /// Accepted names, as shown in error messages
    const NAMES: &'static [&'static str];

    /// Match an already-lowercased name
    fn from_name(name: &str) -> Option<Self>;
}

/// Read-only view of the tree below `path`
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    tree: &'a ConfigTree,
    path: &'a str,
}

impl<'a> Section<'a> {
    /// View the subtree rooted at `path`; an empty path is the whole tree
    #[must_use]
    pub const fn new(tree: &'a ConfigTree, path: &'a str) -> Self {
        Self { tree, path }
    }

    /// Dotted path of this section
    #[must_use]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// Full dotted path of a key in this section
    #[must_use]
    pub fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Run `f` against the nested section `key`
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns
    pub fn with_child<T>(
        &self,
        key: &str,
        f: impl FnOnce(&Section<'_>) -> ConfigResult<T>,
    ) -> ConfigResult<T> {
        let path = self.path_of(key);
        f(&Section::new(self.tree, &path))
    }

    /// Load a nested record at `key`
    ///
    /// # Errors
    ///
    /// Returns the nested record's parse or validation failure
    pub fn record<T: SettingsRecord>(&self, key: &str) -> ConfigResult<T> {
        self.with_child(key, |section| T::load(section))
    }

    /// Raw value of a key
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&'a ConfigValue> {
        self.tree.get(&self.path_of(key))
    }

    /// Whether the key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Required string
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if absent or [`ConfigError::InvalidValue`] if a list
    pub fn string(&self, key: &str) -> ConfigResult<String> {
        match self.value(key) {
            None => Err(self.missing(key)),
            Some(ConfigValue::Scalar(value)) => Ok(value.clone()),
            Some(ConfigValue::List(items)) => Err(ConfigError::InvalidValue {
                path: self.path_of(key),
                value: items.join(","),
                expected: "a single value".to_owned(),
            }),
        }
    }

    /// String with a fallback when absent
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the key holds a list
    pub fn string_or(&self, key: &str, default: &str) -> ConfigResult<String> {
        if self.contains(key) {
            self.string(key)
        } else {
            Ok(default.to_owned())
        }
    }

    /// Required value parsed with [`FromStr`] (integers, longs)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] or [`ConfigError::InvalidValue`]
    pub fn parse<T: FromStr>(&self, key: &str) -> ConfigResult<T> {
        let raw = self.string(key)?;
        raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            path: self.path_of(key),
            value: raw.clone(),
            expected: short_type_name::<T>().to_owned(),
        })
    }

    /// Parsed value with a fallback when absent
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if present but unparseable
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> ConfigResult<T> {
        if self.contains(key) {
            self.parse(key)
        } else {
            Ok(default)
        }
    }

    /// Required boolean, `true` or `false` in any case
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] or [`ConfigError::InvalidValue`]
    pub fn boolean(&self, key: &str) -> ConfigResult<bool> {
        let raw = self.string(key)?;
        match raw.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                path: self.path_of(key),
                value: raw,
                expected: "bool".to_owned(),
            }),
        }
    }

    /// Boolean with a fallback when absent
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if present but not a boolean
    pub fn boolean_or(&self, key: &str, default: bool) -> ConfigResult<bool> {
        if self.contains(key) {
            self.boolean(key)
        } else {
            Ok(default)
        }
    }

    /// Required enumeration member, matched case-insensitively
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] or [`ConfigError::InvalidEnum`]
    pub fn enumeration<E: SettingsEnum>(&self, key: &str) -> ConfigResult<E> {
        let raw = self.string(key)?;
        E::from_name(&raw.trim().to_lowercase()).ok_or_else(|| ConfigError::InvalidEnum {
            path: self.path_of(key),
            value: raw,
            expected: E::NAMES.join(", "),
        })
    }

    /// Required list; a scalar is split on commas
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if absent
    pub fn list(&self, key: &str) -> ConfigResult<Vec<String>> {
        self.value(key)
            .map(ConfigValue::to_list)
            .ok_or_else(|| self.missing(key))
    }

    /// List, empty when absent
    #[must_use]
    pub fn list_or_empty(&self, key: &str) -> Vec<String> {
        self.value(key).map(ConfigValue::to_list).unwrap_or_default()
    }

    fn missing(&self, key: &str) -> ConfigError {
        ConfigError::MissingKey {
            path: self.path_of(key),
        }
    }
}

/// Reject blank text
///
/// # Errors
///
/// Returns [`ConfigError::Invariant`] naming `field`
pub fn require_non_blank(field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::invariant(field, "must not be blank"));
    }
    Ok(())
}

/// Reject blank text or text shorter than `min` characters
///
/// # Errors
///
/// Returns [`ConfigError::Invariant`] naming `field`
pub fn require_min_length(field: &str, value: &str, min: usize) -> ConfigResult<()> {
    require_non_blank(field, value)?;
    let length = value.chars().count();
    if length < min {
        return Err(ConfigError::invariant(
            field,
            format!("must be at least {min} characters long, got {length}"),
        ));
    }
    Ok(())
}

/// Reject zero and negative numbers
///
/// # Errors
///
/// Returns [`ConfigError::Invariant`] naming `field`
pub fn require_positive<T>(field: &str, value: T) -> ConfigResult<()>
where
    T: PartialOrd + Default + Display,
{
    if value <= T::default() {
        return Err(ConfigError::invariant(
            field,
            format!("must be greater than 0, got {value}"),
        ));
    }
    Ok(())
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Blue,
    }

    impl SettingsEnum for Color {
        const NAMES: &'static [&'static str] = &["red", "blue"];

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "red" => Some(Self::Red),
                "blue" => Some(Self::Blue),
                _ => None,
            }
        }
    }

    fn tree() -> ConfigTree {
        ConfigTree::from_pairs([
            ("paint.color", ConfigValue::from("BLUE")),
            ("paint.coats", ConfigValue::from("3")),
            ("paint.glossy", ConfigValue::from("True")),
            ("paint.bad_number", ConfigValue::from("three")),
            ("paint.tags", ConfigValue::from(vec!["a", "b"])),
            ("paint.brush.size", ConfigValue::from("-2")),
        ])
    }

    #[test]
    fn test_typed_getters() {
        let tree = tree();
        let section = Section::new(&tree, "paint");

        assert_eq!(section.enumeration::<Color>("color").unwrap(), Color::Blue);
        assert_eq!(section.parse::<u32>("coats").unwrap(), 3);
        assert!(section.boolean("glossy").unwrap());
        assert_eq!(section.list("tags").unwrap(), vec!["a", "b"]);
        assert_eq!(section.string_or("finish", "matte").unwrap(), "matte");
        assert_eq!(section.parse_or::<i64>("drying_ms", 500).unwrap(), 500);
        assert!(section.list_or_empty("missing").is_empty());
    }

    #[test]
    fn test_failures_name_full_path() {
        let tree = tree();
        let section = Section::new(&tree, "paint");

        assert_eq!(
            section.string("finish"),
            Err(ConfigError::MissingKey {
                path: "paint.finish".to_owned()
            })
        );
        assert!(matches!(
            section.parse::<u32>("bad_number"),
            Err(ConfigError::InvalidValue { path, expected, .. })
                if path == "paint.bad_number" && expected == "u32"
        ));
        assert!(matches!(
            section.string("tags"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_enum_member_fails() {
        let tree = ConfigTree::from_pairs([("paint.color", "green")]);
        let section = Section::new(&tree, "paint");

        assert_eq!(
            section.enumeration::<Color>("color"),
            Err(ConfigError::InvalidEnum {
                path: "paint.color".to_owned(),
                value: "green".to_owned(),
                expected: "red, blue".to_owned(),
            })
        );
    }

    #[test]
    fn test_nested_section() {
        let tree = tree();
        let section = Section::new(&tree, "paint");

        let size = section
            .with_child("brush", |brush| brush.parse::<i32>("size"))
            .unwrap();
        assert_eq!(size, -2);
    }

    #[test]
    fn test_rule_helpers() {
        assert!(require_non_blank("realm", "  ").is_err());
        assert!(require_min_length("secret_key", "short", 12).is_err());
        assert!(require_min_length("secret_key", "long-enough-secret", 12).is_ok());
        assert!(require_positive("limit", 0).is_err());
        assert!(require_positive("refill_ms", -5_i64).is_err());
        assert!(require_positive("limit", 1).is_ok());
    }
}

// ABOUTME: Process-wide ledger guaranteeing uniqueness of diagnostic error codes and tags
// ABOUTME: Duplicate registration is a programmer error reported as RegistryError at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock, PoisonError};

use thiserror::Error;
use tracing::debug;

static GLOBAL_REGISTRY: OnceLock<ErrorCodeRegistry> = OnceLock::new();

/// Failure to register a tag or code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The taxonomy prefix was already claimed by another group
    #[error("Duplicate error tag '{0}': error taxonomy groups must use distinct prefixes")]
    DuplicateTag(String),
    /// The fully-qualified code was already registered
    #[error("Duplicate error code '{0}': every error code must be unique")]
    DuplicateCode(String),
}

/// Append-only set of registered error tags and codes
///
/// Tags (`EMP.`) and codes (`EMP.01`) share one namespace; nothing is ever removed.
#[derive(Debug, Default)]
pub struct ErrorCodeRegistry {
    entries: Mutex<HashSet<String>>,
}

impl ErrorCodeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::new)
    }

    /// Record a taxonomy prefix
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTag`] if the tag is already present
    pub fn register_tag(&self, tag: &str) -> Result<(), RegistryError> {
        if self.insert(tag) {
            debug!(tag, "Registered error tag");
            Ok(())
        } else {
            Err(RegistryError::DuplicateTag(tag.to_owned()))
        }
    }

    /// Record a fully-qualified error code
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCode`] if the code is already present
    pub fn register_code(&self, code: &str) -> Result<(), RegistryError> {
        if self.insert(code) {
            Ok(())
        } else {
            Err(RegistryError::DuplicateCode(code.to_owned()))
        }
    }

    /// Whether the tag or code has been registered
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(code)
    }

    /// Number of registered entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been registered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, value: &str) -> bool {
        // A poisoned set is still consistent: inserts are single operations
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(value.to_owned())
    }
}

// ABOUTME: Test utilities for building configuration trees and resolved settings consistently
// ABOUTME: Centralizes the baseline configuration so unit tests only state what they change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{AppSettings, ConfigTree};

/// Key/value pairs of a complete, valid development configuration
pub const BASELINE: &[(&str, &str)] = &[
    ("server.development", "false"),
    ("server.machine_id", "7"),
    ("deployment.type", "development"),
    ("deployment.protocol", "https"),
    ("deployment.host", "127.0.0.1"),
    ("deployment.port", "8080"),
    ("deployment.ssl_port", "8443"),
    ("deployment.api_version", "v1"),
    ("cors.allowed_hosts", "https://app.example.com"),
    ("database.url", "sqlite::memory:"),
    ("database.connection_pool_size", "4"),
    ("docs.enabled", "false"),
    ("graphql.framework", "async_graphql"),
    ("graphql.playground", "false"),
    ("graphql.dump_schema", "false"),
    ("security.use_secure_connection", "true"),
    ("security.jwt.is_enabled", "true"),
    ("security.jwt.token_lifetime_ms", "3600000"),
    ("security.jwt.audience", "employ-api"),
    ("security.jwt.issuer", "https://auth.example.com"),
    ("security.jwt.realm", "employ"),
    ("security.jwt.secret_key", "jwt-secret-for-tests"),
    ("security.basic_auth.is_enabled", "true"),
    ("security.basic_auth.realm", "employ-admin"),
    ("security.basic_auth.credentials.username", "admin"),
    ("security.basic_auth.credentials.password", "admin-password-123"),
    ("security.encryption.algorithm", "AES_256_GCM"),
    ("security.encryption.salt", "test-salt"),
    ("security.encryption.key", "encryption-key-for-tests"),
    ("security.constraints.public_api.limit", "100"),
    ("security.constraints.public_api.refill_ms", "60000"),
    ("security.constraints.new_token.limit", "5"),
    ("security.constraints.new_token.refill_ms", "3600000"),
];

/// Baseline tree
#[must_use]
pub fn baseline_tree() -> ConfigTree {
    ConfigTree::from_pairs(BASELINE.iter().copied())
}

/// Baseline tree with some keys replaced
#[must_use]
pub fn tree_with(overrides: &[(&str, &str)]) -> ConfigTree {
    let mut tree = baseline_tree();
    for (path, value) in overrides {
        tree.insert(*path, *value);
    }
    tree
}

/// Resolve settings from the baseline with overrides applied
///
/// # Panics
///
/// Panics if the overrides make the configuration invalid
#[must_use]
#[allow(clippy::expect_used)]
pub fn settings_with(overrides: &[(&str, &str)]) -> AppSettings {
    AppSettings::from_tree(&tree_with(overrides)).expect("test configuration must resolve")
}

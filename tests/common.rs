// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: Provides a complete YAML configuration and helpers to resolve settings and build contexts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `employ_server`

use std::sync::{Arc, Once};

use employ_server::config::{AppSettings, ConfigTree};
use employ_server::context::ServerContext;
use employ_server::database::SqlitePoolProbe;
use employ_server::snowflake::SnowflakeGenerator;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// A complete, valid development configuration
pub const VALID_YAML: &str = r#"
server:
  development: true
  machine_id: 12
deployment:
  type: development
  protocol: http
  host: 127.0.0.1
  port: 8080
  ssl_port: 8443
  api_version: v1
cors:
  allowed_hosts:
    - https://hr.example.com
    - https://admin.example.com
database:
  url: "sqlite::memory:"
  connection_pool_size: 2
  transaction_max_attempts: 3
  warn_long_query_duration_ms: 2000
docs:
  enabled: true
graphql:
  framework: async_graphql
  playground: true
  dump_schema: false
security:
  use_secure_connection: false
  jwt:
    is_enabled: true
    token_lifetime_ms: 3600000
    audience: employ-api
    issuer: https://auth.example.com
    realm: employ
    secret_key: integration-jwt-secret
  basic_auth:
    is_enabled: true
    realm: employ-admin
    credentials:
      username: operator
      password: operator-password-1
  encryption:
    algorithm: AES_256_GCM
    salt: integration-salt
    key: integration-encryption-key
  constraints:
    public_api:
      limit: 120
      refill_ms: 60000
    new_token:
      limit: 3
      refill_ms: 600000
"#;

/// Basic-auth username in [`VALID_YAML`]
pub const ADMIN_USERNAME: &str = "operator";
/// Basic-auth password in [`VALID_YAML`]
pub const ADMIN_PASSWORD: &str = "operator-password-1";

/// Parse [`VALID_YAML`]
pub fn valid_tree() -> ConfigTree {
    ConfigTree::from_yaml_str(VALID_YAML).expect("fixture YAML must parse")
}

/// [`valid_tree`] with some keys replaced
pub fn tree_with(overrides: &[(&str, &str)]) -> ConfigTree {
    let mut tree = valid_tree();
    for (path, value) in overrides {
        tree.insert(*path, *value);
    }
    tree
}

/// Resolve settings from [`valid_tree`] with overrides
pub fn settings_with(overrides: &[(&str, &str)]) -> Arc<AppSettings> {
    Arc::new(AppSettings::from_tree(&tree_with(overrides)).expect("fixture must resolve"))
}

/// Build a server context backed by an in-memory database
pub fn context_with(overrides: &[(&str, &str)]) -> ServerContext {
    let settings = settings_with(overrides);
    let probe = SqlitePoolProbe::from_settings(
        settings.database(),
        settings.deployment().deployment_type,
    )
    .expect("in-memory pool must build");
    let snowflake =
        SnowflakeGenerator::new(settings.server().machine_id).expect("machine id must be valid");

    ServerContext::new(settings, Arc::new(probe), Arc::new(snowflake))
}

// ABOUTME: Configuration management module for the employ server
// ABOUTME: Loads a raw key/value tree, maps each section to a validated record and resolves AppSettings once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the employ server
//!
//! - **Tree**: flat dotted-path store loaded from YAML and `EMPLOY__*` variables
//! - **Section**: typed reader over a subtree and the two-phase record traits
//! - **Sections**: one module per top-level settings section
//! - **Settings**: resolver, [`AppSettings`] aggregate and the exactly-once [`SettingsCell`]

/// Configuration error type
pub mod error;
/// Section reader and record traits
pub mod section;
/// Raw configuration tree
pub mod tree;
/// Shared enumerations
pub mod types;

/// Database section
pub mod database;
/// Documentation section
pub mod docs;
/// GraphQL section
pub mod graphql;
/// CORS section
pub mod network;
/// Security section
pub mod security;
/// Server and deployment sections
pub mod server;

/// Resolver and aggregate settings
pub mod settings;

pub use database::{DatabaseSettings, DatabaseUrl};
pub use docs::DocsSettings;
pub use error::{ConfigError, ConfigResult};
pub use graphql::GraphQLSettings;
pub use network::CorsSettings;
pub use section::{ConfigSection, Section, SettingsEnum, SettingsRecord};
pub use security::{
    BasicAuthSettings, ConstraintsSettings, Credentials, EncryptionSettings, JwtSettings,
    LimitSpec, SecuritySettings,
};
pub use server::{DeploymentSettings, ServerSettings};
pub use settings::{resolve, section_specs, AppSettings, SectionSpec, SettingsCell, SettingsSection};
pub use tree::{ConfigTree, ConfigValue};
pub use types::{DeploymentType, GraphQLFramework, LogLevel, Protocol};

/// Prefix of environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "EMPLOY";

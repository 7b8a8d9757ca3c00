// ABOUTME: Resolves every configuration section into one immutable AppSettings value
// ABOUTME: SettingsCell guarantees the resolution happens exactly once per owner, under a mutex
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration resolution
//!
//! [`section_specs`] is the declared list of top-level sections, each paired with
//! the parser that turns its subtree into a typed record. [`resolve`] runs the
//! list and only builds [`AppSettings`] when every section succeeded.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use super::database::DatabaseSettings;
use super::docs::DocsSettings;
use super::error::{ConfigError, ConfigResult};
use super::graphql::GraphQLSettings;
use super::network::CorsSettings;
use super::section::{ConfigSection, Section};
use super::security::SecuritySettings;
use super::server::{DeploymentSettings, ServerSettings};
use super::tree::ConfigTree;

/// One successfully parsed top-level section
#[derive(Debug, Clone)]
pub enum SettingsSection {
    /// `server`
    Server(ServerSettings),
    /// `deployment`
    Deployment(DeploymentSettings),
    /// `cors`
    Cors(CorsSettings),
    /// `database`
    Database(DatabaseSettings),
    /// `docs`
    Docs(DocsSettings),
    /// `graphql`
    GraphQL(GraphQLSettings),
    /// `security`
    Security(SecuritySettings),
}

/// Parser for one section subtree
pub type SectionParser = fn(&Section<'_>) -> ConfigResult<SettingsSection>;

/// A configuration path paired with the parser for its settings type
#[derive(Clone, Copy)]
pub struct SectionSpec {
    /// Dotted path of the section root
    pub path: &'static str,
    /// Parser producing the typed record
    pub parse: SectionParser,
}

impl SectionSpec {
    /// Entry for a [`ConfigSection`] type at its own path
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ConfigSection + Into<SettingsSection>,
    {
        Self {
            path: T::PATH,
            parse: |section| T::load(section).map(Into::into),
        }
    }
}

/// The sections making up [`AppSettings`], in resolution order
#[must_use]
pub fn section_specs() -> Vec<SectionSpec> {
    vec![
        SectionSpec::of::<ServerSettings>(),
        SectionSpec::of::<DeploymentSettings>(),
        SectionSpec::of::<CorsSettings>(),
        SectionSpec::of::<DatabaseSettings>(),
        SectionSpec::of::<DocsSettings>(),
        SectionSpec::of::<GraphQLSettings>(),
        SectionSpec::of::<SecuritySettings>(),
    ]
}

macro_rules! impl_into_section {
    ($($record:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$record> for SettingsSection {
                fn from(record: $record) -> Self {
                    Self::$variant(record)
                }
            }
        )+
    };
}

impl_into_section! {
    ServerSettings => Server,
    DeploymentSettings => Deployment,
    CorsSettings => Cors,
    DatabaseSettings => Database,
    DocsSettings => Docs,
    GraphQLSettings => GraphQL,
    SecuritySettings => Security,
}

/// Complete, validated, immutable application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    server: ServerSettings,
    deployment: DeploymentSettings,
    cors: CorsSettings,
    database: DatabaseSettings,
    docs: DocsSettings,
    graphql: GraphQLSettings,
    security: SecuritySettings,
}

impl AppSettings {
    /// Resolve the standard section list from a tree
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by any section
    pub fn from_tree(tree: &ConfigTree) -> ConfigResult<Self> {
        resolve(tree, &section_specs())
    }

    /// Server settings
    #[must_use]
    pub const fn server(&self) -> &ServerSettings {
        &self.server
    }

    /// Deployment settings
    #[must_use]
    pub const fn deployment(&self) -> &DeploymentSettings {
        &self.deployment
    }

    /// CORS settings
    #[must_use]
    pub const fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    /// Database settings
    #[must_use]
    pub const fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    /// Documentation settings
    #[must_use]
    pub const fn docs(&self) -> &DocsSettings {
        &self.docs
    }

    /// GraphQL settings
    #[must_use]
    pub const fn graphql(&self) -> &GraphQLSettings {
        &self.graphql
    }

    /// Security settings
    #[must_use]
    pub const fn security(&self) -> &SecuritySettings {
        &self.security
    }

    /// One-line summary safe for logs (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };
        format!(
            "Deployment: {} | Address: {}://{} | API: {} | Database: {} | JWT: {} | Basic Auth: {} | GraphQL: {} | Docs: {}",
            self.deployment.deployment_type,
            self.deployment.protocol,
            self.deployment.bind_address(),
            self.deployment.api_version,
            if self.database.url.is_memory() { "in-memory" } else { "file" },
            enabled(self.security.jwt.is_enabled),
            enabled(self.security.basic_auth.is_enabled),
            self.graphql.framework,
            enabled(self.docs.enabled),
        )
    }
}

#[derive(Default)]
struct PartialSettings {
    server: Option<ServerSettings>,
    deployment: Option<DeploymentSettings>,
    cors: Option<CorsSettings>,
    database: Option<DatabaseSettings>,
    docs: Option<DocsSettings>,
    graphql: Option<GraphQLSettings>,
    security: Option<SecuritySettings>,
}

impl PartialSettings {
    fn accept(&mut self, section: SettingsSection) {
        match section {
            SettingsSection::Server(record) => self.server = Some(record),
            SettingsSection::Deployment(record) => self.deployment = Some(record),
            SettingsSection::Cors(record) => self.cors = Some(record),
            SettingsSection::Database(record) => self.database = Some(record),
            SettingsSection::Docs(record) => self.docs = Some(record),
            SettingsSection::GraphQL(record) => self.graphql = Some(record),
            SettingsSection::Security(record) => self.security = Some(record),
        }
    }

    fn finish(self) -> ConfigResult<AppSettings> {
        Ok(AppSettings {
            server: self.server.ok_or(ConfigError::MissingSection(ServerSettings::PATH))?,
            deployment: self
                .deployment
                .ok_or(ConfigError::MissingSection(DeploymentSettings::PATH))?,
            cors: self.cors.ok_or(ConfigError::MissingSection(CorsSettings::PATH))?,
            database: self
                .database
                .ok_or(ConfigError::MissingSection(DatabaseSettings::PATH))?,
            docs: self.docs.ok_or(ConfigError::MissingSection(DocsSettings::PATH))?,
            graphql: self
                .graphql
                .ok_or(ConfigError::MissingSection(GraphQLSettings::PATH))?,
            security: self
                .security
                .ok_or(ConfigError::MissingSection(SecuritySettings::PATH))?,
        })
    }
}

/// Run every section parser against the tree and assemble the aggregate
///
/// Fails fast: the first section error aborts resolution and nothing is built.
///
/// # Errors
///
/// Returns the failing section's [`ConfigError`], or
/// [`ConfigError::MissingSection`] if `specs` does not cover every section
pub fn resolve(tree: &ConfigTree, specs: &[SectionSpec]) -> ConfigResult<AppSettings> {
    let mut partial = PartialSettings::default();
    for spec in specs {
        let section = Section::new(tree, spec.path);
        partial.accept((spec.parse)(&section)?);
        debug!(section = spec.path, "Configuration section resolved");
    }
    partial.finish()
}

/// Holder that resolves settings exactly once and then hands out the same value
///
/// Concurrent first callers serialize on an internal mutex; only one resolves.
/// A failed resolution leaves the cell empty so a later call may retry.
#[derive(Debug, Default)]
pub struct SettingsCell {
    value: OnceLock<Arc<AppSettings>>,
    init_lock: Mutex<()>,
}

impl SettingsCell {
    /// Create an empty cell
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings, if already resolved
    #[must_use]
    pub fn get(&self) -> Option<Arc<AppSettings>> {
        self.value.get().cloned()
    }

    /// Whether resolution has succeeded
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the resolved settings, resolving from `tree` on first use
    ///
    /// Later calls return the first result without reading `tree`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of a failed first resolution
    pub fn get_or_resolve(&self, tree: &ConfigTree) -> ConfigResult<Arc<AppSettings>> {
        if let Some(settings) = self.value.get() {
            return Ok(Arc::clone(settings));
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished while we waited for the lock
        if let Some(settings) = self.value.get() {
            return Ok(Arc::clone(settings));
        }

        let settings = Arc::new(AppSettings::from_tree(tree)?);
        Ok(Arc::clone(self.value.get_or_init(|| settings)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{baseline_tree, tree_with};

    #[test]
    fn test_resolves_every_section() {
        let settings = AppSettings::from_tree(&baseline_tree()).unwrap();

        assert_eq!(settings.server().machine_id, 7);
        assert_eq!(settings.deployment().api_version, "v1");
        assert!(settings.database().url.is_memory());
        assert!(settings.security().jwt.is_enabled);
    }

    #[test]
    fn test_incomplete_spec_list_fails() {
        let specs: Vec<SectionSpec> = section_specs()
            .into_iter()
            .filter(|spec| spec.path != "docs")
            .collect();

        assert!(matches!(
            resolve(&baseline_tree(), &specs),
            Err(ConfigError::MissingSection("docs"))
        ));
    }

    #[test]
    fn test_summary_has_no_secrets() {
        let settings = AppSettings::from_tree(&baseline_tree()).unwrap();
        let summary = settings.summary();

        assert!(summary.contains("API: v1"));
        assert!(!summary.contains("jwt-secret-for-tests"));
        assert!(!summary.contains("admin-password-123"));
    }

    #[test]
    fn test_cell_resolves_once() {
        let cell = SettingsCell::new();
        assert!(!cell.is_initialized());

        let first = cell.get_or_resolve(&baseline_tree()).unwrap();
        // A second tree is ignored once the cell holds a value
        let second = cell
            .get_or_resolve(&tree_with(&[("deployment.api_version", "v2")]))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.deployment().api_version, "v1");
    }

    #[test]
    fn test_failed_resolution_leaves_cell_empty() {
        let cell = SettingsCell::new();
        let broken = tree_with(&[("security.jwt.secret_key", "short")]);

        assert!(cell.get_or_resolve(&broken).is_err());
        assert!(cell.get().is_none());
        assert!(cell.get_or_resolve(&baseline_tree()).is_ok());
    }
}

// ABOUTME: Security settings section covering JWT, basic auth, encryption and rate-limit constraints
// ABOUTME: Enforces minimum secret lengths and positive limits at construction time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Debug, Formatter};

use employ_core::constants::limits::{
    MIN_ENCRYPTION_KEY_LENGTH, MIN_PASSWORD_LENGTH, MIN_SECRET_KEY_LENGTH, MIN_USERNAME_LENGTH,
};

use super::error::ConfigResult;
use super::section::{
    require_min_length, require_non_blank, require_positive, ConfigSection, Section,
    SettingsRecord,
};

const REDACTED: &str = "[REDACTED]";

/// Security settings (`security`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySettings {
    /// Require TLS between clients and the server
    pub use_secure_connection: bool,
    /// JWT authentication
    pub jwt: JwtSettings,
    /// HTTP basic authentication
    pub basic_auth: BasicAuthSettings,
    /// Field-level encryption
    pub encryption: EncryptionSettings,
    /// Rate limits
    pub constraints: ConstraintsSettings,
}

impl SettingsRecord for SecuritySettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            use_secure_connection: section.boolean("use_secure_connection")?,
            jwt: section.record("jwt")?,
            basic_auth: section.record("basic_auth")?,
            encryption: section.record("encryption")?,
            constraints: section.record("constraints")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        // Nested records validated themselves during parse
        Ok(())
    }
}

impl ConfigSection for SecuritySettings {
    const PATH: &'static str = "security";
}

/// JWT authentication (`security.jwt`)
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSettings {
    /// Whether JWT authentication is active
    pub is_enabled: bool,
    /// Token lifetime in milliseconds
    pub token_lifetime_ms: i64,
    /// Expected `aud` claim
    pub audience: String,
    /// Expected `iss` claim
    pub issuer: String,
    /// Authentication realm
    pub realm: String,
    /// HMAC signing secret
    pub secret_key: String,
}

impl SettingsRecord for JwtSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            is_enabled: section.boolean("is_enabled")?,
            token_lifetime_ms: section.parse("token_lifetime_ms")?,
            audience: section.string("audience")?,
            issuer: section.string("issuer")?,
            realm: section.string("realm")?,
            secret_key: section.string("secret_key")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_positive("token_lifetime_ms", self.token_lifetime_ms)?;
        require_non_blank("audience", &self.audience)?;
        require_non_blank("issuer", &self.issuer)?;
        require_non_blank("realm", &self.realm)?;
        require_min_length("secret_key", &self.secret_key, MIN_SECRET_KEY_LENGTH)
    }
}

impl Debug for JwtSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("is_enabled", &self.is_enabled)
            .field("token_lifetime_ms", &self.token_lifetime_ms)
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("realm", &self.realm)
            .field("secret_key", &REDACTED)
            .finish()
    }
}

/// HTTP basic authentication (`security.basic_auth`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthSettings {
    /// Whether basic authentication is active
    pub is_enabled: bool,
    /// Name of the authentication provider
    pub provider_name: String,
    /// Realm sent in `WWW-Authenticate`
    pub realm: String,
    /// Accepted credentials
    pub credentials: Credentials,
}

impl SettingsRecord for BasicAuthSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            is_enabled: section.boolean("is_enabled")?,
            provider_name: section.string_or("provider_name", "basic-auth")?,
            realm: section.string("realm")?,
            credentials: section.record("credentials")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_non_blank("provider_name", &self.provider_name)?;
        require_non_blank("realm", &self.realm)
    }
}

/// Username and password pair (`security.basic_auth.credentials`)
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl SettingsRecord for Credentials {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            username: section.string("username")?,
            password: section.string("password")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_min_length("username", &self.username, MIN_USERNAME_LENGTH)?;
        require_min_length("password", &self.password, MIN_PASSWORD_LENGTH)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Field-level encryption (`security.encryption`)
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionSettings {
    /// Cipher name
    pub algorithm: String,
    /// Key-derivation salt
    pub salt: String,
    /// Encryption key
    pub key: String,
}

impl SettingsRecord for EncryptionSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            algorithm: section.string("algorithm")?,
            salt: section.string("salt")?,
            key: section.string("key")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_non_blank("algorithm", &self.algorithm)?;
        require_non_blank("salt", &self.salt)?;
        require_min_length("key", &self.key, MIN_ENCRYPTION_KEY_LENGTH)
    }
}

impl Debug for EncryptionSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionSettings")
            .field("algorithm", &self.algorithm)
            .field("salt", &REDACTED)
            .field("key", &REDACTED)
            .finish()
    }
}

/// Rate limits for public endpoints (`security.constraints`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintsSettings {
    /// Limit on the unauthenticated public API
    pub public_api: LimitSpec,
    /// Limit on new token issuance
    pub new_token: LimitSpec,
}

impl SettingsRecord for ConstraintsSettings {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            public_api: section.record("public_api")?,
            new_token: section.record("new_token")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

/// Token-bucket limit: `limit` requests refilled every `refill_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitSpec {
    /// Requests per refill period
    pub limit: i32,
    /// Refill period in milliseconds
    pub refill_ms: i64,
}

impl SettingsRecord for LimitSpec {
    fn parse(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            limit: section.parse("limit")?,
            refill_ms: section.parse("refill_ms")?,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        require_positive("limit", self.limit)?;
        require_positive("refill_ms", self.refill_ms)
    }
}

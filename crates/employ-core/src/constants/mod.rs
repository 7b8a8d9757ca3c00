// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for service identity, health reporting and ID generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service names used in logs and health output
pub mod service_names {
    /// Main API server
    pub const EMPLOY_SERVER: &str = "employ-server";
}

/// API endpoints
pub mod endpoints {
    /// Liveness probe
    pub const HEALTH: &str = "/health";
    /// Readiness probe
    pub const READY: &str = "/ready";
    /// Authenticated diagnostic report
    pub const HEALTH_CHECK: &str = "/admin/health/check";
}

/// Health report texts
pub mod health {
    /// Emitted as the only entry when no check reported a problem
    pub const NO_ERRORS_DETECTED: &str = "No Errors Detected";
    /// Emitted when the endpoint inventory is empty
    pub const NO_ENDPOINTS_DETECTED: &str = "No Endpoints Detected.";
}

/// Snowflake ID layout
pub mod snowflake {
    /// Custom epoch, 2024-01-01T00:00:00Z, in milliseconds
    pub const EPOCH_MS: i64 = 1_704_067_200_000;
    /// Bits reserved for the machine id
    pub const MACHINE_ID_BITS: u32 = 10;
    /// Bits reserved for the per-millisecond sequence
    pub const SEQUENCE_BITS: u32 = 12;
    /// Largest machine id that fits the layout
    pub const MAX_MACHINE_ID: u16 = (1 << MACHINE_ID_BITS) - 1;
    /// Largest sequence value per millisecond
    pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;
}

/// Minimum lengths enforced on credentials and secrets
pub mod limits {
    /// Minimum JWT signing secret length
    pub const MIN_SECRET_KEY_LENGTH: usize = 12;
    /// Minimum encryption key length
    pub const MIN_ENCRYPTION_KEY_LENGTH: usize = 12;
    /// Minimum basic-auth username length
    pub const MIN_USERNAME_LENGTH: usize = 4;
    /// Minimum basic-auth password length
    pub const MIN_PASSWORD_LENGTH: usize = 12;
}

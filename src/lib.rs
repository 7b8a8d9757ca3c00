// ABOUTME: Main library entry point for the employ server
// ABOUTME: Typed configuration resolution, id generation and aggregated health diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Employ Server
//!
//! Backend for employee and employment records. This crate owns the pieces
//! with real design weight:
//!
//! - **Configuration**: a raw key/value tree mapped section by section into
//!   validated records and resolved exactly once into [`config::AppSettings`]
//! - **Health**: independent checks over the settings and runtime services,
//!   merged into one [`health::HealthCheckReport`]
//! - **Ids**: a Snowflake-style generator keyed by the configured machine id
//!
//! Error types, the error-code registry and constants live in `employ-core`.

/// Configuration tree, section mapping and resolution
pub mod config;
/// Dependency injection context shared with routes
pub mod context;
/// Database health probe
pub mod database;
/// Health checks and report aggregation
pub mod health;
/// Structured logging setup
pub mod logging;
/// HTTP middleware
pub mod middleware;
/// HTTP routes
pub mod routes;
/// Id generator
pub mod snowflake;

/// Test utilities
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use employ_core::errors::{AppError, AppResult, ErrorCode};

// ABOUTME: Core types and constants for the employment records API
// ABOUTME: Foundation crate with error handling, error-code registry, constants, and models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Employ Core
//!
//! Foundation crate providing shared types and constants for the employment
//! records API. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, the error-code registry and domain error taxonomy
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Small validated domain values

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

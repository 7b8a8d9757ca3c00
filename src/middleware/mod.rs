// ABOUTME: HTTP middleware for CORS and administrative authentication
// ABOUTME: Layers are built from resolved settings, never from ambient environment state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Basic authentication for administrative routes
pub mod auth;
/// CORS layer
pub mod cors;

pub use auth::{credentials_match, parse_basic_authorization, require_basic_auth};
pub use cors::setup_cors;

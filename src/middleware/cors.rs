// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Builds the tower-http CORS layer from the resolved CORS settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::CorsSettings;

/// Configure CORS from the `cors` settings section
///
/// An empty host list or a `*` entry allows any origin. Entries that are not
/// valid header values are skipped; if none remain, any origin is allowed.
pub fn setup_cors(settings: &CorsSettings) -> CorsLayer {
    let allow_origin = if settings.allows_all_hosts() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = settings
            .allowed_hosts
            .iter()
            .filter_map(|host| match HeaderValue::from_str(host) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(host = %host, "Ignoring CORS host that is not a valid header value");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
}

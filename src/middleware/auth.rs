// ABOUTME: HTTP basic authentication middleware guarding administrative routes
// ABOUTME: Compares credentials in constant time against the configured basic-auth account
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use employ_core::errors::AppError;
use http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use http::{HeaderMap, HeaderValue};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::config::{BasicAuthSettings, Credentials};
use crate::context::ServerContext;

/// Decode an `Authorization: Basic ...` header into username and password
#[must_use]
pub fn parse_basic_authorization(headers: &HeaderMap) -> Option<(String, String)> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

/// Whether the supplied pair matches the configured account
#[must_use]
pub fn credentials_match(expected: &Credentials, username: &str, password: &str) -> bool {
    let username_ok = expected.username.as_bytes().ct_eq(username.as_bytes());
    let password_ok = expected.password.as_bytes().ct_eq(password.as_bytes());
    bool::from(username_ok & password_ok)
}

fn challenge(settings: &BasicAuthSettings, error: AppError) -> Response {
    let mut response = error.into_response();
    let value = format!("Basic realm=\"{}\"", settings.realm.replace('"', ""));
    if let Ok(value) = HeaderValue::from_str(&value) {
        response.headers_mut().insert(WWW_AUTHENTICATE, value);
    }
    response
}

/// Reject requests without valid basic-auth credentials
///
/// Passes everything through when basic auth is disabled.
pub async fn require_basic_auth(
    State(context): State<ServerContext>,
    request: Request,
    next: Next,
) -> Response {
    let settings = &context.settings().security().basic_auth;
    if !settings.is_enabled {
        return next.run(request).await;
    }

    match parse_basic_authorization(request.headers()) {
        None => challenge(settings, AppError::auth_required()),
        Some((username, password)) => {
            if credentials_match(&settings.credentials, &username, &password) {
                next.run(request).await
            } else {
                debug!(path = %request.uri().path(), "Rejected basic-auth credentials");
                challenge(settings, AppError::auth_invalid("Invalid username or password"))
            }
        }
    }
}

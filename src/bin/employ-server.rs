// ABOUTME: Server binary resolving configuration once and serving health and diagnostic routes
// ABOUTME: Aborts startup on invalid configuration or a broken error-code taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Employ Server Binary
//!
//! Loads the YAML configuration (plus `EMPLOY__*` overrides), resolves it into
//! validated settings and serves the HTTP routes.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use employ_core::errors::{taxonomy, ErrorCodeRegistry};
use employ_server::{
    config::{ConfigTree, SettingsCell, ENV_PREFIX},
    context::ServerContext,
    logging::LoggingConfig,
    routes,
};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Environment variable naming the configuration file
const CONFIG_ENV: &str = "EMPLOY_CONFIG";

#[derive(Parser)]
#[command(name = "employ-server")]
#[command(about = "Employ server - employee and employment records API")]
pub struct Args {
    /// Configuration file path (falls back to `EMPLOY_CONFIG`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,
}

fn load_tree(args: &Args) -> Result<ConfigTree> {
    let path = args
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .with_context(|| format!("No configuration file given, use --config or {CONFIG_ENV}"))?;

    let mut tree = ConfigTree::from_yaml_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        .with_env_overrides(ENV_PREFIX);

    if let Some(port) = args.port {
        tree.insert("deployment.port", port.to_string());
        tree.insert("deployment.ssl_port", port.to_string());
    }
    Ok(tree)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let tree = load_tree(&args)?;

    let cell = SettingsCell::new();
    let settings = cell
        .get_or_resolve(&tree)
        .context("Configuration is invalid")?;

    LoggingConfig::from_env(settings.deployment().deployment_type).init()?;
    info!("{}", settings.summary());

    taxonomy::register_all(ErrorCodeRegistry::global())
        .context("Error code taxonomy is inconsistent")?;

    let context = ServerContext::bootstrap(&cell, &tree)?;
    let bind_address = context.settings().deployment().bind_address();
    let app = routes::build_router(context);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!(
        address = %bind_address,
        endpoints = ?routes::registered_endpoints(),
        "Employ server listening"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Employ server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}

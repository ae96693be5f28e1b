// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Local identity discovery
//!
//! Runs only the metadata probe; no CloudAPI credentials are used.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use triton_provider_core::application::MetadataProbe;
use triton_provider_core::domain::provider_config::{MetadataConfig, ProviderConfig};
use triton_provider_core::infrastructure::MdataGetSource;

use super::print_json;

pub async fn handle_command(config_path: Option<PathBuf>, json: bool) -> Result<()> {
    // Metadata settings are optional here; fall back to defaults without a config file
    let metadata = match ProviderConfig::load(config_path) {
        Ok(config) => config.metadata,
        Err(e) => {
            tracing::debug!("No provider configuration, using metadata defaults: {:#}", e);
            MetadataConfig::default()
        }
    };

    let probe = MetadataProbe::with_timeout(
        Arc::new(MdataGetSource::new(metadata.command.clone())),
        metadata.timeout(),
    );
    let identity = probe
        .discover_local_identity()
        .await
        .context("Failed to discover local instance identity")?;

    if json {
        return print_json(&serde_json::to_value(&identity)?);
    }

    println!("{}", "Local instance:".bold());
    println!("  UUID: {}", identity.unique_id);
    println!("  Host name: {}", identity.host_name);
    if identity.host_name == identity.unique_id {
        println!("  {}", "(host name unavailable, using UUID)".dimmed());
    }

    Ok(())
}

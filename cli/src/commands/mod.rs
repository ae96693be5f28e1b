// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the Triton provider CLI

pub mod config;
pub mod instance;
pub mod whoami;

pub use self::config::ConfigCommand;
pub use self::instance::InstanceCommand;

use anyhow::{Context, Result};
use std::path::PathBuf;
use triton_provider_core::domain::provider_config::ProviderConfig;

/// Load and validate the provider configuration for a command
pub(crate) fn load_config(config_path: Option<PathBuf>) -> Result<ProviderConfig> {
    let config = ProviderConfig::load(config_path).context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

/// Print a serializable value as pretty JSON on stdout
pub(crate) fn print_json(value: &serde_json::Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to encode JSON output")?
    );
    Ok(())
}

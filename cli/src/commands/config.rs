// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use triton_provider_core::domain::provider_config::ProviderConfig;

use super::print_json;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths, json).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool, json: bool) -> Result<()> {
    let config = ProviderConfig::load(config_override.clone())
        .context("Failed to load configuration")?;

    if json {
        return print_json(&serde_json::to_value(&config)?);
    }

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. TRITON_PROVIDER_CONFIG: {}",
            std::env::var("TRITON_PROVIDER_CONFIG")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./triton-provider.yaml");
        println!("  4. ~/.triton/provider.yaml");
        println!("  5. /etc/triton/provider.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "CloudAPI:".bold());
    println!("  Endpoint: {}", config.global.endpoint_url);
    println!("  Account: {}", config.global.account_name);
    println!("  Key ID: {}", config.global.key_id);
    println!("  Key path: {}", config.global.key_path);
    println!();

    println!("{}", "Metadata:".bold());
    println!("  Command: {}", config.metadata.command);
    println!("  Timeout: {} ms", config.metadata.timeout_ms);
    println!();

    println!("{}", "Directory:".bold());
    println!("  Page size: {}", config.directory.page_size);
    println!("  Request timeout: {} s", config.directory.request_timeout_secs);
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ProviderConfig::load(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

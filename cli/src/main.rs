// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Triton Provider CLI
//!
//! The `triton-provider` binary drives the instance resolution surface of the
//! Triton cloud provider from a shell, the same way the orchestrator would.
//!
//! ## Commands
//!
//! - `triton-provider config show|validate` - Configuration management
//! - `triton-provider whoami` - Local identity from instance metadata
//! - `triton-provider instance addresses|id|instance-id|type|list|current-node-name` - Node facts
//!
//! Command output goes to stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use triton_provider::commands::{self, ConfigCommand, InstanceCommand};

/// Triton cloud provider - resolve orchestrator nodes to CloudAPI machines
#[derive(Parser)]
#[command(name = "triton-provider")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "TRITON_PROVIDER_CONFIG",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TRITON_PROVIDER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show the local instance identity from metadata
    #[command(name = "whoami")]
    Whoami,

    /// Query node facts through the provider
    #[command(name = "instance")]
    Instance {
        #[command(subcommand)]
        command: InstanceCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config, cli.json).await
        }
        Some(Commands::Whoami) => commands::whoami::handle_command(cli.config, cli.json).await,
        Some(Commands::Instance { command }) => {
            commands::instance::handle_command(command, cli.config, cli.json).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}

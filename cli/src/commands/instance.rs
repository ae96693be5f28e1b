// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Instance fact commands
//!
//! Commands: addresses, id, instance-id, type, list, current-node-name

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

use triton_provider_core::application::TritonCloudProvider;
use triton_provider_core::domain::cloud_provider::{CloudProvider, Instances};
use triton_provider_core::domain::node::NodeIdentifier;

use super::{load_config, print_json};

#[derive(Subcommand)]
pub enum InstanceCommand {
    /// Show the addresses of a node
    Addresses {
        /// Host name, primary IP or machine UUID
        #[arg(value_name = "NODE")]
        node: String,
    },

    /// Show the external ID of a running node
    Id {
        /// Host name, primary IP or machine UUID
        #[arg(value_name = "NODE")]
        node: String,
    },

    /// Show the machine UUID of a node
    InstanceId {
        /// Host name, primary IP or machine UUID
        #[arg(value_name = "NODE")]
        node: String,
    },

    /// Show the instance class (brand) of a node
    Type {
        /// Host name, primary IP or machine UUID
        #[arg(value_name = "NODE")]
        node: String,
    },

    /// List every machine UUID in the account
    List {
        /// Name filter (accepted for compatibility, not applied)
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Show the node name for a host name
    CurrentNodeName {
        /// Host name (default: this machine's host name)
        #[arg(value_name = "HOSTNAME")]
        hostname: Option<String>,
    },
}

pub async fn handle_command(
    command: InstanceCommand,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let provider = TritonCloudProvider::connect(&config)
        .await
        .context("Failed to initialize Triton cloud provider")?;
    let instances = provider
        .instances()
        .ok_or_else(|| anyhow!("Provider '{}' does not support instances", provider.provider_name()))?;

    run(instances, command, json).await
}

async fn run(instances: &dyn Instances, command: InstanceCommand, json: bool) -> Result<()> {
    match command {
        InstanceCommand::Addresses { node } => {
            let node = NodeIdentifier::new(node);
            let addresses = instances.node_addresses(&node).await?;
            if json {
                return print_json(&serde_json::to_value(&addresses)?);
            }
            println!("{}", format!("Addresses of {}:", node).bold());
            if addresses.is_empty() {
                println!("  {}", "(none)".dimmed());
            }
            for address in &addresses {
                println!("  {:<14} {}", address.kind.as_str(), address.address);
            }
        }
        InstanceCommand::Id { node } => {
            let id = instances.external_id(&NodeIdentifier::new(node)).await?;
            print_value("external_id", &id, json)?;
        }
        InstanceCommand::InstanceId { node } => {
            let id = instances.instance_id(&NodeIdentifier::new(node)).await?;
            print_value("instance_id", &id, json)?;
        }
        InstanceCommand::Type { node } => {
            let class = instances.instance_type(&NodeIdentifier::new(node)).await?;
            print_value("instance_type", &class, json)?;
        }
        InstanceCommand::List { filter } => {
            let nodes = instances.list(&filter).await?;
            if json {
                return print_json(&serde_json::to_value(&nodes)?);
            }
            for node in &nodes {
                println!("{}", node);
            }
            println!("{}", format!("{} instance(s)", nodes.len()).dimmed());
        }
        InstanceCommand::CurrentNodeName { hostname } => {
            let hostname = match hostname {
                Some(hostname) => hostname,
                None => local_hostname()?,
            };
            let name = instances.current_node_name(&hostname)?;
            print_value("node_name", name.as_str(), json)?;
        }
    }

    Ok(())
}

fn print_value(key: &str, value: &str, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ key: value }));
    }
    println!("{}", value);
    Ok(())
}

fn local_hostname() -> Result<String> {
    hostname::get()
        .context("Failed to read local host name")?
        .into_string()
        .map_err(|raw| anyhow!("Local host name is not valid UTF-8: {:?}", raw))
}

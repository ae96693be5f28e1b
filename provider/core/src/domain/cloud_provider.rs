// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Cloud Provider Surface
//!
//! The entry points the orchestrator's plugin lifecycle calls. Only the
//! [`Instances`] capability is implemented; load balancers, zones, clusters
//! and routes are permanently unsupported and reported as such through
//! [`CloudProvider::supports`].
//!
//! ## Error Contract
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `InstanceNotFound` | No machine matches, or it is not running for an identity-bearing query |
//! | `NetworkFailure` | CloudAPI unreachable or failing; surfaced as-is, never retried here |
//! | `MetadataUnavailable` | The local identity could not be discovered (construction only) |
//! | `Unimplemented` | Operation deliberately unsupported |
//! | `Configuration` | Invalid settings or credentials (construction only) |

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::directory::DirectoryError;
use crate::domain::metadata::MetadataError;
use crate::domain::node::{NodeAddress, NodeIdentifier};

pub const PROVIDER_NAME: &str = "triton";

/// Node-level queries the orchestrator issues per node
#[async_trait]
pub trait Instances: Send + Sync {
    /// Addresses of the node
    async fn node_addresses(&self, node: &NodeIdentifier) -> Result<Vec<NodeAddress>, CloudProviderError>;

    /// Cloud provider ID of the node; not-found unless the machine is running
    async fn external_id(&self, node: &NodeIdentifier) -> Result<String, CloudProviderError>;

    /// Same contract as `external_id`
    async fn instance_id(&self, node: &NodeIdentifier) -> Result<String, CloudProviderError>;

    /// Instance class of the node, regardless of state
    async fn instance_type(&self, node: &NodeIdentifier) -> Result<String, CloudProviderError>;

    /// Identifiers of every machine in the account
    async fn list(&self, filter: &str) -> Result<Vec<NodeIdentifier>, CloudProviderError>;

    /// Inject an SSH key into every instance
    async fn add_ssh_key_to_all_instances(&self, user: &str, key_data: &[u8]) -> Result<(), CloudProviderError>;

    /// Name of the node this process runs on, given the local host name
    fn current_node_name(&self, hostname: &str) -> Result<NodeIdentifier, CloudProviderError>;
}

/// Optional provider capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFeature {
    Instances,
    LoadBalancer,
    Zones,
    Clusters,
    Routes,
}

pub trait CloudProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn instances(&self) -> Option<&dyn Instances>;

    fn supports(&self, feature: ProviderFeature) -> bool;

    /// Filter DNS settings handed to workloads
    fn scrub_dns(&self, nameservers: Vec<String>, searches: Vec<String>) -> (Vec<String>, Vec<String>) {
        (nameservers, searches)
    }
}

#[derive(Debug, Error)]
pub enum CloudProviderError {
    #[error("instance not found")]
    InstanceNotFound,

    #[error("Network failure: {0}")]
    NetworkFailure(#[source] DirectoryError),

    #[error("Local instance metadata unavailable: {0}")]
    MetadataUnavailable(#[from] MetadataError),

    #[error("Unimplemented: {0}")]
    Unimplemented(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CloudProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudProviderError::InstanceNotFound)
    }
}

impl From<DirectoryError> for CloudProviderError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(_) => CloudProviderError::InstanceNotFound,
            other => CloudProviderError::NetworkFailure(other),
        }
    }
}

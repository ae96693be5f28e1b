// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::identity_resolver::IdentityResolver;
use crate::domain::cloud_provider::{CloudProviderError, Instances};
use crate::domain::directory::MachineDirectory;
use crate::domain::identity::LocalIdentity;
use crate::domain::node::{NodeAddress, NodeIdentifier};

/// Node facts for the orchestrator, derived from freshly resolved machines.
pub struct TritonInstances {
    resolver: IdentityResolver,
    directory: Arc<dyn MachineDirectory>,
}

impl TritonInstances {
    pub fn new(directory: Arc<dyn MachineDirectory>, local: LocalIdentity) -> Self {
        Self {
            resolver: IdentityResolver::new(directory.clone(), local),
            directory,
        }
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }
}

#[async_trait]
impl Instances for TritonInstances {
    async fn node_addresses(&self, node: &NodeIdentifier) -> Result<Vec<NodeAddress>, CloudProviderError> {
        debug!(%node, "Instances::node_addresses");
        Ok(self.resolver.resolve(node).await?.addresses())
    }

    async fn external_id(&self, node: &NodeIdentifier) -> Result<String, CloudProviderError> {
        debug!(%node, "Instances::external_id");
        self.resolver.resolve(node).await?.external_id()
    }

    async fn instance_id(&self, node: &NodeIdentifier) -> Result<String, CloudProviderError> {
        debug!(%node, "Instances::instance_id");
        self.resolver.resolve(node).await?.instance_id()
    }

    async fn instance_type(&self, node: &NodeIdentifier) -> Result<String, CloudProviderError> {
        debug!(%node, "Instances::instance_type");
        let resolved = self.resolver.resolve(node).await?;
        Ok(resolved.instance_class().to_string())
    }

    /// Every machine UUID in the account, in any state. The filter is not
    /// applied here; callers filter the result themselves.
    async fn list(&self, filter: &str) -> Result<Vec<NodeIdentifier>, CloudProviderError> {
        debug!(filter, "Instances::list");
        let machines = self.directory.list_machines().await?;
        Ok(machines
            .into_iter()
            .map(|machine| NodeIdentifier::new(machine.id))
            .collect())
    }

    async fn add_ssh_key_to_all_instances(&self, user: &str, _key_data: &[u8]) -> Result<(), CloudProviderError> {
        debug!(user, "Instances::add_ssh_key_to_all_instances");
        Err(CloudProviderError::Unimplemented("add_ssh_key_to_all_instances"))
    }

    fn current_node_name(&self, hostname: &str) -> Result<NodeIdentifier, CloudProviderError> {
        debug!(hostname, "Instances::current_node_name");
        Ok(NodeIdentifier::new(hostname))
    }
}

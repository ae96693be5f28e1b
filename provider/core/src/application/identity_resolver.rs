// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Identity Resolver
//
// Every per-node query funnels through `resolve`. Two paths:
//
// 1. Self fast path: the identifier equals the local host name, so the machine
//    is fetched directly by the local UUID. A node asking about itself is the
//    hottest call and must not pay for a full listing.
// 2. Peer path: CloudAPI has no server-side lookup by IP or host name, so the
//    whole account is listed once and scanned. Precedence across the listing
//    is primary IP, then host name, then machine UUID.

use std::sync::Arc;
use tracing::debug;

use crate::domain::cloud_provider::CloudProviderError;
use crate::domain::directory::MachineDirectory;
use crate::domain::identity::LocalIdentity;
use crate::domain::machine::{MachineRecord, ResolvedInstance};
use crate::domain::node::NodeIdentifier;

pub struct IdentityResolver {
    directory: Arc<dyn MachineDirectory>,
    local: LocalIdentity,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn MachineDirectory>, local: LocalIdentity) -> Self {
        Self { directory, local }
    }

    pub fn local_identity(&self) -> &LocalIdentity {
        &self.local
    }

    /// Locate the machine an identifier denotes.
    ///
    /// Fails with `InstanceNotFound` when nothing matches (or the self machine
    /// is not running) and with `NetworkFailure` when the directory errors.
    pub async fn resolve(&self, identifier: &NodeIdentifier) -> Result<ResolvedInstance, CloudProviderError> {
        if self.local.is_self(identifier) {
            return self.resolve_self(identifier).await;
        }
        self.resolve_peer(identifier).await
    }

    async fn resolve_self(&self, identifier: &NodeIdentifier) -> Result<ResolvedInstance, CloudProviderError> {
        debug!(%identifier, unique_id = %self.local.unique_id, "Resolving local instance by UUID");

        let machine = self.directory.get_machine(&self.local.unique_id).await?;
        if !machine.state.is_running() {
            debug!(%identifier, state = %machine.state, "Local instance is not running");
            return Err(CloudProviderError::InstanceNotFound);
        }
        Ok(ResolvedInstance::new(machine, true))
    }

    async fn resolve_peer(&self, identifier: &NodeIdentifier) -> Result<ResolvedInstance, CloudProviderError> {
        let machines = self.directory.list_machines().await?;
        debug!(%identifier, candidates = machines.len(), "Resolving peer by enumeration");

        match find_match(machines, identifier.as_str()) {
            Some(machine) => Ok(ResolvedInstance::new(machine, false)),
            None => {
                debug!(%identifier, "No machine matches identifier");
                Err(CloudProviderError::InstanceNotFound)
            }
        }
    }
}

/// Single pass over the listing; an IP match returns immediately, host name
/// and UUID matches are held until the scan rules out an IP match.
fn find_match(machines: Vec<MachineRecord>, identifier: &str) -> Option<MachineRecord> {
    let mut by_host_name = None;
    let mut by_id = None;

    for machine in machines {
        if machine.primary_ip == identifier {
            return Some(machine);
        }
        if by_host_name.is_none() && machine.host_name == identifier {
            by_host_name = Some(machine);
        } else if by_id.is_none() && machine.id == identifier {
            by_id = Some(machine);
        }
    }

    by_host_name.or(by_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::machine::MachineState;
    use crate::infrastructure::mock::MockMachineDirectory;

    fn machine(id: &str, ip: &str, host_name: &str, state: MachineState) -> MachineRecord {
        MachineRecord {
            id: id.to_string(),
            primary_ip: ip.to_string(),
            host_name: host_name.to_string(),
            state,
            instance_class: "joyent".to_string(),
        }
    }

    #[test]
    fn test_ip_match_beats_earlier_host_name_match() {
        let machines = vec![
            machine("a1", "10.0.0.1", "10.0.0.9", MachineState::Running),
            machine("b2", "10.0.0.9", "node-b", MachineState::Running),
        ];
        assert_eq!(find_match(machines, "10.0.0.9").unwrap().id, "b2");
    }

    #[test]
    fn test_host_name_match_beats_earlier_id_match() {
        let machines = vec![
            machine("node-x", "10.0.0.1", "node-a", MachineState::Running),
            machine("b2", "10.0.0.2", "node-x", MachineState::Running),
        ];
        assert_eq!(find_match(machines, "node-x").unwrap().id, "b2");
    }

    #[test]
    fn test_first_match_wins_within_a_namespace() {
        let machines = vec![
            machine("a1", "10.0.0.1", "dup", MachineState::Stopped),
            machine("b2", "10.0.0.2", "dup", MachineState::Running),
        ];
        assert_eq!(find_match(machines, "dup").unwrap().id, "a1");
    }

    #[test]
    fn test_id_match() {
        let machines = vec![machine("a1", "10.0.0.1", "node-a", MachineState::Running)];
        assert_eq!(find_match(machines, "a1").unwrap().host_name, "node-a");
        assert!(find_match(vec![], "a1").is_none());
    }

    #[tokio::test]
    async fn test_self_path_skips_enumeration() {
        let directory = Arc::new(MockMachineDirectory::new(vec![machine(
            "u-123",
            "10.0.0.9",
            "self-node",
            MachineState::Running,
        )]));
        let resolver = IdentityResolver::new(directory.clone(), LocalIdentity::new("u-123", "self-node"));

        let resolved = resolver.resolve(&NodeIdentifier::from("self-node")).await.unwrap();

        assert!(resolved.is_self);
        assert_eq!(resolved.machine.id, "u-123");
        assert_eq!(directory.get_calls(), 1);
        assert_eq!(directory.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_self_path_not_running_is_not_found() {
        let directory = Arc::new(MockMachineDirectory::new(vec![machine(
            "u-123",
            "10.0.0.9",
            "self-node",
            MachineState::Stopping,
        )]));
        let resolver = IdentityResolver::new(directory.clone(), LocalIdentity::new("u-123", "self-node"));

        let err = resolver.resolve(&NodeIdentifier::from("self-node")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(directory.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_is_not_downgraded() {
        let directory = Arc::new(MockMachineDirectory::new(vec![]));
        directory.set_unavailable(true);
        let resolver = IdentityResolver::new(directory.clone(), LocalIdentity::new("u-123", "self-node"));

        let peer = resolver.resolve(&NodeIdentifier::from("node-a")).await.unwrap_err();
        assert!(matches!(peer, CloudProviderError::NetworkFailure(_)));

        let local = resolver.resolve(&NodeIdentifier::from("self-node")).await.unwrap_err();
        assert!(matches!(local, CloudProviderError::NetworkFailure(_)));
    }
}

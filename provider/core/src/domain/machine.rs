// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Machine
//!
//! Cloud-side machine records and the facts derived from a resolved one.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Applies the instance-state gating: identity-bearing facts
//!   require a running machine, the instance class does not

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use tracing::warn;

use crate::domain::cloud_provider::CloudProviderError;
use crate::domain::node::{NodeAddress, NodeAddressKind};

/// Lifecycle state reported by CloudAPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    Running,
    Stopped,
    Stopping,
    Provisioning,
    Offline,
    Failed,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl MachineState {
    pub fn is_running(&self) -> bool {
        matches!(self, MachineState::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineState::Running => "running",
            MachineState::Stopped => "stopped",
            MachineState::Stopping => "stopping",
            MachineState::Provisioning => "provisioning",
            MachineState::Offline => "offline",
            MachineState::Failed => "failed",
            MachineState::Deleted => "deleted",
            MachineState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient copy of a machine as the directory reported it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRecord {
    /// Machine UUID, unique within the account
    pub id: String,
    /// Empty when CloudAPI reports no primary IP
    pub primary_ip: String,
    pub host_name: String,
    pub state: MachineState,
    /// Triton brand (e.g. "joyent", "lx", "kvm", "bhyve")
    pub instance_class: String,
}

/// A machine record matched to a caller's identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstance {
    pub machine: MachineRecord,
    /// True when resolved through the local identity fast path
    pub is_self: bool,
}

impl ResolvedInstance {
    pub fn new(machine: MachineRecord, is_self: bool) -> Self {
        Self { machine, is_self }
    }

    /// The primary IP reported under every orchestrator address kind.
    pub fn addresses(&self) -> Vec<NodeAddress> {
        let raw = self.machine.primary_ip.trim();
        if raw.is_empty() {
            warn!(machine_id = %self.machine.id, "Machine has no primary IP");
            return Vec::new();
        }

        let address = match raw.parse::<IpAddr>() {
            Ok(ip) => ip.to_string(),
            Err(_) => {
                warn!(
                    machine_id = %self.machine.id,
                    primary_ip = raw,
                    "Primary IP is not an IP literal, reporting it verbatim"
                );
                raw.to_string()
            }
        };

        NodeAddressKind::ALL
            .iter()
            .map(|kind| NodeAddress::new(*kind, address.clone()))
            .collect()
    }

    /// Machine UUID, only for a running machine.
    pub fn external_id(&self) -> Result<String, CloudProviderError> {
        if !self.machine.state.is_running() {
            return Err(CloudProviderError::InstanceNotFound);
        }
        Ok(self.machine.id.clone())
    }

    pub fn instance_id(&self) -> Result<String, CloudProviderError> {
        self.external_id()
    }

    pub fn instance_class(&self) -> &str {
        &self.machine.instance_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(state: MachineState, primary_ip: &str) -> MachineRecord {
        MachineRecord {
            id: "a1".to_string(),
            primary_ip: primary_ip.to_string(),
            host_name: "node-a".to_string(),
            state,
            instance_class: "lx".to_string(),
        }
    }

    #[test]
    fn test_addresses_reuse_primary_ip_for_every_kind() {
        let resolved = ResolvedInstance::new(machine(MachineState::Running, "10.0.0.1"), false);
        let addresses = resolved.addresses();

        assert_eq!(addresses.len(), 3);
        assert!(addresses.iter().all(|a| a.address == "10.0.0.1"));
        assert_eq!(addresses[0].kind, NodeAddressKind::LegacyHostIp);
        assert_eq!(addresses[1].kind, NodeAddressKind::InternalIp);
        assert_eq!(addresses[2].kind, NodeAddressKind::ExternalIp);
    }

    #[test]
    fn test_addresses_normalize_ipv6() {
        let resolved = ResolvedInstance::new(
            machine(MachineState::Running, "2001:0db8:0000:0000:0000:0000:0000:0001"),
            false,
        );
        assert_eq!(resolved.addresses()[0].address, "2001:db8::1");
    }

    #[test]
    fn test_addresses_empty_without_primary_ip() {
        let resolved = ResolvedInstance::new(machine(MachineState::Running, ""), false);
        assert!(resolved.addresses().is_empty());
    }

    #[test]
    fn test_identity_requires_running_state() {
        let stopped = ResolvedInstance::new(machine(MachineState::Stopped, "10.0.0.2"), false);
        assert!(matches!(stopped.external_id(), Err(CloudProviderError::InstanceNotFound)));
        assert!(matches!(stopped.instance_id(), Err(CloudProviderError::InstanceNotFound)));
        assert_eq!(stopped.instance_class(), "lx");

        let running = ResolvedInstance::new(machine(MachineState::Running, "10.0.0.1"), false);
        assert_eq!(running.external_id().unwrap(), "a1");
        assert_eq!(running.instance_id().unwrap(), "a1");
    }

    #[test]
    fn test_unknown_state_deserializes() {
        let state: MachineState = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(state, MachineState::Unknown);
        let state: MachineState = serde_json::from_str("\"running\"").unwrap();
        assert!(state.is_running());
    }
}

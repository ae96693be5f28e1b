// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Node-facing types handed back to the orchestrator.
//
// A `NodeIdentifier` carries no tag telling which namespace it belongs to:
// the same string may be a primary IP, a host name or a machine UUID, and the
// resolver tries all three.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque node identifier supplied by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIdentifier(String);

impl NodeIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Address kinds understood by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeAddressKind {
    #[serde(rename = "LegacyHostIP")]
    LegacyHostIp,
    #[serde(rename = "InternalIP")]
    InternalIp,
    #[serde(rename = "ExternalIP")]
    ExternalIp,
}

impl NodeAddressKind {
    /// Every kind a Triton machine's single primary IP is reported under
    pub const ALL: [NodeAddressKind; 3] = [
        NodeAddressKind::LegacyHostIp,
        NodeAddressKind::InternalIp,
        NodeAddressKind::ExternalIp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeAddressKind::LegacyHostIp => "LegacyHostIP",
            NodeAddressKind::InternalIp => "InternalIP",
            NodeAddressKind::ExternalIp => "ExternalIP",
        }
    }
}

impl fmt::Display for NodeAddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub kind: NodeAddressKind,
    pub address: String,
}

impl NodeAddress {
    pub fn new(kind: NodeAddressKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use crate::domain::node::NodeIdentifier;

/// Who this process is running on, as reported by the in-guest metadata.
///
/// Discovered once when the provider is constructed and injected into the
/// resolver; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIdentity {
    pub unique_id: String,
    pub host_name: String,
}

impl LocalIdentity {
    pub fn new(unique_id: impl Into<String>, host_name: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            host_name: host_name.into(),
        }
    }

    /// Identity for a guest whose host name could not be read
    pub fn without_host_name(unique_id: impl Into<String>) -> Self {
        let unique_id = unique_id.into();
        Self {
            host_name: unique_id.clone(),
            unique_id,
        }
    }

    pub fn is_self(&self, identifier: &NodeIdentifier) -> bool {
        identifier.as_str() == self.host_name
    }
}

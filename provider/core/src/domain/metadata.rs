// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// In-guest metadata contract.
//
// SmartOS/Triton guests expose facts about themselves through a local,
// non-networked channel keyed by well-known names. The probe bounds every
// query with its own timeout, so sources may block.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Key holding the instance UUID
pub const UUID_KEY: &str = "sdc:uuid";

/// Key holding the instance host name
pub const HOSTNAME_KEY: &str = "sdc:hostname";

#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Raw value stored under `key`
    async fn get(&self, key: &str) -> Result<String, MetadataError>;
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata query for '{key}' timed out after {timeout:?}")]
    Timeout { key: String, timeout: Duration },

    #[error("Metadata command failed for '{key}': {reason}")]
    CommandFailed { key: String, reason: String },

    #[error("Metadata key '{0}' returned an empty value")]
    Empty(String),

    #[error("Failed to run metadata command: {0}")]
    Io(#[from] std::io::Error),
}

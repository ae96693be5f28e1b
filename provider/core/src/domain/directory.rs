// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Machine Directory Trait - Anti-Corruption Layer for CloudAPI
//!
//! The only contract in the crate that implies network I/O. Implementations
//! never cache: `running` vs not changes underneath us and must never be
//! served stale.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::machine::MachineRecord;

#[async_trait]
pub trait MachineDirectory: Send + Sync {
    /// Every machine in the account, all pages exhausted, unfiltered
    async fn list_machines(&self) -> Result<Vec<MachineRecord>, DirectoryError>;

    /// Direct lookup by exact machine UUID
    async fn get_machine(&self, id: &str) -> Result<MachineRecord, DirectoryError>;
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Machine not found: {0}")]
    NotFound(String),

    #[error("CloudAPI returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout while communicating with CloudAPI")]
    Timeout,

    #[error("Failed to decode CloudAPI response: {0}")]
    Decode(String),

    #[error("Failed to sign request: {0}")]
    Signing(String),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DirectoryError::Timeout
        } else if err.is_decode() {
            DirectoryError::Decode(err.to_string())
        } else {
            DirectoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Decode(err.to_string())
    }
}

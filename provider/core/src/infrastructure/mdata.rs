// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `mdata-get` Metadata Source
//!
//! Reads SmartOS/Triton guest metadata by running the `mdata-get` utility,
//! one child process per key. The child is killed if the caller drops the
//! future, which is how the probe's timeout reclaims a hung query.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::metadata::{MetadataError, MetadataSource};

pub struct MdataGetSource {
    command: String,
}

impl MdataGetSource {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for MdataGetSource {
    fn default() -> Self {
        Self::new("/usr/sbin/mdata-get")
    }
}

#[async_trait]
impl MetadataSource for MdataGetSource {
    async fn get(&self, key: &str) -> Result<String, MetadataError> {
        debug!(command = %self.command, key, "Querying guest metadata");

        let output = Command::new(&self.command)
            .arg(key)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(MetadataError::CommandFailed {
                key: key.to_string(),
                reason: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            return Err(MetadataError::Empty(key.to_string()));
        }
        Ok(value)
    }
}

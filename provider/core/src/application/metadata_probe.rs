// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::identity::LocalIdentity;
use crate::domain::metadata::{MetadataError, MetadataSource, HOSTNAME_KEY, UUID_KEY};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(400);

/// Discovers the local instance's identity from in-guest metadata.
///
/// The UUID is required; the host name is optional and falls back to the
/// UUID. Both queries run concurrently, each under its own timeout, and
/// neither is retried.
pub struct MetadataProbe {
    source: Arc<dyn MetadataSource>,
    timeout: Duration,
}

impl MetadataProbe {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self::with_timeout(source, DEFAULT_PROBE_TIMEOUT)
    }

    pub fn with_timeout(source: Arc<dyn MetadataSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub async fn discover_local_identity(&self) -> Result<LocalIdentity, MetadataError> {
        let (unique_id, host_name) = tokio::join!(self.query(UUID_KEY), self.query(HOSTNAME_KEY));

        let unique_id = unique_id?;
        let identity = match host_name {
            Ok(host_name) => LocalIdentity::new(unique_id, host_name),
            Err(e) => {
                warn!("Host name metadata unavailable, using instance UUID instead: {}", e);
                LocalIdentity::without_host_name(unique_id)
            }
        };

        info!(
            unique_id = %identity.unique_id,
            host_name = %identity.host_name,
            "Discovered local instance identity"
        );
        Ok(identity)
    }

    async fn query(&self, key: &str) -> Result<String, MetadataError> {
        let value = tokio::time::timeout(self.timeout, self.source.get(key))
            .await
            .map_err(|_| MetadataError::Timeout {
                key: key.to_string(),
                timeout: self.timeout,
            })??;

        let value = value.trim();
        if value.is_empty() {
            return Err(MetadataError::Empty(key.to_string()));
        }
        Ok(value.to_string())
    }
}

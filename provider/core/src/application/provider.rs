// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Triton Cloud Provider
//!
//! Assembles the provider from configuration:
//!
//! 1. **Credentials**: read the configured PEM key and build the CloudAPI signer.
//! 2. **Directory**: signed CloudAPI client wrapped in `TritonMachineDirectory`.
//! 3. **Local identity**: one `mdata-get` probe; failure aborts construction.
//! 4. **Self check**: look the local machine up once and log what CloudAPI
//!    reports. Not fatal: the node may still be provisioning.
//!
//! Tests and embedders that already hold a directory and an identity use
//! [`TritonCloudProvider::new`] directly.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::instances::TritonInstances;
use crate::application::metadata_probe::MetadataProbe;
use crate::domain::cloud_provider::{CloudProvider, CloudProviderError, Instances, ProviderFeature, PROVIDER_NAME};
use crate::domain::directory::MachineDirectory;
use crate::domain::identity::LocalIdentity;
use crate::domain::metadata::MetadataSource;
use crate::domain::provider_config::ProviderConfig;
use crate::infrastructure::mdata::MdataGetSource;
use crate::infrastructure::triton::{CloudApiClient, PrivateKeySigner, TritonMachineDirectory};

pub struct TritonCloudProvider {
    instances: TritonInstances,
}

impl TritonCloudProvider {
    pub fn new(directory: Arc<dyn MachineDirectory>, identity: LocalIdentity) -> Self {
        Self {
            instances: TritonInstances::new(directory, identity),
        }
    }

    /// Build the provider against CloudAPI using the guest's `mdata-get`
    pub async fn connect(config: &ProviderConfig) -> Result<Self, CloudProviderError> {
        let source = Arc::new(MdataGetSource::new(config.metadata.command.clone()));
        Self::connect_with_metadata(config, source).await
    }

    pub async fn connect_with_metadata(
        config: &ProviderConfig,
        metadata: Arc<dyn MetadataSource>,
    ) -> Result<Self, CloudProviderError> {
        config
            .validate()
            .map_err(|e| CloudProviderError::Configuration(e.to_string()))?;

        let directory = Arc::new(Self::build_directory(config).await?);

        let probe = MetadataProbe::with_timeout(metadata, config.metadata.timeout());
        let identity = probe.discover_local_identity().await?;

        match directory.get_machine(&identity.unique_id).await {
            Ok(machine) => info!(
                machine_id = %machine.id,
                state = %machine.state,
                primary_ip = %machine.primary_ip,
                "Local instance visible in CloudAPI"
            ),
            Err(e) => warn!(unique_id = %identity.unique_id, "Local instance lookup failed: {}", e),
        }

        info!(
            endpoint = %config.global.endpoint_url,
            account = %config.global.account_name,
            "Triton cloud provider initialized"
        );
        Ok(Self::new(directory, identity))
    }

    async fn build_directory(config: &ProviderConfig) -> Result<TritonMachineDirectory, CloudProviderError> {
        let global = &config.global;

        let pem = tokio::fs::read_to_string(&global.key_path).await.map_err(|e| {
            CloudProviderError::Configuration(format!(
                "could not access configured key-path {}: {}",
                global.key_path, e
            ))
        })?;

        let signer = PrivateKeySigner::from_pem(&global.account_name, &global.key_id, &pem)
            .map_err(|e| CloudProviderError::Configuration(e.to_string()))?;

        let client = CloudApiClient::new(
            global.endpoint_url.clone(),
            global.account_name.clone(),
            Arc::new(signer),
            config.directory.request_timeout(),
        )
        .map_err(|e| CloudProviderError::Configuration(e.to_string()))?;

        Ok(TritonMachineDirectory::with_page_size(client, config.directory.page_size))
    }

    pub fn local_identity(&self) -> &LocalIdentity {
        self.instances.resolver().local_identity()
    }
}

impl CloudProvider for TritonCloudProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn instances(&self) -> Option<&dyn Instances> {
        Some(&self.instances)
    }

    fn supports(&self, feature: ProviderFeature) -> bool {
        matches!(feature, ProviderFeature::Instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{HOSTNAME_KEY, UUID_KEY};
    use crate::infrastructure::mock::{MockMachineDirectory, MockMetadataSource};
    use std::io::Write;

    fn config(key_path: &str) -> ProviderConfig {
        ProviderConfig::from_yaml_str(&format!(
            r#"
global:
  endpoint-url: http://127.0.0.1:1
  key-id: 95:ec:59
  key-path: {}
  account: testuser
"#,
            key_path
        ))
        .unwrap()
    }

    #[test]
    fn test_provider_surface() {
        let provider = TritonCloudProvider::new(
            Arc::new(MockMachineDirectory::new(vec![])),
            LocalIdentity::new("u-123", "self-node"),
        );

        assert_eq!(provider.provider_name(), "triton");
        assert!(provider.instances().is_some());
        assert!(provider.supports(ProviderFeature::Instances));
        for feature in [
            ProviderFeature::LoadBalancer,
            ProviderFeature::Zones,
            ProviderFeature::Clusters,
            ProviderFeature::Routes,
        ] {
            assert!(!provider.supports(feature));
        }

        let (ns, search) = provider.scrub_dns(vec!["8.8.8.8".to_string()], vec!["example.com".to_string()]);
        assert_eq!(ns, vec!["8.8.8.8"]);
        assert_eq!(search, vec!["example.com"]);
        assert_eq!(provider.local_identity().host_name, "self-node");
    }

    #[tokio::test]
    async fn test_connect_fails_on_missing_key() {
        let metadata = Arc::new(MockMetadataSource::new([(UUID_KEY, "u-123"), (HOSTNAME_KEY, "self-node")]));
        let err = TritonCloudProvider::connect_with_metadata(&config("/nonexistent/api_key"), metadata.clone())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, CloudProviderError::Configuration(ref msg) if msg.contains("key-path")));
        assert_eq!(metadata.calls(), 0);
    }

    #[tokio::test]
    async fn test_connect_fails_on_invalid_key() {
        let mut key = tempfile::NamedTempFile::new().unwrap();
        key.write_all(b"not a key").unwrap();
        let metadata = Arc::new(MockMetadataSource::new([(UUID_KEY, "u-123")]));

        let err = TritonCloudProvider::connect_with_metadata(&config(key.path().to_str().unwrap()), metadata)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, CloudProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let mut cfg = config("/etc/kubernetes/api_key");
        cfg.global.account_name = String::new();
        let metadata = Arc::new(MockMetadataSource::new([(UUID_KEY, "u-123")]));

        let err = TritonCloudProvider::connect_with_metadata(&cfg, metadata).await.err().unwrap();
        assert!(matches!(err, CloudProviderError::Configuration(_)));
    }
}

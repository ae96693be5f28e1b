// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Provider Configuration
//
// Connection parameters for CloudAPI plus tuning for the metadata probe and
// the machine directory:
//
// global:
//   endpoint-url: https://us-sw-1.api.joyent.com
//   key-id: 95:ec:59:3d:73:a8:ae:6b:d0:ec:21:d7:6e:e9:f5:6e
//   key-path: /etc/kubernetes/api_key
//   account: testuser

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest page CloudAPI serves for ListMachines
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub global: GlobalConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// CloudAPI endpoint (e.g., "https://us-sw-1.api.joyent.com")
    pub endpoint_url: String,

    /// MD5 fingerprint of the account's SSH key
    pub key_id: String,

    /// PEM private key matching `key_id`
    pub key_path: String,

    /// Account (login) name
    #[serde(rename = "account")]
    pub account_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataConfig {
    /// Path to the `mdata-get` binary
    #[serde(default = "default_mdata_command")]
    pub command: String,

    /// Per-probe timeout in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DirectoryConfig {
    /// Machines requested per ListMachines page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            command: default_mdata_command(),
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MetadataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DirectoryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read the provider configuration; a missing reader is an error.
pub fn read_config<R: Read>(config: Option<R>) -> anyhow::Result<ProviderConfig> {
    let Some(mut reader) = config else {
        anyhow::bail!("no Triton cloud provider config file given");
    };

    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    ProviderConfig::from_yaml_str(&content)
}

impl ProviderConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Discover configuration file using precedence order
    /// 1. TRITON_PROVIDER_CONFIG environment variable
    /// 2. ./triton-provider.yaml (working directory)
    /// 3. ~/.triton/provider.yaml (user home)
    /// 4. /etc/triton/provider.yaml (system)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TRITON_PROVIDER_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./triton-provider.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".triton").join("provider.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        let system_config = PathBuf::from("/etc/triton/provider.yaml");
        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration from an explicit path or discovery, then apply
    /// environment overrides. There is no usable default: CloudAPI
    /// credentials must come from somewhere.
    pub fn load(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = match cli_path {
            Some(path) => {
                tracing::info!("Loading configuration from explicit path: {:?}", path);
                path
            }
            None => {
                let path = Self::discover_config()
                    .ok_or_else(|| anyhow::anyhow!("no Triton cloud provider config file given"))?;
                tracing::info!("Loading configuration from discovered path: {:?}", path);
                path
            }
        };

        let file = std::fs::File::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open config at {:?}: {}", path, e))?;
        let mut config = read_config(Some(file))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply the standard Triton tool environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut String); 4] = [
            ("TRITON_URL", &mut self.global.endpoint_url),
            ("TRITON_ACCOUNT", &mut self.global.account_name),
            ("TRITON_KEY_ID", &mut self.global.key_id),
            ("TRITON_KEY_PATH", &mut self.global.key_path),
        ];

        for (name, field) in overrides {
            if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                tracing::info!("Environment override: {}", name);
                *field = value;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let global = &self.global;
        if global.endpoint_url.is_empty() {
            anyhow::bail!("global.endpoint-url cannot be empty");
        }
        if global.key_id.is_empty() {
            anyhow::bail!("global.key-id cannot be empty");
        }
        if global.key_path.is_empty() {
            anyhow::bail!("global.key-path cannot be empty");
        }
        if global.account_name.is_empty() {
            anyhow::bail!("global.account cannot be empty");
        }

        let endpoint = url::Url::parse(&global.endpoint_url)
            .map_err(|e| anyhow::anyhow!("Invalid endpoint-url '{}': {}", global.endpoint_url, e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("endpoint-url must use http or https, got '{}'", endpoint.scheme());
        }

        if self.directory.page_size == 0 || self.directory.page_size > MAX_PAGE_SIZE {
            anyhow::bail!(
                "directory.page-size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.directory.page_size
            );
        }

        if self.metadata.timeout_ms == 0 {
            anyhow::bail!("metadata.timeout-ms must be greater than zero");
        }

        Ok(())
    }
}

fn default_mdata_command() -> String {
    "/usr/sbin/mdata-get".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    400
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const TEST_CONFIG: &str = r#"
global:
  endpoint-url: https://us-sw-1.api.joyent.com
  key-id: 95:ec:59:3d:73:a8:ae:6b:d0:ec:21:d7:6e:e9:f5:6e
  key-path: /etc/kubernetes/api_key
  account: testuser
"#;

    #[test]
    fn test_read_config_requires_input() {
        let err = read_config::<&[u8]>(None).unwrap_err();
        assert!(err.to_string().contains("no Triton cloud provider config file given"));
    }

    #[test]
    fn test_read_config() {
        let cfg = read_config(Some(TEST_CONFIG.as_bytes())).unwrap();
        assert_eq!(cfg.global.endpoint_url, "https://us-sw-1.api.joyent.com");
        assert_eq!(cfg.global.key_id, "95:ec:59:3d:73:a8:ae:6b:d0:ec:21:d7:6e:e9:f5:6e");
        assert_eq!(cfg.global.account_name, "testuser");
        assert_eq!(cfg.global.key_path, "/etc/kubernetes/api_key");

        assert_eq!(cfg.metadata.command, "/usr/sbin/mdata-get");
        assert_eq!(cfg.metadata.timeout(), Duration::from_millis(400));
        assert_eq!(cfg.directory.page_size, 1000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_CONFIG.as_bytes()).unwrap();

        let cfg = ProviderConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.global.account_name, "testuser");

        assert!(ProviderConfig::load(Some(PathBuf::from("/nonexistent/provider.yaml"))).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = read_config(Some(TEST_CONFIG.as_bytes())).unwrap();
        let env = HashMap::from([
            ("TRITON_URL", "https://us-east-1.api.joyent.com"),
            ("TRITON_ACCOUNT", "otheruser"),
            ("TRITON_KEY_ID", ""),
        ]);

        cfg.apply_overrides_from(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(cfg.global.endpoint_url, "https://us-east-1.api.joyent.com");
        assert_eq!(cfg.global.account_name, "otheruser");
        // Empty values never clear configured settings
        assert_eq!(cfg.global.key_id, "95:ec:59:3d:73:a8:ae:6b:d0:ec:21:d7:6e:e9:f5:6e");
        assert_eq!(cfg.global.key_path, "/etc/kubernetes/api_key");
    }

    #[test]
    fn test_validation() {
        let mut cfg = read_config(Some(TEST_CONFIG.as_bytes())).unwrap();

        cfg.global.account_name = "".to_string();
        assert!(cfg.validate().is_err());
        cfg.global.account_name = "testuser".to_string();

        cfg.global.endpoint_url = "ftp://example.com".to_string();
        assert!(cfg.validate().is_err());
        cfg.global.endpoint_url = "not a url".to_string();
        assert!(cfg.validate().is_err());
        cfg.global.endpoint_url = "https://us-sw-1.api.joyent.com".to_string();

        cfg.directory.page_size = 0;
        assert!(cfg.validate().is_err());
        cfg.directory.page_size = 5000;
        assert!(cfg.validate().is_err());
        cfg.directory.page_size = 100;

        cfg.metadata.timeout_ms = 0;
        assert!(cfg.validate().is_err());
        cfg.metadata.timeout_ms = 250;

        assert!(cfg.validate().is_ok());
    }
}

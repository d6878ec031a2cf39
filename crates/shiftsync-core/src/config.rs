//! Configuration for the sync tool.
//!
//! Core logic never reads ambient process state; everything arrives through
//! an explicit [`SyncConfig`] built here and passed into the clients and
//! commands at construction time. Resolution order: an explicit `--config`
//! path, then `./shiftsync.toml`, then the user config directory, then
//! built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Cluster whose devices this plant schedules on.
    #[serde(default)]
    pub cluster_id: String,
    /// Application identity presented to the event-group store.
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub erp: ErpConfig,
    #[serde(default)]
    pub lighthouse: LighthouseConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// ERP schedule endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpConfig {
    #[serde(default)]
    pub base_url: String,
    /// Pre-established session token; the login handshake happens outside
    /// this tool.
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default = "default_erp_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            session_token: None,
            timeout_secs: default_erp_timeout_secs(),
        }
    }
}

/// Event-group store endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LighthouseConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_lighthouse_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LighthouseConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout_secs: default_lighthouse_timeout_secs(),
        }
    }
}

/// Local assignment snapshot location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the locally-tracked assignment records.
    #[serde(default = "default_store_path")]
    pub assignments_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            assignments_path: default_store_path(),
        }
    }
}

/// Load configuration from an explicit path.
pub fn load_config(path: &Path) -> Result<SyncConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str::<SyncConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve configuration without an explicit path.
///
/// Checks `./shiftsync.toml`, then `<config dir>/shiftsync/config.toml`;
/// missing files fall back to defaults, unparseable files are errors.
pub fn resolve_config() -> Result<SyncConfig> {
    let local = Path::new("shiftsync.toml");
    if local.exists() {
        return load_config(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("shiftsync/config.toml");
        if user.exists() {
            return load_config(&user);
        }
    }

    Ok(SyncConfig::default())
}

const fn default_erp_timeout_secs() -> u64 {
    8
}

const fn default_lighthouse_timeout_secs() -> u64 {
    15
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".shiftsync/assignments.json")
}

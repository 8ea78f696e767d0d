// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::head::fragments::{self, HeadFragment};
use crate::head::injector::InjectionPolicy;
use crate::infra::errors::{LucenceError, Result};
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub head: HeadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token required for upload and delete. Open when unset.
    pub token: Option<String>,
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8090,
            token: None,
            allowed_origins: vec![
                "http://localhost:8090".into(),
                "http://127.0.0.1:8090".into(),
            ],
            max_upload_bytes: 4 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Explicit asset root. Defaults to `<install-dir>/lucence`.
    #[serde(default)]
    pub root: Option<String>,
}

impl StoreConfig {
    pub fn resolve_root(&self) -> PathBuf {
        match self.root {
            Some(ref root) => PathBuf::from(root),
            None => paths::default_store_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    pub policy: InjectionPolicy,
    /// Render contexts that receive the fragments under the conditional policy.
    pub contexts: Vec<String>,
    /// URL prefix of the bundled static assets referenced by the default fragments.
    pub asset_prefix: String,
    /// Replaces the built-in katex + mermaid table when present.
    pub fragments: Option<Vec<HeadFragment>>,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            policy: InjectionPolicy::Conditional,
            contexts: vec!["page".into(), "post".into()],
            asset_prefix: fragments::DEFAULT_ASSET_PREFIX.into(),
            fragments: None,
        }
    }
}

impl HeadConfig {
    /// The fragment table in injection order.
    pub fn fragment_table(&self) -> Vec<HeadFragment> {
        match self.fragments {
            Some(ref table) => table.clone(),
            None => fragments::default_fragments(&self.asset_prefix),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| LucenceError::Config(format!("{}: {}", path.display(), e)))
    }
}

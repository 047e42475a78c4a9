use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, ClientState, RemoteConfig};

pub const STORE_DIR: &str = ".clipwatch";

/// On-disk client configuration: `config.json` plus `state.json` for secrets.
#[derive(Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn default_dir(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(anyhow!(
                "No client configuration found at {} (run `clipwatch login --url ... --token ...`)",
                root.display()
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Opens the store, creating an empty one when the directory is missing.
    pub fn open_or_init(root: &Path) -> Result<Self> {
        if root.is_dir() {
            return Self::open(root);
        }

        fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };
        store.write_config(&ClientConfig {
            version: 1,
            remote: None,
        })?;
        store.write_state(&ClientState {
            version: 1,
            ..ClientState::default()
        })?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported client config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<ClientState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(ClientState {
                version: 1,
                ..ClientState::default()
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported client state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn get_remote_token(&self, remote: &RemoteConfig) -> Result<Option<String>> {
        let st = self.read_state()?;
        Ok(st.remote_tokens.get(&remote.base_url).cloned())
    }

    pub fn set_remote_token(&self, remote: &RemoteConfig, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.remote_tokens
            .insert(remote.base_url.clone(), token.to_string());
        self.write_state(&st)
    }

    pub fn clear_remote_token(&self, remote: &RemoteConfig) -> Result<()> {
        let mut st = self.read_state()?;
        st.remote_tokens.remove(&remote.base_url);
        self.write_state(&st)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

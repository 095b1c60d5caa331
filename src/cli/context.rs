//! Per-invocation state of a command
//!
//! The merged configuration and the open connection live here instead of in
//! process globals. The connection is dialed before a command body runs and
//! released when the context is dropped, on every exit path.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{env_lookup, expand_path, load_config, AppConfig, ConfigOverrides, LoadedConfig};
use crate::error::{CliError, Result};
use crate::network::{AergoClient, PolarisClient};
use crate::storage::{default_keystore_dir, KeyStore};

pub struct CommandContext<C, K> {
    pub loaded: LoadedConfig<C>,
    client: Option<K>,
}

impl<C: AppConfig, K> CommandContext<C, K> {
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let loaded = load_config::<C>(overrides, &env_lookup)?;
        debug!("Using config {}", loaded.path.display());
        Ok(CommandContext {
            loaded,
            client: None,
        })
    }

    pub fn from_loaded(loaded: LoadedConfig<C>) -> Self {
        CommandContext {
            loaded,
            client: None,
        }
    }

    pub fn config(&self) -> &C {
        &self.loaded.config
    }

    pub fn home(&self) -> &Path {
        &self.loaded.home
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// The client dialed by the connect hook
    pub fn client(&self) -> Result<&K> {
        self.client
            .as_ref()
            .ok_or_else(|| CliError::Input("not connected to a server".to_string()))
    }

    fn attach(&mut self, client: K) {
        self.client = Some(client);
    }

    /// Keystore at `explicit`, or `<home>/data/keystore`
    pub fn keystore(&self, explicit: Option<&str>) -> Result<KeyStore> {
        KeyStore::open(self.keystore_dir(explicit))
    }

    pub fn keystore_dir(&self, explicit: Option<&str>) -> PathBuf {
        match explicit.filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(expand_path(path, &self.loaded.home, &env_lookup)),
            None => default_keystore_dir(&self.loaded.home),
        }
    }
}

impl<C, K> Drop for CommandContext<C, K> {
    fn drop(&mut self) {
        if self.client.take().is_some() {
            debug!("Connection closed");
        }
    }
}

pub type NodeContext = CommandContext<crate::config::CliConfig, AergoClient>;
pub type PolarisContext = CommandContext<crate::config::PolarisCliConfig, PolarisClient>;

impl NodeContext {
    /// Dial the node named by the merged host and port
    pub async fn connect(&mut self) -> Result<&AergoClient> {
        if !self.is_connected() {
            let (host, port) = (self.config().host.clone(), self.config().port);
            debug!("Dialing node at {host}:{port}");
            let client = AergoClient::connect(&host, port).await?;
            self.attach(client);
        }
        self.client()
    }

    /// Key file configured with `--key` or `keyfile`, if any
    pub fn keyfile(&self) -> Option<&str> {
        Some(self.config().keyfile.as_str()).filter(|k| !k.is_empty())
    }
}

impl PolarisContext {
    pub async fn connect(&mut self) -> Result<&PolarisClient> {
        if !self.is_connected() {
            let (host, port) = (self.config().host.clone(), self.config().port);
            debug!("Dialing polaris at {host}:{port}");
            let client = PolarisClient::connect(&host, port).await?;
            self.attach(client);
        }
        self.client()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;

    fn context(dir: &Path) -> NodeContext {
        let overrides = ConfigOverrides {
            home: Some(dir.to_string_lossy().into_owned()),
            ..Default::default()
        };
        NodeContext::load(&overrides).unwrap()
    }

    #[test]
    fn test_not_connected_until_hook_runs() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        assert!(!ctx.is_connected());
        assert!(ctx.client().is_err());
        assert_eq!(ctx.config(), &CliConfig::default());
    }

    #[test]
    fn test_keystore_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        assert_eq!(
            ctx.keystore_dir(None),
            dir.path().join("data").join("keystore")
        );
        let explicit = ctx.keystore_dir(Some("$HOME/ks"));
        assert_eq!(
            explicit,
            PathBuf::from(format!("{}/ks", dir.path().to_string_lossy().replace('\\', "/")))
        );
    }

    #[test]
    fn test_keyfile_unset_by_default() {
        let dir = tempfile::tempdir().unwrap();
        assert!(context(dir.path()).keyfile().is_none());
    }
}

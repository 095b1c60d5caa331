//! Typed configuration for the node and polaris CLIs
//!
//! Values are merged from, lowest to highest precedence: built-in defaults,
//! the TOML file in the home directory, `AG_` prefixed environment
//! variables and command-line flags. A missing config file is rendered from
//! a template of the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::home::{ensure_dir, expand_path, resolve_home};
use crate::error::{CliError, Result};

pub const ENV_PREFIX: &str = "AG_";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_NODE_PORT: u16 = 7845;
pub const DEFAULT_POLARIS_PORT: u16 = 8915;

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub home: Option<String>,
    pub config: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub keyfile: Option<String>,
}

/// Behaviour shared by the per-binary config records
pub trait AppConfig: Serialize + DeserializeOwned + Default + Clone {
    /// File name inside the home directory
    const FILE_NAME: &'static str;

    /// Comment line opening a fresh config file
    const TEMPLATE_HEADER: &'static str;

    /// Text of a fresh config file holding `self`, serialized by `toml` so
    /// strings are escaped the TOML way
    fn render_template(&self) -> Result<String> {
        let body = toml::to_string(self)
            .map_err(|e| CliError::Config(format!("cannot render config: {e}")))?;
        Ok(format!("{}\n{body}", Self::TEMPLATE_HEADER))
    }

    /// Overlay one environment value; `key` is the lowercase option name
    fn apply_env(&mut self, key: &str, value: &str) -> Result<()>;

    fn env_keys() -> &'static [&'static str];

    fn apply_flags(&mut self, overrides: &ConfigOverrides);

    /// Expand variables in path valued options
    fn expand_paths(&mut self, _home: &Path, _lookup: &dyn Fn(&str) -> Option<String>) {}
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("invalid {key} value {value:?}")))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub loglevel: String,
    pub keyfile: String,
    pub host: String,
    pub port: u16,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            keyfile: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_NODE_PORT,
        }
    }
}

impl AppConfig for CliConfig {
    const FILE_NAME: &'static str = "cliconfig.toml";
    const TEMPLATE_HEADER: &'static str =
        "# aergo cli TOML Configuration File (https://github.com/toml-lang/toml)";

    fn apply_env(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "loglevel" => self.loglevel = value.to_string(),
            "keyfile" => self.keyfile = value.to_string(),
            "host" => self.host = value.to_string(),
            "port" => self.port = parse_port(key, value)?,
            _ => {}
        }
        Ok(())
    }

    fn env_keys() -> &'static [&'static str] {
        &["loglevel", "keyfile", "host", "port"]
    }

    fn apply_flags(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(keyfile) = &overrides.keyfile {
            self.keyfile = keyfile.clone();
        }
    }

    fn expand_paths(&mut self, home: &Path, lookup: &dyn Fn(&str) -> Option<String>) {
        if !self.keyfile.is_empty() {
            self.keyfile = expand_path(&self.keyfile, home, lookup);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarisCliConfig {
    pub host: String,
    pub port: u16,
}

impl Default for PolarisCliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_POLARIS_PORT,
        }
    }
}

impl AppConfig for PolarisCliConfig {
    const FILE_NAME: &'static str = "polariscliconfig.toml";
    const TEMPLATE_HEADER: &'static str =
        "# polaris cli TOML Configuration File (https://github.com/toml-lang/toml)";

    fn apply_env(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "host" => self.host = value.to_string(),
            "port" => self.port = parse_port(key, value)?,
            _ => {}
        }
        Ok(())
    }

    fn env_keys() -> &'static [&'static str] {
        &["host", "port"]
    }

    fn apply_flags(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
    }
}

/// Merged configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig<C> {
    pub home: PathBuf,
    pub path: PathBuf,
    pub config: C,
}

/// Environment variable bound to an option: `AG_` + upper case, dots as `_`
pub fn env_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('.', "_").to_uppercase())
}

fn write_template<C: AppConfig>(path: &Path, config: &C) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, config.render_template()?).map_err(|e| {
        CliError::Config(format!("cannot write config file {}: {e}", path.display()))
    })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).map_err(|e| {
            CliError::Config(format!("cannot set mode of {}: {e}", path.display()))
        })?;
    }
    debug!("Wrote default config to {}", path.display());
    Ok(())
}

/// Run the whole lifecycle: home, template, file, environment, flags
pub fn load_config<C: AppConfig>(
    overrides: &ConfigOverrides,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<LoadedConfig<C>> {
    let home = resolve_home(overrides.home.as_deref(), lookup);
    ensure_dir(&home)?;

    let path = match overrides.config.as_deref().filter(|c| !c.is_empty()) {
        Some(explicit) => PathBuf::from(explicit),
        None => home.join(C::FILE_NAME),
    };
    if !path.exists() {
        write_template(&path, &C::default())?;
    }

    let text = fs::read_to_string(&path).map_err(|e| {
        CliError::Config(format!("cannot read config file {}: {e}", path.display()))
    })?;
    let mut config: C = toml::from_str(&text)
        .map_err(|e| CliError::Config(format!("invalid config file {}: {e}", path.display())))?;

    for key in C::env_keys() {
        if let Some(value) = lookup(&env_name(key)) {
            config.apply_env(key, &value)?;
        }
    }
    config.apply_flags(overrides);
    config.expand_paths(&home, lookup);

    Ok(LoadedConfig { home, path, config })
}

//! Configuration management
//!
//! This module resolves the home directory, creates the config file from
//! its template and merges file, environment and flag values into the
//! typed record each binary runs with.

pub mod home;
pub mod settings;

pub use home::{env_lookup, expand_path, resolve_home, DEFAULT_APP_HOME};
pub use settings::{
    load_config, AppConfig, CliConfig, ConfigOverrides, LoadedConfig, PolarisCliConfig,
};

//! Configuration system for Photoreel.
//!
//! Provides TOML-based configuration with:
//! - Config file layering (XDG user config + project-local overrides)
//! - OAuth credential resolution (env var → config file)
//! - Environment selection (`PHOTOREEL_ENV`) driving cookie security

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{
    CONFIG_DIR_ENV, ConfigLayer, ConfigSource, LoadedConfig, load_config, load_config_file,
    load_config_with_options, xdg_config_dir, xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use secrets::{OAuthCredentials, ResolvedSecret, SecretSource, resolve_oauth_credentials};
pub use types::*;

//! Locating and layering photoreel config files.
//!
//! Layers, lowest precedence first:
//! 1. user: `config.toml` in `$PHOTOREEL_CONFIG_DIR` or the platform config dir
//! 2. project: `photoreel.toml` in the working directory
//!
//! A higher layer replaces whole sections of a lower one, so each section
//! (and in particular `[oauth]`) comes from exactly one file. `serve --config`
//! skips discovery and reads a single explicit file.
//!
//! The same directory also holds the CLI session file and daily logs.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{ConfigError, PhotoreelConfig, Result};

/// Overrides the photoreel config directory.
pub const CONFIG_DIR_ENV: &str = "PHOTOREEL_CONFIG_DIR";

const USER_CONFIG_FILE: &str = "config.toml";
const PROJECT_CONFIG_FILE: &str = "photoreel.toml";
const APP_NAME: &str = "photoreel";

/// Which layer a config file was considered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    User,
    Project,
    /// Passed with `--config`.
    Explicit,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLayer::User => write!(f, "user"),
            ConfigLayer::Project => write!(f, "project"),
            ConfigLayer::Explicit => write!(f, "explicit"),
        }
    }
}

/// One file considered during discovery.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub layer: ConfigLayer,
    pub path: PathBuf,
    /// Sections the file supplied. Empty when it was missing or unreadable.
    pub sections: Vec<&'static str>,
    pub loaded: bool,
}

/// Merged configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: PhotoreelConfig,
    /// Files considered, lowest precedence first.
    pub sources: Vec<ConfigSource>,
    /// Layers that were skipped because they failed to parse.
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Read one explicit file. Unlike discovery, a bad file is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = load_config_file(path)?;
        Ok(Self {
            sources: vec![ConfigSource {
                layer: ConfigLayer::Explicit,
                path: path.to_path_buf(),
                sections: config.section_names(),
                loaded: true,
            }],
            config,
            warnings: Vec::new(),
        })
    }

    /// Paths of the files that were actually merged.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }

    /// File whose copy of `section` is in effect.
    pub fn section_origin(&self, section: &str) -> Option<&ConfigSource> {
        self.sources
            .iter()
            .rev()
            .find(|s| s.sections.iter().any(|name| *name == section))
    }

    fn push_layer(&mut self, layer: ConfigLayer, path: PathBuf) {
        let mut source = ConfigSource {
            layer,
            path,
            sections: Vec::new(),
            loaded: false,
        };

        if source.path.is_file() {
            match load_config_file(&source.path) {
                Ok(file) => {
                    source.sections = file.section_names();
                    source.loaded = true;
                    self.config.merge(file);
                }
                Err(e) => self.warnings.push(format!(
                    "Ignoring {} config {}: {}",
                    layer,
                    source.path.display(),
                    e
                )),
            }
        }
        self.sources.push(source);
    }
}

/// Discover and merge the user and project layers.
///
/// `project_dir` defaults to the working directory.
pub fn load_config(project_dir: Option<&Path>) -> LoadedConfig {
    load_config_with_options(project_dir, None)
}

/// Like [`load_config`], with the user config directory given explicitly.
pub fn load_config_with_options(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> LoadedConfig {
    let user = config_dir
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .or_else(xdg_config_path);
    let project = project_dir
        .unwrap_or(Path::new("."))
        .join(PROJECT_CONFIG_FILE);

    let mut loaded = LoadedConfig::default();
    if let Some(user) = user {
        loaded.push_layer(ConfigLayer::User, user);
    }
    loaded.push_layer(ConfigLayer::Project, project);
    loaded
}

/// Parse and validate a single config file.
pub fn load_config_file(path: &Path) -> Result<PhotoreelConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    PhotoreelConfig::from_toml(&contents)
}

/// User-layer config file.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|dir| dir.join(USER_CONFIG_FILE))
}

/// Photoreel's config directory: `$PHOTOREEL_CONFIG_DIR` if set and non-empty,
/// else `photoreel` under the platform config dir.
pub fn xdg_config_dir() -> Option<PathBuf> {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|dir| dir.join(APP_NAME)),
    }
}

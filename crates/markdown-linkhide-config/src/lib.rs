use anyhow::Context;
use markdown_linkhide_engine::SurfaceSettings;
use serde::{Deserialize, Serialize};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master toggle for hiding, guarding and stepping over link syntax.
    pub keep_links_steady: bool,
    /// Continue list items when Enter is moved past a link.
    pub continue_lists: bool,
    /// After a link edit, close the link by leaving the caret on its right.
    pub close_prefers_right: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(SurfaceSettings::default())
    }
}

impl From<SurfaceSettings> for Config {
    fn from(settings: SurfaceSettings) -> Self {
        Self {
            keep_links_steady: settings.keep_links_steady,
            continue_lists: settings.continue_lists,
            close_prefers_right: settings.close_prefers_right,
        }
    }
}

const CONFIG_FILE: &str = "~/.config/markdown-linkhide/config.toml";

impl Config {
    /// Reads settings from `config_path` after expanding `~` and `$VARS` in it.
    /// A missing file is `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = expand(config_path.as_ref());
        let content = match std::fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::ConfigReadError { config_path, source }),
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::ConfigParseError { config_path, source })
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Writes the settings as TOML, creating missing parent directories.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(dir) = config_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)
            .with_context(|| format!("writing {}", config_path.display()))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_FILE).into_owned())
    }

    /// The engine settings for a new editor surface.
    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            keep_links_steady: self.keep_links_steady,
            continue_lists: self.continue_lists,
            close_prefers_right: self.close_prefers_right,
        }
    }
}

/// `path` with `~` and `$VARS` expanded. Undefined variables leave it as written.
fn expand(path: &Path) -> PathBuf {
    shellexpand::full(&path.to_string_lossy())
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

//! `AppConfig` struct, TOML read/write and config file location.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable holding the OMDb API key.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Directory name under the user config root.
const APP_DIR: &str = "moviesearch";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb connection settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
}

/// OMDb connection configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OmdbConfig {
    /// Base URL override (default: the public OMDb endpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key used when `OMDB_API_KEY` is not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Request the full plot instead of the short one.
    pub full_plot: bool,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            full_plot: false,
        }
    }
}

impl OmdbConfig {
    /// Picks the API key: the environment value wins over the config file.
    ///
    /// Blank values count as unset. Returns `None` when neither is present.
    #[must_use]
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    /// Parses the base URL override, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is set but is not a valid URL.
    pub fn parsed_base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid omdb.base_url: {raw}")))
            .transpose()
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Resolves the config file path.
///
/// `--dir` wins. Otherwise `$XDG_CONFIG_HOME/moviesearch/config.toml`, then
/// `~/.config/moviesearch/config.toml`.
///
/// # Errors
///
/// Returns an error if no `--dir` is given and neither `XDG_CONFIG_HOME` nor
/// `HOME` locates a config root.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Path resolution over explicit environment values.
///
/// A relative or empty `XDG_CONFIG_HOME` is ignored, as the XDG base
/// directory rules require.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }

    let root = xdg_config_home
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
        .or_else(|| {
            home.filter(|home| !home.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .context("cannot locate the config directory: set HOME or XDG_CONFIG_HOME, or pass --dir")?;
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}

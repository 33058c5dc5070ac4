use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ErrorCode;
use crate::graph::SelfLoopPolicy;

/// Project-relative location of the config file.
pub const PROJECT_CONFIG_PATH: &str = ".devnet/config.toml";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported report delimiter {0:?}; use a single ASCII character")]
    Delimiter(char),
}

impl ConfigError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConfigParseError
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevnetConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub compute: ComputeConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub self_loops: SelfLoopPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeConfig {
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Worker threads; 0 uses the global rayon pool.
    #[serde(default)]
    pub threads: usize,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            parallel: default_true(),
            threads: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl ReportConfig {
    /// The delimiter as a single byte, as the CSV writer expects.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Delimiter`] for non-ASCII delimiters and for
    /// characters that would collide with row or quote syntax.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        let c = self.delimiter;
        if !c.is_ascii() || matches!(c, '\n' | '\r' | '"') {
            return Err(ConfigError::Delimiter(c));
        }
        // is_ascii() guarantees the value fits.
        Ok(u8::try_from(u32::from(c)).unwrap_or(b','))
    }
}

/// Load the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_config_file(path: &Path) -> Result<DevnetConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<DevnetConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// User-level config location, if the platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("devnet/config.toml"))
}

/// Resolve the effective configuration.
///
/// Precedence (highest wins): `explicit` path, `<project_root>/.devnet/config.toml`,
/// the user config file, built-in defaults. Only an explicit path is
/// required to exist.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the selected file cannot be read or parsed.
pub fn resolve_config(
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<DevnetConfig, ConfigError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading explicit config");
        return load_config_file(path);
    }

    let project = project_root.join(PROJECT_CONFIG_PATH);
    if project.exists() {
        debug!(path = %project.display(), "loading project config");
        return load_config_file(&project);
    }

    if let Some(user) = user_config_path().filter(|p| p.exists()) {
        debug!(path = %user.display(), "loading user config");
        return load_config_file(&user);
    }

    Ok(DevnetConfig::default())
}

const fn default_true() -> bool {
    true
}

const fn default_delimiter() -> char {
    ','
}

//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Top-level mocktrack configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MocktrackConfig {
    /// Directory holding the ledger slot file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Platform preselected when none is given.
    #[serde(default = "default_platform")]
    pub default_platform: String,
    /// Series preselected when none is given.
    #[serde(default = "default_series")]
    pub default_series: String,
    /// Selectable platforms, series and score limits.
    #[serde(default)]
    pub catalog: Catalog,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./mocktrack-data")
}
fn default_platform() -> String {
    "Platform 1".to_string()
}
fn default_series() -> String {
    "Series 1".to_string()
}

impl Default for MocktrackConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_platform: default_platform(),
            default_series: default_series(),
            catalog: Catalog::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again. Unset variables expand to
/// nothing and an unterminated `${` is kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        out.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mocktrack.toml` in the current directory
/// 2. `~/.config/mocktrack/config.toml`
///
/// `MOCKTRACK_DATA_DIR` overrides the configured data directory.
pub fn load_config() -> Result<MocktrackConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MocktrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mocktrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config(&path)?
        }
        None => MocktrackConfig::default(),
    };

    if let Ok(dir) = std::env::var("MOCKTRACK_DATA_DIR") {
        if !dir.is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    let resolved = resolve_env_vars(&config.data_dir.to_string_lossy());
    config.data_dir = PathBuf::from(resolved);

    Ok(config)
}

fn parse_config(path: &Path) -> Result<MocktrackConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<MocktrackConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mocktrack"))
}

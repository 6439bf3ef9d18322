use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::analyser::AnalyserConfig;
use crate::bars::config::BarConfig;

const ENV_CONFIG_PATH: &str = "TEMPERED_BARS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,

    #[serde(default)]
    pub bars: BarConfig,

    #[serde(default)]
    pub analyser: AnalyserConfig,
}

fn default_fps() -> u32 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            bars: BarConfig::default(),
            analyser: AnalyserConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or the default location when `None`. A missing file
    /// yields the defaults; a malformed one is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.exists() {
            log::debug!("no config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        if let Err(e) = config.bars.validate() {
            log::warn!("{}: {e}; no bars will be shown", path.display());
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// `$TEMPERED_BARS_CONFIG`, else `<os config dir>/tempered-bars/config.toml`,
    /// else `./config.toml`.
    pub fn default_path() -> PathBuf {
        if let Some(p) = std::env::var_os(ENV_CONFIG_PATH) {
            return PathBuf::from(p);
        }
        // Linux: ~/.config/tempered-bars, macOS: ~/Library/Application Support/tempered-bars
        ProjectDirs::from("", "", "tempered-bars")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

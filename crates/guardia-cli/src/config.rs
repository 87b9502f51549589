//! Application configuration management.
//!
//! Remembers where the last document was imported from and how JSON output
//! should look. An optional log directory enables a log file next to the
//! stderr output.
//!
//! Configuration is stored at `~/.config/guardia/config.json`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "guardia";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub last_import_dir: Option<PathBuf>,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_import_dir: None,
            pretty_json: default_pretty_json(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Record the directory of a successfully imported file. A bare file
    /// name leaves the previous value in place.
    pub fn remember_import(&mut self, file: &Path) {
        if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            self.last_import_dir = Some(dir.to_path_buf());
        }
    }
}

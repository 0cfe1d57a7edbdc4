use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::tracker::{DEFAULT_THEME, ResetPolicy};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ui_theme")]
    pub ui_theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_persist")]
    pub persist: bool,
    #[serde(default)]
    pub data_file: Option<String>,
    #[serde(default)]
    pub keep_reward_names_on_reset: bool,
    #[serde(default = "default_theme_text")]
    pub default_theme_text: String,
}

fn default_ui_theme() -> String {
    "sakura".to_string()
}
fn default_locale() -> String {
    "ja".to_string()
}
fn default_persist() -> bool {
    true
}
fn default_theme_text() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_theme: default_ui_theme(),
            locale: default_locale(),
            persist: default_persist(),
            data_file: None,
            keep_reward_names_on_reset: false,
            default_theme_text: default_theme_text(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Store a new color theme in the config file at `path`. Every other
    /// setting is re-read from the file, so command-line overrides held by
    /// the running app are never written back.
    pub fn save_ui_theme(path: &Path, name: &str) -> Result<()> {
        let mut on_disk = Self::load_from(path)?;
        on_disk.ui_theme = name.to_string();
        on_disk.save_to(path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sugoroku")
            .join("config.toml")
    }

    pub fn data_file_path(&self) -> Option<PathBuf> {
        self.data_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        ResetPolicy::from_keep_names(self.keep_reward_names_on_reset)
    }

    /// Fall back to the default locale when the configured one has no strings.
    pub fn normalize_locale(&mut self, available: &[&str]) {
        if !available.contains(&self.locale.as_str()) {
            self.locale = default_locale();
        }
    }
}

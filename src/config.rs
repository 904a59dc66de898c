use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::GeneratorConfig;
use crate::queue::MAX_QUEUE_DEPTH;

#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Block,
    Line,
    Invisible,
}

impl CursorStyle {
    pub fn next(self) -> Self {
        match self {
            CursorStyle::Block => CursorStyle::Line,
            CursorStyle::Line => CursorStyle::Invisible,
            CursorStyle::Invisible => CursorStyle::Block,
        }
    }
}

#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeStyle {
    #[default]
    Day,
    Night,
}

impl ThemeStyle {
    pub fn toggled(self) -> Self {
        match self {
            ThemeStyle::Day => ThemeStyle::Night,
            ThemeStyle::Night => ThemeStyle::Day,
        }
    }
}

/// User preferences; the engine stores them but never interprets them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub cursor_style: CursorStyle,
    pub theme_style: ThemeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preferences: Preferences,
    pub generator: GeneratorConfig,
    /// Articles kept ready beyond the next one
    pub queue_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferences: Preferences::default(),
            generator: GeneratorConfig::default(),
            queue_depth: MAX_QUEUE_DEPTH,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typist") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typist_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

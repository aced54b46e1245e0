use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Play the progression range in order.
    Progression,
    /// Pick any level from the select range.
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub first: usize,
    pub last: usize,
}

impl LevelRange {
    pub fn new(first: usize, last: usize) -> Self {
        LevelRange { first, last }
    }

    pub fn contains(&self, level: usize) -> bool {
        (self.first..=self.last).contains(&level)
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.first > self.last {
            return Err(ConfigError::InvalidRange {
                name,
                first: self.first,
                last: self.last,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// `None` shows the main menu.
    pub mode: Option<GameMode>,
    pub progression: LevelRange,
    pub select: LevelRange,
    pub levels_dir: PathBuf,
    pub undo_capacity: usize,
    pub log_file: PathBuf,
    pub color: ColorMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: None,
            progression: LevelRange::new(0, 4),
            select: LevelRange::new(0, 50),
            levels_dir: PathBuf::from("levels"),
            undo_capacity: 100,
            log_file: PathBuf::from("sokoban.log"),
            color: ColorMode::Auto,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.progression.validate("progression")?;
        self.select.validate("select")
    }

    /// Every level either mode can reach.
    pub fn playable_range(&self) -> LevelRange {
        LevelRange::new(
            self.progression.first.min(self.select.first),
            self.progression.last.max(self.select.last),
        )
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseLevelError {
    #[error("level contains no rows")]
    Empty,

    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("level has {count} players, expected one")]
    MultiplePlayers { count: usize },
}

#[derive(Debug, Error)]
pub enum LevelError {
    /// No level with this number exists. Expected for out-of-range numbers.
    #[error("level {0} does not exist")]
    Absent(usize),

    #[error("failed to read level {level} from {}", path.display())]
    Io {
        level: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("level {level} in {} is malformed", path.display())]
    Malformed {
        level: usize,
        path: PathBuf,
        #[source]
        source: ParseLevelError,
    },
}

impl LevelError {
    pub fn is_absent(&self) -> bool {
        matches!(self, LevelError::Absent(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {name} level range: {first} is after {last}")]
    InvalidRange {
        name: &'static str,
        first: usize,
        last: usize,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("level {level} has no player")]
    NoPlayer { level: usize },

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal i/o failed")]
    Io(#[from] io::Error),
}

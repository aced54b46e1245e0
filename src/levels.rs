use crate::config::LevelRange;
use crate::core::{count_boxes, locate_player, Cell, Grid};
use crate::error::{LevelError, ParseLevelError};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};

/// Parses XSB text. Trailing whitespace and blank lines are dropped, and short
/// rows are padded with floor so the grid is rectangular. A grid with no player
/// is accepted; more than one is not.
pub fn parse_level(s: &str) -> Result<Grid, ParseLevelError> {
    let lines: Vec<&str> = s
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let max_width = lines.iter().map(|line| line.chars().count()).max();
    let Some(max_width) = max_width else {
        return Err(ParseLevelError::Empty);
    };

    let mut rows = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(max_width);
        for (j, ch) in line.chars().enumerate() {
            let cell = Cell::from_char(ch).ok_or(ParseLevelError::UnknownSymbol {
                symbol: ch,
                row: i,
                col: j,
            })?;
            row.push(cell);
        }
        row.resize(max_width, Cell::Floor);
        rows.push(row);
    }

    let grid = Grid::new(rows);
    let count = grid.count(|c| c.is_player());
    if count > 1 {
        return Err(ParseLevelError::MultiplePlayers { count });
    }
    Ok(grid)
}

pub fn level_file_name(level: usize) -> String {
    format!("level{:03}.xsb", level)
}

/// Loads numbered `levelNNN.xsb` files from a directory.
#[derive(Debug, Clone)]
pub struct LevelLoader {
    dir: PathBuf,
    range: LevelRange,
}

impl LevelLoader {
    pub fn new(dir: impl Into<PathBuf>, range: LevelRange) -> Self {
        LevelLoader {
            dir: dir.into(),
            range,
        }
    }

    pub fn path_for(&self, level: usize) -> PathBuf {
        self.dir.join(level_file_name(level))
    }

    pub fn load(&self, level: usize) -> Result<Grid, LevelError> {
        if !self.range.contains(level) {
            return Err(LevelError::Absent(level));
        }

        let path = self.path_for(level);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(LevelError::Absent(level));
            }
            Err(source) => return Err(LevelError::Io { level, path, source }),
        };

        let grid = parse_level(&text).map_err(|source| LevelError::Malformed {
            level,
            path: path.clone(),
            source,
        })?;

        if locate_player(&grid).is_none() {
            warn!(level, path = %path.display(), "level has no player");
        }
        info!(
            level,
            rows = grid.height(),
            cols = grid.width(),
            boxes = count_boxes(&grid),
            "level loaded"
        );
        Ok(grid)
    }
}

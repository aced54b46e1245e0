use crate::core::{
    attempt_move, is_solved, Direction, GameChangeType, Grid, History, MoveOutcome, Progress,
};
use crate::error::GameError;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Won,
    Quit,
}

/// One attempt at a level: the live grid, the grid it started from, and the
/// bookkeeping the driver shows to the player.
#[derive(Clone, Debug)]
pub struct LevelSession {
    level: usize,
    initial: Grid,
    grid: Grid,
    moves: u32,
    status: SessionStatus,
    history: History,
    last_change: Option<GameChangeType>,
}

impl LevelSession {
    pub fn new(level: usize, grid: Grid, undo_capacity: usize) -> Self {
        let status = if is_solved(&grid) {
            SessionStatus::Won
        } else {
            SessionStatus::Playing
        };
        LevelSession {
            level,
            initial: grid.clone(),
            grid,
            moves: 0,
            status,
            history: History::new(undo_capacity),
            last_change: None,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn last_change(&self) -> Option<GameChangeType> {
        self.last_change
    }

    pub fn progress(&self) -> Progress {
        self.grid.progress()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Moves are ignored once the session has been won or quit.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome, GameError> {
        if self.status != SessionStatus::Playing {
            return Ok(MoveOutcome::Blocked);
        }

        let snapshot = self.grid.clone();
        let outcome = attempt_move(&mut self.grid, direction);
        match outcome {
            MoveOutcome::NoPlayer => {
                error!(level = self.level, "grid has no player");
                Err(GameError::NoPlayer { level: self.level })
            }
            MoveOutcome::Blocked => Ok(outcome),
            MoveOutcome::Moved(change) => {
                self.history.push(snapshot);
                self.moves += 1;
                self.last_change = Some(change);
                if is_solved(&self.grid) {
                    info!(level = self.level, moves = self.moves, "level solved");
                    self.status = SessionStatus::Won;
                }
                Ok(outcome)
            }
        }
    }

    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.status != SessionStatus::Playing {
            return false;
        }
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.grid = previous;
        self.moves = self.moves.saturating_sub(1);
        self.last_change = None;
        debug!(
            level = self.level,
            moves = self.moves,
            undo_left = self.history.len(),
            "move undone"
        );
        true
    }

    /// Only a session still in play can be restarted.
    pub fn restart(&mut self) {
        if self.status != SessionStatus::Playing {
            return;
        }
        self.grid = self.initial.clone();
        self.moves = 0;
        self.history.clear();
        self.last_change = None;
        debug!(level = self.level, "level restarted");
    }

    pub fn quit(&mut self) {
        if self.status == SessionStatus::Playing {
            self.status = SessionStatus::Quit;
        }
    }
}

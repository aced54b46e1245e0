use crate::core::Cell::{BoxOnFloor, Wall};
use crate::core::{Direction, GameChangeType, Grid, MoveOutcome, Progress, Vec2};
use tracing::{debug, trace};

pub fn locate_player(grid: &Grid) -> Option<Vec2> {
    for (i, row) in grid.rows.iter().enumerate() {
        for (j, c) in row.iter().enumerate() {
            if c.is_player() {
                return Some(Vec2 {
                    i: i as i32,
                    j: j as i32,
                });
            }
        }
    }
    None
}

/// Maps a WASD key to its step; anything else is the zero vector.
pub fn direction_vector(key: char) -> Vec2 {
    Direction::from_key(key).map_or(Vec2::ZERO, Direction::vector)
}

pub fn is_passable(grid: &Grid, pos: Vec2) -> bool {
    matches!(grid.get(pos), Some(c) if c != Wall)
}

pub fn has_box(grid: &Grid, pos: Vec2) -> bool {
    is_passable(grid, pos) && grid[pos].is_box()
}

/// A box moves only into an in-bounds floor or target cell. Boxes never push other boxes.
pub fn can_push_box(grid: &Grid, box_pos: Vec2, direction: Direction) -> bool {
    let dest = box_pos + direction.vector();
    is_passable(grid, dest) && grid[dest].is_empty()
}

/// The single mutating entry point for play. Dispatches to [`attempt_push`] when
/// the player walks into a box.
pub fn attempt_move(grid: &mut Grid, direction: Direction) -> MoveOutcome {
    step_by(grid, direction.vector(), Some(direction))
}

/// Same as [`attempt_move`] but driven by a raw key. Unrecognised keys never move.
pub fn attempt_move_input(grid: &mut Grid, key: char) -> MoveOutcome {
    step_by(grid, direction_vector(key), Direction::from_key(key))
}

fn step_by(grid: &mut Grid, dir: Vec2, direction: Option<Direction>) -> MoveOutcome {
    let Some(player) = locate_player(grid) else {
        return MoveOutcome::NoPlayer;
    };
    let Some(direction) = direction.filter(|_| dir != Vec2::ZERO) else {
        trace!("ignoring zero-length move");
        return MoveOutcome::Blocked;
    };

    let dest = player + dir;
    if !is_passable(grid, dest) {
        trace!(?direction, "move blocked by wall or edge");
        return MoveOutcome::Blocked;
    }

    if has_box(grid, dest) {
        return attempt_push(grid, direction);
    }
    if !grid[dest].is_empty() {
        trace!(?direction, "move blocked by occupied cell");
        return MoveOutcome::Blocked;
    }

    grid[player] = grid[player].vacated();
    grid[dest] = grid[dest].with_player();
    debug!(?direction, row = dest.i, col = dest.j, "player moved");
    MoveOutcome::Moved(GameChangeType::PlayerMove)
}

pub fn attempt_push(grid: &mut Grid, direction: Direction) -> MoveOutcome {
    let Some(player) = locate_player(grid) else {
        return MoveOutcome::NoPlayer;
    };
    let box_pos = player + direction.vector();
    if !has_box(grid, box_pos) {
        return MoveOutcome::Blocked;
    }
    if !can_push_box(grid, box_pos, direction) {
        trace!(?direction, "push blocked");
        return MoveOutcome::Blocked;
    }

    let box_dest = box_pos + direction.vector();
    grid[box_dest] = grid[box_dest].with_box();
    grid[box_pos] = grid[box_pos].vacated().with_player();
    grid[player] = grid[player].vacated();
    debug!(
        ?direction,
        row = box_dest.i,
        col = box_dest.j,
        on_target = grid[box_dest] != BoxOnFloor,
        "box pushed"
    );
    MoveOutcome::Moved(GameChangeType::PlayerAndBoxMove)
}

/// Solved once no box stands on bare floor. Uncovered targets do not matter.
pub fn is_solved(grid: &Grid) -> bool {
    !grid.cells().any(|c| c == BoxOnFloor)
}

pub fn count_boxes(grid: &Grid) -> usize {
    grid.count(|c| c.is_box())
}

pub fn progress(grid: &Grid) -> Progress {
    grid.progress()
}

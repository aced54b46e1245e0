use std::ops::Add;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Target,
    BoxOnFloor,
    BoxOnTarget,
    PlayerOnFloor,
    PlayerOnTarget,
}

/// Grid coordinate, `i` is the row (0 at the top) and `j` the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub i: i32,
    pub j: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { i: 0, j: 0 };

    pub fn new(i: i32, j: i32) -> Self {
        Vec2 { i, j }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            i: self.i + rhs.i,
            j: self.j + rhs.j,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Move(Direction),
    Restart,
    Undo,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Moved(GameChangeType),
    Blocked,
    NoPlayer,
}

/// Boxes resting on targets against the number of target cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub boxes_on_target: usize,
    pub total_targets: usize,
}

use crate::core::Cell::{BoxOnFloor, BoxOnTarget, Floor, PlayerOnFloor, PlayerOnTarget, Target, Wall};
use crate::core::{Cell, Direction, Grid, MoveOutcome, Progress, Vec2};

impl Cell {
    /// Reads one XSB character. `-` and `_` are the common floor aliases.
    pub fn from_char(ch: char) -> Option<Cell> {
        Some(match ch {
            '#' => Wall,
            ' ' | '-' | '_' => Floor,
            '.' => Target,
            '$' => BoxOnFloor,
            '*' => BoxOnTarget,
            '@' => PlayerOnFloor,
            '+' => PlayerOnTarget,
            _ => return None,
        })
    }

    pub fn to_char(self) -> char {
        match self {
            Wall => '#',
            Floor => ' ',
            Target => '.',
            BoxOnFloor => '$',
            BoxOnTarget => '*',
            PlayerOnFloor => '@',
            PlayerOnTarget => '+',
        }
    }

    pub fn is_box(self) -> bool {
        matches!(self, BoxOnFloor | BoxOnTarget)
    }

    pub fn is_player(self) -> bool {
        matches!(self, PlayerOnFloor | PlayerOnTarget)
    }

    pub fn is_target(self) -> bool {
        matches!(self, Target | BoxOnTarget | PlayerOnTarget)
    }

    /// Floor or target with nothing on it.
    pub fn is_empty(self) -> bool {
        matches!(self, Floor | Target)
    }

    /// What remains once the player or box standing here leaves.
    pub fn vacated(self) -> Cell {
        if self.is_target() { Target } else { Floor }
    }

    pub fn with_player(self) -> Cell {
        if self.is_target() { PlayerOnTarget } else { PlayerOnFloor }
    }

    pub fn with_box(self) -> Cell {
        if self.is_target() { BoxOnTarget } else { BoxOnFloor }
    }
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { i: -1, j: 0 },
            Direction::Down => Vec2 { i: 1, j: 0 },
            Direction::Left => Vec2 { i: 0, j: -1 },
            Direction::Right => Vec2 { i: 0, j: 1 },
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// WASD keys, case-insensitive.
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    pub fn width(&self) -> i32 {
        self.rows.first().map_or(0, |row| row.len() as i32)
    }

    /// The cell at `pos`, bounds-checked against the length of that particular row.
    pub fn get(&self, pos: Vec2) -> Option<Cell> {
        if pos.i < 0 || pos.j < 0 {
            return None;
        }
        self.rows.get(pos.i as usize)?.get(pos.j as usize).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells().filter(|&c| pred(c)).count()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            boxes_on_target: self.count(|c| c == BoxOnTarget),
            total_targets: self.count(|c| c == Target || c == BoxOnTarget),
        }
    }
}

impl std::ops::Index<Vec2> for Grid {
    type Output = Cell;

    fn index(&self, pos: Vec2) -> &Cell {
        &self.rows[pos.i as usize][pos.j as usize]
    }
}

impl std::ops::IndexMut<Vec2> for Grid {
    fn index_mut(&mut self, pos: Vec2) -> &mut Cell {
        &mut self.rows[pos.i as usize][pos.j as usize]
    }
}

mod history;
mod model_helpers;
mod models;
mod session;
mod update;

pub use history::History;
pub use models::{
    Cell, Direction, GameChangeType, Grid, MoveOutcome, Progress, UserAction, Vec2,
};
pub use session::{LevelSession, SessionStatus};
pub use update::{
    attempt_move, attempt_move_input, attempt_push, can_push_box, count_boxes, direction_vector,
    has_box, is_passable, is_solved, locate_player, progress,
};

use crate::config::{GameConfig, GameMode};
use crate::console_interface::{InputProvider, Key, LevelView, Prompt, RenderSink, Screen};
use crate::core::{Direction, LevelSession, SessionStatus, UserAction};
use crate::error::GameError;
use crate::levels::LevelLoader;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelResult {
    Completed { moves: u32 },
    Quit,
    /// No level with that number; the player has been told.
    Absent,
    /// The level could not be played (unreadable, malformed or missing a player).
    Failed,
}

enum Choice<T> {
    Picked(T),
    Back,
    Closed,
}

pub fn action_for_key(key: Key) -> Option<UserAction> {
    match key {
        Key::Up => Some(UserAction::Move(Direction::Up)),
        Key::Down => Some(UserAction::Move(Direction::Down)),
        Key::Left => Some(UserAction::Move(Direction::Left)),
        Key::Right => Some(UserAction::Move(Direction::Right)),
        Key::Esc => Some(UserAction::Quit),
        Key::Char('u') => Some(UserAction::Undo),
        Key::Char('r') => Some(UserAction::Restart),
        Key::Char('q') => Some(UserAction::Quit),
        Key::Char(c) => Direction::from_key(c).map(UserAction::Move),
        Key::Enter | Key::Backspace => None,
    }
}

/// Menus, level sequencing and the per-level input loop. `Ok(None)` from the
/// inner steps means input closed and the game should stop.
pub struct Game<I: InputProvider, R: RenderSink> {
    config: GameConfig,
    loader: LevelLoader,
    input: I,
    sink: R,
}

impl<I: InputProvider, R: RenderSink> Game<I, R> {
    pub fn new(config: GameConfig, input: I, sink: R) -> Self {
        let loader = LevelLoader::new(config.levels_dir.clone(), config.playable_range());
        Game {
            config,
            loader,
            input,
            sink,
        }
    }

    pub fn into_sink(self) -> R {
        self.sink
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        match self.config.mode {
            Some(GameMode::Progression) => {
                self.play_progression()?;
            }
            Some(GameMode::Select) => {
                self.play_select()?;
            }
            None => self.main_menu()?,
        }
        info!("game finished");
        Ok(())
    }

    fn main_menu(&mut self) -> Result<(), GameError> {
        loop {
            self.sink.render(&Screen::MainMenu {
                progression: self.config.progression,
                select: self.config.select,
            })?;
            let Some(key) = self.input.next_key()? else {
                return Ok(());
            };
            let finished = match key {
                Key::Char('1') => self.play_progression()?,
                Key::Char('2') => self.play_select()?,
                Key::Char('q') | Key::Esc => return Ok(()),
                _ => continue,
            };
            if finished.is_none() {
                return Ok(());
            }
        }
    }

    pub fn play_progression(&mut self) -> Result<Option<()>, GameError> {
        let range = self.config.progression;
        info!(first = range.first, last = range.last, "starting progression");
        for level in range.iter() {
            match self.play_level(level)? {
                None => return Ok(None),
                Some(LevelResult::Completed { moves }) => {
                    self.sink.render(&Screen::LevelComplete {
                        level,
                        moves,
                        select_mode: false,
                    })?;
                    if self.input.next_key()?.is_none() {
                        return Ok(None);
                    }
                }
                Some(_) => return Ok(Some(())),
            }
        }

        self.sink.render(&Screen::AllComplete { range })?;
        Ok(self.input.next_key()?.map(|_| ()))
    }

    pub fn play_select(&mut self) -> Result<Option<()>, GameError> {
        let mut level = match self.prompt_level()? {
            Choice::Picked(level) => level,
            Choice::Back => return Ok(Some(())),
            Choice::Closed => return Ok(None),
        };
        info!(level, "starting level select");

        loop {
            let moves = match self.play_level(level)? {
                None => return Ok(None),
                Some(LevelResult::Completed { moves }) => moves,
                Some(_) => return Ok(Some(())),
            };
            self.sink.render(&Screen::LevelComplete {
                level,
                moves,
                select_mode: true,
            })?;

            loop {
                let Some(key) = self.input.next_key()? else {
                    return Ok(None);
                };
                match key {
                    Key::Char('n') => break,
                    Key::Char('m') | Key::Esc => return Ok(Some(())),
                    _ => {}
                }
            }

            if !self.config.select.contains(level + 1) {
                let message = format!("Level {} was the last level.", level);
                self.sink.render(&Screen::Notice {
                    title: "No more levels",
                    message: &message,
                })?;
                return Ok(self.input.next_key()?.map(|_| ()));
            }
            level += 1;
        }
    }

    fn prompt_level(&mut self) -> Result<Choice<usize>, GameError> {
        let range = self.config.select;
        let mut entry = String::new();
        let mut error: Option<String> = None;
        loop {
            self.sink.render(&Screen::LevelSelect {
                entry: &entry,
                range,
                error: error.as_deref(),
            })?;
            let Some(key) = self.input.next_key()? else {
                return Ok(Choice::Closed);
            };
            match key {
                Key::Char(c) if c.is_ascii_digit() => {
                    if entry.len() < 4 {
                        entry.push(c);
                    }
                    error = None;
                }
                Key::Backspace => {
                    entry.pop();
                }
                Key::Esc => return Ok(Choice::Back),
                Key::Enter => {
                    match entry.parse::<usize>() {
                        Ok(level) if range.contains(level) => return Ok(Choice::Picked(level)),
                        Ok(_) => {
                            error = Some(format!(
                                "Please choose between {} and {}.",
                                range.first, range.last
                            ))
                        }
                        Err(_) => error = Some("Please enter a valid number.".to_string()),
                    }
                    entry.clear();
                }
                _ => {}
            }
        }
    }

    pub fn play_level(&mut self, level: usize) -> Result<Option<LevelResult>, GameError> {
        let grid = match self.loader.load(level) {
            Ok(grid) => grid,
            Err(err) if err.is_absent() => {
                warn!(level, "no such level");
                let message = format!("Level {} does not exist.", level);
                return self.notice("No such level", &message, LevelResult::Absent);
            }
            Err(err) => {
                error!(level, error = %err, "failed to load level");
                return self.notice("Error loading level", &error_chain(&err), LevelResult::Failed);
            }
        };

        info!(level, "playing level");
        let mut session = LevelSession::new(level, grid, self.config.undo_capacity);
        let mut prompt = None;
        loop {
            self.sink.render(&Screen::Level(LevelView {
                session: &session,
                prompt,
            }))?;
            match session.status() {
                SessionStatus::Won => {
                    return Ok(Some(LevelResult::Completed {
                        moves: session.moves(),
                    }));
                }
                SessionStatus::Quit => return Ok(Some(LevelResult::Quit)),
                SessionStatus::Playing => {}
            }

            let Some(key) = self.input.next_key()? else {
                return Ok(None);
            };
            prompt = match (prompt, key) {
                (Some(Prompt::ConfirmQuit), Key::Char('y')) => {
                    info!(level, moves = session.moves(), "level quit");
                    session.quit();
                    None
                }
                (Some(Prompt::ConfirmRestart), Key::Char('y')) => {
                    session.restart();
                    None
                }
                (Some(Prompt::ConfirmQuit | Prompt::ConfirmRestart), _) => None,
                (_, key) => match action_for_key(key) {
                    Some(UserAction::Move(direction)) => match session.apply_move(direction) {
                        Ok(_) => None,
                        Err(err @ GameError::NoPlayer { .. }) => {
                            return self.notice("Broken level", &err.to_string(), LevelResult::Failed);
                        }
                        Err(err) => return Err(err),
                    },
                    Some(UserAction::Undo) => {
                        if session.undo() {
                            None
                        } else {
                            Some(Prompt::NothingToUndo)
                        }
                    }
                    Some(UserAction::Restart) => Some(Prompt::ConfirmRestart),
                    Some(UserAction::Quit) => Some(Prompt::ConfirmQuit),
                    None => None,
                },
            };
        }
    }

    fn notice(
        &mut self,
        title: &str,
        message: &str,
        result: LevelResult,
    ) -> Result<Option<LevelResult>, GameError> {
        self.sink.render(&Screen::Notice { title, message })?;
        Ok(self.input.next_key()?.map(|_| result))
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

use crate::config::LevelRange;
use crate::core::{Cell, Grid, LevelSession};
use crate::error::GameError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Enter,
    Esc,
    Backspace,
}

pub trait InputProvider {
    /// Blocks until a key arrives. `None` means input has closed.
    fn next_key(&mut self) -> Result<Option<Key>, GameError>;
}

pub trait RenderSink {
    fn render(&mut self, screen: &Screen) -> Result<(), GameError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ConfirmQuit,
    ConfirmRestart,
    NothingToUndo,
}

pub struct LevelView<'a> {
    pub session: &'a LevelSession,
    pub prompt: Option<Prompt>,
}

pub enum Screen<'a> {
    MainMenu {
        progression: LevelRange,
        select: LevelRange,
    },
    LevelSelect {
        entry: &'a str,
        range: LevelRange,
        error: Option<&'a str>,
    },
    Level(LevelView<'a>),
    LevelComplete {
        level: usize,
        moves: u32,
        select_mode: bool,
    },
    AllComplete {
        range: LevelRange,
    },
    Notice {
        title: &'a str,
        message: &'a str,
    },
}

/// Raw mode is undone if entering the alternate screen or building the terminal fails.
pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let restore = RestoreOnDrop::new(|| {
        let _ = cleanup_terminal();
    });
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    restore.disarm();
    Ok(terminal)
}

/// Leaves raw mode before the default hook prints the panic message.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = cleanup_terminal();
        previous(info);
    }));
}

/// Runs `restore` when dropped, including while unwinding from a panic.
pub struct RestoreOnDrop<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreOnDrop<F> {
    pub fn new(restore: F) -> Self {
        RestoreOnDrop {
            restore: Some(restore),
        }
    }

    pub fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnOnce()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

pub fn cleanup_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub struct CrosstermInput {
    poll_interval: Duration,
}

impl CrosstermInput {
    pub fn new() -> Self {
        CrosstermInput {
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl Default for CrosstermInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for CrosstermInput {
    fn next_key(&mut self) -> Result<Option<Key>, GameError> {
        loop {
            if !event::poll(self.poll_interval)? {
                continue;
            }
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            else {
                continue;
            };
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Ok(None);
            }
            if let Some(key) = key_from_code(code) {
                return Ok(Some(key));
            }
        }
    }
}

pub fn key_from_code(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    })
}

pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
    color: bool,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>, color: bool) -> Self {
        TerminalSink { terminal, color }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalSink<B> {
    fn render(&mut self, screen: &Screen) -> Result<(), GameError> {
        let color = self.color;
        self.terminal.draw(|f| draw_screen(f, screen, color))?;
        Ok(())
    }
}

fn draw_screen(f: &mut Frame, screen: &Screen, color: bool) {
    match screen {
        Screen::Level(view) => draw_level(f, view, color),
        Screen::MainMenu { progression, select } => {
            let body = format!(
                "Select a game mode:\n\n\
                 1. Progression Mode (Levels {}-{})\n\
                 2. Level Select Mode (Any level {}-{})\n\
                 Q. Quit",
                progression.first, progression.last, select.first, select.last
            );
            draw_panel(f, "SOKOBAN PUZZLE GAME", body, Color::White);
        }
        Screen::LevelSelect { entry, range, error } => {
            let mut body = format!(
                "Choose any level from {} to {} to play.\n\nLevel: {}_",
                range.first, range.last, entry
            );
            if let Some(err) = error {
                body.push_str(&format!("\n\n{}", err));
            }
            body.push_str("\n\nEnter to play, Esc to go back");
            draw_panel(f, "LEVEL SELECT MODE", body, Color::White);
        }
        Screen::LevelComplete { level, moves, select_mode } => {
            let mut body = format!("🎉 LEVEL COMPLETE! 🎉\n\nLevel {} completed in {} moves!", level, moves);
            if *select_mode {
                body.push_str("\n\nM - Return to main menu\nN - Go to next level");
            } else {
                body.push_str("\n\nPress any key to continue to the next level...");
            }
            draw_panel(f, "Level Complete", body, Color::Green);
        }
        Screen::AllComplete { range } => {
            let body = format!(
                "🎉 CONGRATULATIONS! 🎉\n\nYou've completed all levels ({}-{})!\n\nPress any key to return to the main menu...",
                range.first, range.last
            );
            draw_panel(f, "Sokoban", body, Color::Green);
        }
        Screen::Notice { title, message } => {
            let body = format!("{}\n\nPress any key to continue...", message);
            draw_panel(f, title, body, Color::Yellow);
        }
    }
}

fn draw_panel(f: &mut Frame, title: &str, body: String, fg: Color) {
    let paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(fg))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, f.area());
}

fn draw_level(f: &mut Frame, view: &LevelView, color: bool) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let session = view.session;
    let progress = session.progress();
    let header = format!(
        "Level {} | Moves: {} | Boxes on targets: {}/{}",
        session.level(),
        session.moves(),
        progress.boxes_on_target,
        progress.total_targets
    );
    let header_paragraph = Paragraph::new(header)
        .block(Block::default().borders(Borders::ALL).title("Sokoban"))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    f.render_widget(header_paragraph, chunks[0]);

    let board = Paragraph::new(grid_text(session.grid(), color))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(board, centered_board(chunks[1], session.grid()));

    let footer = match view.prompt {
        Some(Prompt::ConfirmQuit) => "Quit level? (y/n)".to_string(),
        Some(Prompt::ConfirmRestart) => "Restart level? (y/n)".to_string(),
        Some(Prompt::NothingToUndo) => {
            "Nothing to undo | Move: ↑↓←→ or W/A/S/D | U=undo | R=restart | Q=quit".to_string()
        }
        None => match session.last_change() {
            Some(change) => format!(
                "Move: ↑↓←→ or W/A/S/D | U=undo | R=restart | Q=quit | Last: {:?}",
                change
            ),
            None => "Move: ↑↓←→ or W/A/S/D | U=undo | R=restart | Q=quit".to_string(),
        },
    };
    let footer_paragraph = Paragraph::new(footer)
        .block(Block::default().borders(Borders::ALL).title("Controls"))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    f.render_widget(footer_paragraph, chunks[2]);
}

/// The board is drawn two columns per cell, plus the border.
fn centered_board(area: Rect, grid: &Grid) -> Rect {
    let cols = u16::try_from(grid.width()).unwrap_or(u16::MAX);
    let rows = u16::try_from(grid.height()).unwrap_or(u16::MAX);
    let width = cols.saturating_mul(2).saturating_add(3).min(area.width);
    let height = rows.saturating_add(2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn grid_text(grid: &Grid, color: bool) -> Text<'static> {
    let lines: Vec<Line> = grid
        .rows
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&cell| {
                    let (glyph, style) = glyph(cell);
                    let style = if color { style } else { Style::default() };
                    Span::styled(format!(" {}", glyph), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    Text::from(lines)
}

fn glyph(cell: Cell) -> (char, Style) {
    let bold = Modifier::BOLD;
    match cell {
        Cell::Wall => ('▓', Style::default().fg(Color::DarkGray)),
        Cell::Floor => (' ', Style::default()),
        Cell::PlayerOnFloor => ('☺', Style::default().fg(Color::Cyan).add_modifier(bold)),
        Cell::BoxOnFloor => ('▦', Style::default().fg(Color::Yellow)),
        Cell::Target => ('○', Style::default().fg(Color::Red)),
        Cell::BoxOnTarget => ('▦', Style::default().fg(Color::Green).add_modifier(bold)),
        Cell::PlayerOnTarget => ('☺', Style::default().fg(Color::Green).add_modifier(bold)),
    }
}

/// XSB text of the grid, one line per row.
pub fn render_grid_to_string(grid: &Grid) -> String {
    let mut result = String::new();
    for row in &grid.rows {
        for c in row {
            result.push(c.to_char());
        }
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_restore_runs_on_drop_and_unwind() {
        use std::cell::Cell as Flag;
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let dropped = Flag::new(false);
        drop(RestoreOnDrop::new(|| dropped.set(true)));
        assert!(dropped.get());

        let unwound = Flag::new(false);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _restore = RestoreOnDrop::new(|| unwound.set(true));
            panic!("render failed");
        }));
        assert!(result.is_err());
        assert!(unwound.get());

        let disarmed = Flag::new(false);
        RestoreOnDrop::new(|| disarmed.set(true)).disarm();
        assert!(!disarmed.get());
    }

    #[test]
    fn test_wide_levels_fit_the_board_area() {
        let mut rows = vec![vec![Cell::Floor]; 65_535];
        rows[0] = vec![Cell::Floor; 40_000];
        let grid = Grid::new(rows);
        let area = Rect::new(0, 0, 80, 20);
        let board = centered_board(area, &grid);
        assert_eq!((board.x, board.y, board.width, board.height), (0, 0, 80, 20));

        let small = Grid::new(vec![vec![Cell::Floor; 5]; 3]);
        let board = centered_board(area, &small);
        assert_eq!((board.width, board.height), (13, 5));
        assert_eq!((board.x, board.y), (33, 7));
    }

    #[test]
    fn test_letters_are_lowercased() {
        assert_eq!(key_from_code(KeyCode::Char('W')), Some(Key::Char('w')));
        assert_eq!(key_from_code(KeyCode::Up), Some(Key::Up));
        assert_eq!(key_from_code(KeyCode::F(1)), None);
    }
}

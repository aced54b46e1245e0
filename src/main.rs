// Controls: W/A/S/D or arrow keys (immediate response). U undo, R restart, Q quit.

use clap::{Parser, ValueEnum};
use sokoban_tui::config::{ColorMode, GameConfig, GameMode};
use sokoban_tui::console_interface::{
    cleanup_terminal, install_panic_hook, setup_terminal, CrosstermInput, RestoreOnDrop,
    TerminalSink,
};
use sokoban_tui::driver::Game;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Progression,
    Select,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Progression => GameMode::Progression,
            Mode::Select => GameMode::Select,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Push every box onto a target")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the main menu and start in this mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Directory holding levelNNN.xsb files
    #[arg(long)]
    levels_dir: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Number of moves that can be undone (0 disables undo)
    #[arg(long)]
    undo_capacity: Option<usize>,

    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn into_config(self) -> Result<GameConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = Some(mode.into());
        }
        if let Some(dir) = self.levels_dir {
            config.levels_dir = dir;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        if let Some(capacity) = self.undo_capacity {
            config.undo_capacity = capacity;
        }
        if self.no_color {
            config.color = ColorMode::Never;
        }
        config.validate()?;
        Ok(config)
    }
}

/// The terminal belongs to the game, so logs go to a file.
fn init_tracing(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;
    init_tracing(&config.log_file)?;
    info!(?config, "starting");

    let color = config.color.enabled();
    install_panic_hook();
    let terminal = setup_terminal()?;
    let restore = RestoreOnDrop::new(|| {
        let _ = cleanup_terminal();
    });
    let mut game = Game::new(config, CrosstermInput::new(), TerminalSink::new(terminal, color));
    let result = game.run();
    restore.disarm();
    cleanup_terminal()?;

    if let Err(err) = &result {
        error!(error = %err, "game aborted");
    } else {
        println!("Thanks for playing!");
    }
    result.map_err(Into::into)
}

// Terminal Sokoban: the puzzle engine plus the loader, config and terminal driver around it.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

pub mod config;
pub mod console_interface;
pub mod core;
pub mod driver;
pub mod error;
pub mod levels;

#[cfg(test)]
mod test;

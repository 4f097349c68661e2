//! Super Snake: a snake game on a wrap-around board with power-ups and a
//! persisted high score.

pub mod config;
pub mod game;
pub mod high_score;
pub mod input;
pub mod render;

pub use config::{GameConfig, PowerUpTuning};
pub use game::{Direction, Game, GameState, Position, PowerUpKind};
pub use high_score::{HighScoreStore, JsonFileStore, MemoryStore};
pub use input::{Command, InputSource};

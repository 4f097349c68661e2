//! Snake rules without any window, input or drawing code.
//!
//! [`Game`] owns the whole round and is advanced one tick at a time with
//! [`Game::step`]; presentation code reads it back through [`Game::snapshot`].

pub mod clock;
pub mod engine;
pub mod grid;
pub mod pacing;
pub mod power_up;

pub use clock::{Clock, ManualClock};
pub use engine::{ActiveEffect, Game, GameState, Snapshot, StepOutcome};
pub use grid::{Board, Direction, Position};
pub use pacing::TickPacer;
pub use power_up::{PowerUp, PowerUpKind};

use std::collections::VecDeque;

use macroquad::prelude::{KeyCode, is_key_pressed};

use crate::game::Direction;

/// Decoded player intent. The engine never sees raw key codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Turn(Direction),
    /// Pause while playing, resume while paused
    TogglePause,
    /// Start from the menu, restart after game over
    Confirm,
    /// Escape: toggles pause in a round, leaves the game-over screen
    Back,
    /// Straight to the menu from the game-over screen
    Menu,
}

pub trait InputSource {
    /// Commands that arrived since the last call, oldest first
    fn poll(&mut self) -> Vec<Command>;
}

// Checked in this order each frame; arrows and WASD both steer.
const BINDINGS: &[(KeyCode, Command)] = &[
    (KeyCode::Q, Command::Quit),
    (KeyCode::Up, Command::Turn(Direction::Up)),
    (KeyCode::W, Command::Turn(Direction::Up)),
    (KeyCode::Down, Command::Turn(Direction::Down)),
    (KeyCode::S, Command::Turn(Direction::Down)),
    (KeyCode::Left, Command::Turn(Direction::Left)),
    (KeyCode::A, Command::Turn(Direction::Left)),
    (KeyCode::Right, Command::Turn(Direction::Right)),
    (KeyCode::D, Command::Turn(Direction::Right)),
    (KeyCode::Escape, Command::Back),
    (KeyCode::P, Command::TogglePause),
    (KeyCode::Enter, Command::Confirm),
    (KeyCode::KpEnter, Command::Confirm),
    (KeyCode::Space, Command::Confirm),
    (KeyCode::M, Command::Menu),
];

pub fn command_for_key(key: KeyCode) -> Option<Command> {
    BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, command)| *command)
}

/// Reads key presses from the macroquad window
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Vec<Command> {
        BINDINGS
            .iter()
            .filter(|(key, _)| is_key_pressed(*key))
            .map(|(_, command)| *command)
            .collect()
    }
}

/// Replays a fixed list of commands, one batch per poll
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<Command>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<Command>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<Command> {
        self.frames.pop_front().unwrap_or_default()
    }
}

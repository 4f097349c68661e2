use std::collections::VecDeque;

use anyhow::{Result, ensure};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::clock::Clock;
use super::grid::{Board, Direction, Position};
use super::power_up::{PowerUp, PowerUpKind};
use crate::config::GameConfig;
use crate::high_score::HighScoreStore;
use crate::input::Command;

/// Random picks tried before falling back to scanning the board for free cells
const RANDOM_PLACEMENT_ATTEMPTS: usize = 64;

/// Lifecycle of the game
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    pub ate_food: bool,
    pub spawned: Option<PowerUpKind>,
    pub picked_up: Option<PowerUpKind>,
    pub expired: Option<PowerUpKind>,
    pub game_over: bool,
    pub new_high_score: bool,
}

/// A power-up effect that is currently running
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining_secs: f64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: GameState,
    pub board: Board,
    /// Head first
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    /// Power-up waiting on the board
    pub power_up: Option<(PowerUpKind, Position)>,
    pub effect: Option<ActiveEffect>,
    pub score: u32,
    pub high_score: u32,
    pub speed: u32,
}

pub struct Game {
    config: GameConfig,
    board: Board,
    state: GameState,
    /// Head at the front
    snake: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
    food: Position,
    power_up: PowerUp,
    score: u32,
    speed: u32,
    high_score: u32,
    rng: StdRng,
    clock: Box<dyn Clock>,
    store: Box<dyn HighScoreStore>,
}

impl Game {
    /// Build a game sitting in the menu, with the high score read from `store`.
    pub fn new(
        config: GameConfig,
        clock: impl Clock + 'static,
        store: impl HighScoreStore + 'static,
    ) -> Self {
        let config = config.validate();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::new(config.cols, config.rows);
        let high_score = store.load();
        info!("high score loaded: {high_score}");

        let power_up = PowerUp::new(PowerUpKind::random(&mut rng), config.start);
        let mut game = Self {
            board,
            state: GameState::Menu,
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: config.start,
            power_up,
            score: 0,
            speed: config.base_speed,
            high_score,
            rng,
            clock: Box::new(clock),
            store: Box::new(store),
            config,
        };
        game.reinitialize();
        game
    }

    /// Fresh round: one-cell snake at the start cell heading right, score 0,
    /// base speed, new food and a hidden power-up. Only allowed from the menu
    /// or the game-over screen; returns whether anything happened.
    pub fn reset(&mut self) -> bool {
        match self.state {
            GameState::Menu | GameState::GameOver => {
                self.reinitialize();
                true
            }
            state => {
                debug!("reset ignored while {state:?}");
                false
            }
        }
    }

    fn reinitialize(&mut self) {
        self.snake.clear();
        self.snake.push_back(self.config.start);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.speed = self.config.base_speed;
        // the snake is a single cell, so a free cell always exists
        self.food = self.free_cell(None).unwrap_or(self.config.start);

        let kind = PowerUpKind::random(&mut self.rng);
        let position = self.random_cell();
        self.power_up = PowerUp::new(kind, position);
    }

    /// Menu -> Playing
    pub fn start(&mut self) {
        if self.state == GameState::Menu {
            self.reinitialize();
            self.state = GameState::Playing;
            info!("round started");
        }
    }

    /// GameOver -> Playing
    pub fn restart(&mut self) {
        if self.state == GameState::GameOver {
            self.reinitialize();
            self.state = GameState::Playing;
            info!("round restarted");
        }
    }

    /// GameOver -> Menu
    pub fn back_to_menu(&mut self) {
        if self.state == GameState::GameOver {
            self.state = GameState::Menu;
        }
    }

    /// Playing <-> Paused; ignored in any other state
    pub fn set_paused(&mut self, paused: bool) {
        self.state = match (self.state, paused) {
            (GameState::Playing, true) => GameState::Paused,
            (GameState::Paused, false) => GameState::Playing,
            (state, _) => state,
        };
    }

    /// Queue a turn for the next step. Reversing onto the body is refused.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Apply one decoded input. Returns false when the player wants to quit.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Turn(direction) => {
                if self.state == GameState::Playing {
                    self.request_direction(direction);
                }
            }
            Command::TogglePause => self.toggle_pause(),
            Command::Confirm => match self.state {
                GameState::Menu => self.start(),
                GameState::GameOver => self.restart(),
                _ => {}
            },
            Command::Back => match self.state {
                GameState::Playing | GameState::Paused => self.toggle_pause(),
                GameState::GameOver => self.back_to_menu(),
                GameState::Menu => {}
            },
            Command::Menu => self.back_to_menu(),
        }
        true
    }

    fn toggle_pause(&mut self) {
        self.set_paused(self.state == GameState::Playing);
    }

    /// Advance one tick. Does nothing unless a round is being played.
    pub fn step(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.state != GameState::Playing {
            return outcome;
        }

        self.direction = self.pending_direction;
        let head = self.board.step(self.head(), self.direction);
        self.snake.push_front(head);

        if head == self.food {
            outcome.ate_food = true;
            self.score += if self.power_up.doubles_points() { 2 } else { 1 };
            match self.free_cell(None) {
                Some(food) => self.food = food,
                None => {
                    info!("board is full");
                    self.end_round(&mut outcome);
                    return outcome;
                }
            }
            outcome.spawned = self.maybe_spawn_power_up();
        } else {
            self.snake.pop_back();
        }

        let now = self.clock.now();
        let tuning = &self.config.power_up;
        if self.power_up.is_visible() && head == self.power_up.position {
            let kind = self.power_up.kind;
            self.speed = self.power_up.pick_up(now, self.speed, tuning);
            outcome.picked_up = Some(kind);
            debug!("picked up {kind:?}, speed now {}", self.speed);
        }

        if let Some((kind, speed)) =
            self.power_up
                .expire_if_due(now, self.speed, self.config.base_speed, tuning)
        {
            self.speed = speed;
            outcome.expired = Some(kind);
            debug!("{kind:?} wore off, speed now {speed}");
        }

        if self.snake.iter().skip(1).any(|p| *p == head) {
            self.end_round(&mut outcome);
        }

        outcome
    }

    fn maybe_spawn_power_up(&mut self) -> Option<PowerUpKind> {
        if self.power_up.is_pending() || !self.rng.gen_bool(self.config.power_up.spawn_chance) {
            return None;
        }
        let food = self.food;
        let position = self.free_cell(Some(food))?;
        let kind = PowerUpKind::random(&mut self.rng);
        self.power_up.spawn(kind, position);
        debug!("{kind:?} power-up at {position:?}");
        Some(kind)
    }

    fn end_round(&mut self, outcome: &mut StepOutcome) {
        self.state = GameState::GameOver;
        outcome.game_over = true;
        info!("game over with score {}", self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            outcome.new_high_score = true;
            info!("new high score: {}", self.high_score);
            if let Err(e) = self.store.save(self.high_score) {
                warn!("{e:#}; high score kept in memory only");
            }
        }
    }

    fn random_cell(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0..self.board.cols),
            self.rng.gen_range(0..self.board.rows),
        )
    }

    /// A random cell not covered by the snake (nor by `also_avoid`), or
    /// `None` if there is no such cell.
    fn free_cell(&mut self, also_avoid: Option<Position>) -> Option<Position> {
        let is_free = |snake: &VecDeque<Position>, p: Position| {
            Some(p) != also_avoid && !snake.contains(&p)
        };

        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let p = self.random_cell();
            if is_free(&self.snake, p) {
                return Some(p);
            }
        }

        let free: Vec<Position> = self
            .board
            .cells()
            .filter(|p| is_free(&self.snake, *p))
            .collect();
        free.choose(&mut self.rng).copied()
    }

    /// Replace the snake, e.g. to set up a scenario. Body is head first and
    /// must be non-empty, on the board and free of overlaps.
    pub fn set_snake(&mut self, body: Vec<Position>, direction: Direction) -> Result<()> {
        ensure!(!body.is_empty(), "snake needs at least one segment");
        ensure!(
            body.len() < self.board.capacity(),
            "snake must leave room for food"
        );
        for (i, p) in body.iter().enumerate() {
            ensure!(self.board.contains(*p), "segment {p:?} is off the board");
            ensure!(!body[..i].contains(p), "segment {p:?} appears twice");
        }

        self.snake = body.into();
        self.direction = direction;
        self.pending_direction = direction;
        if self.snake.contains(&self.food) {
            self.food = self.free_cell(None).unwrap_or(self.food);
        }
        Ok(())
    }

    /// Move the food to `position`, which must be on the board and off the snake.
    pub fn set_food(&mut self, position: Position) -> Result<()> {
        ensure!(self.board.contains(position), "{position:?} is off the board");
        ensure!(!self.snake.contains(&position), "{position:?} is under the snake");
        self.food = position;
        Ok(())
    }

    /// Put a visible power-up at `position`, replacing any previous one.
    /// A replaced effect that is still running is reverted first.
    pub fn place_power_up(&mut self, kind: PowerUpKind, position: Position) -> Result<()> {
        ensure!(self.board.contains(position), "{position:?} is off the board");
        if let Some((old, speed)) =
            self.power_up
                .cancel_effect(self.speed, self.config.base_speed, &self.config.power_up)
        {
            self.speed = speed;
            debug!("{old:?} cancelled, speed now {speed}");
        }
        self.power_up.spawn(kind, position);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock.now();
        let tuning = &self.config.power_up;
        Snapshot {
            state: self.state,
            board: self.board,
            snake: self.snake.iter().copied().collect(),
            direction: self.direction,
            food: self.food,
            power_up: self
                .power_up
                .is_visible()
                .then_some((self.power_up.kind, self.power_up.position)),
            effect: self.power_up.running_effect().map(|kind| ActiveEffect {
                kind,
                remaining_secs: self.power_up.remaining_secs(now, tuning).unwrap_or(0.0),
            }),
            score: self.score,
            high_score: self.high_score,
            speed: self.speed,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn head(&self) -> Position {
        // never empty: every path that replaces the body keeps one segment
        self.snake.front().copied().unwrap_or(self.config.start)
    }

    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn power_up(&self) -> &PowerUp {
        &self.power_up
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}

use std::fs;

use super_snake::config::GameConfig;
use super_snake::game::{Direction, Game, GameState, ManualClock, Position};
use super_snake::high_score::{HighScoreStore, JsonFileStore, MemoryStore};
use super_snake::input::{Command, InputSource, ScriptedInput};

use tempfile::TempDir;

fn config() -> GameConfig {
    let mut config = GameConfig::small();
    config.power_up.spawn_chance = 0.0;
    config
}

/// Feed every scripted frame to the game, stepping once per frame.
/// Returns false if a Quit was seen.
fn run(game: &mut Game, input: &mut ScriptedInput) -> bool {
    while !input.is_finished() {
        for command in input.poll() {
            if !game.handle_command(command) {
                return false;
            }
        }
        game.step();
    }
    true
}

#[test]
fn menu_play_pause_resume() {
    let mut game = Game::new(config(), ManualClock::new(), MemoryStore::default());

    let mut input = ScriptedInput::new([vec![Command::Confirm]]);
    assert!(run(&mut game, &mut input));
    assert_eq!(game.state(), GameState::Playing);
    game.set_food(Position::new(0, 9)).unwrap();
    let head = game.head();

    let mut input = ScriptedInput::new([vec![Command::Back], vec![], vec![]]);
    run(&mut game, &mut input);
    assert_eq!(game.state(), GameState::Paused);
    assert_eq!(game.head(), head);

    let mut input = ScriptedInput::new([vec![Command::TogglePause]]);
    run(&mut game, &mut input);
    assert_eq!(game.state(), GameState::Playing);
    assert_ne!(game.head(), head);
}

#[test]
fn quit_stops_the_loop() {
    let mut game = Game::new(config(), ManualClock::new(), MemoryStore::default());
    let mut input = ScriptedInput::new([vec![Command::Confirm], vec![Command::Quit], vec![]]);
    assert!(!run(&mut game, &mut input));
    assert!(!input.is_finished());
}

fn crash(game: &mut Game) {
    game.set_snake(
        vec![
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
            Position::new(3, 1),
        ],
        Direction::Up,
    )
    .unwrap();
    game.set_food(Position::new(0, 0)).unwrap();
    game.handle_command(Command::Turn(Direction::Right));
    game.step();
    assert_eq!(game.state(), GameState::GameOver);
}

#[test]
fn game_over_restart_and_menu() {
    let mut game = Game::new(config(), ManualClock::new(), MemoryStore::default());
    game.handle_command(Command::Confirm);
    crash(&mut game);

    // steering and pausing do nothing on the game-over screen
    game.handle_command(Command::Turn(Direction::Down));
    game.handle_command(Command::TogglePause);
    assert_eq!(game.state(), GameState::GameOver);

    game.handle_command(Command::Confirm);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.len(), 1);
    assert_eq!(game.direction(), Direction::Right);

    crash(&mut game);
    game.handle_command(Command::Back);
    assert_eq!(game.state(), GameState::Menu);

    crash_from_menu_with_menu_key(&mut game);
}

fn crash_from_menu_with_menu_key(game: &mut Game) {
    game.handle_command(Command::Confirm);
    crash(game);
    game.handle_command(Command::Menu);
    assert_eq!(game.state(), GameState::Menu);

    // a new round from the menu never resumes the crashed snake
    game.handle_command(Command::Confirm);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.len(), 1);
    assert_eq!(game.score(), 0);
}

#[test]
fn high_score_survives_sessions_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("high_score.json");
    fs::write(&path, r#"{"high_score": 1}"#).unwrap();

    let mut game = Game::new(config(), ManualClock::new(), JsonFileStore::new(&path));
    assert_eq!(game.high_score(), 1);
    game.handle_command(Command::Confirm);
    game.set_snake(vec![Position::new(2, 6)], Direction::Up).unwrap();
    for y in [5, 4] {
        game.set_food(Position::new(2, y)).unwrap();
        game.step();
    }
    assert_eq!(game.score(), 2);
    crash(&mut game);

    assert_eq!(JsonFileStore::new(&path).load(), 2);
    let next = Game::new(config(), ManualClock::new(), JsonFileStore::new(&path));
    assert_eq!(next.high_score(), 2);
}

#[test]
fn unwritable_store_keeps_score_in_memory() {
    let dir = TempDir::new().unwrap();
    // the store points at a directory, so every save fails
    let mut game = Game::new(config(), ManualClock::new(), JsonFileStore::new(dir.path()));
    assert_eq!(game.high_score(), 0);

    game.handle_command(Command::Confirm);
    game.set_snake(vec![Position::new(2, 6)], Direction::Up).unwrap();
    game.set_food(Position::new(2, 5)).unwrap();
    game.step();
    crash(&mut game);

    assert_eq!(game.high_score(), 1);
    assert!(dir.path().is_dir());
}

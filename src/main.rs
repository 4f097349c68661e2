use macroquad::prelude::*;
use log::{LevelFilter, info, warn};
use simplelog::WriteLogger;
use std::fs::File;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use super_snake::config::{CONFIG_PATH, GameConfig};
use super_snake::game::{Clock, Game, GameState, TickPacer};
use super_snake::high_score::JsonFileStore;
use super_snake::input::{InputSource, KeyboardInput};
use super_snake::render::{MacroquadRenderer, Renderer};

const LOG_PATH: &str = "snake.log";

/// Config read once, before the window opens. A load error is kept as text
/// and logged after the logger is up.
static STARTUP_CONFIG: OnceLock<(GameConfig, Option<String>)> = OnceLock::new();

fn startup_config() -> &'static (GameConfig, Option<String>) {
    STARTUP_CONFIG.get_or_init(|| {
        let (config, error) = GameConfig::load_or_default(Path::new(CONFIG_PATH));
        (config, error.map(|e| format!("{e:#}")))
    })
}

/// Power-up timers run on the same clock as tick pacing
struct MacroquadClock;

impl Clock for MacroquadClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(get_time().max(0.0))
    }
}

fn init_logging(config: &GameConfig) {
    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
    match File::create(LOG_PATH) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                eprintln!("logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("logging disabled, can't create {LOG_PATH}: {e}"),
    }
}

fn window_conf() -> Conf {
    let (width, height) = startup_config().0.board_pixels();
    Conf {
        window_title: "Super Snake".to_owned(),
        window_width: width,
        window_height: height,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, load_error) = startup_config().clone();
    init_logging(&config);
    if let Some(e) = load_error {
        warn!("{e}; using default configuration");
    }
    info!("starting Super Snake on a {}x{} board", config.cols, config.rows);

    let store = JsonFileStore::new(&config.high_score_path);
    let mut game = Game::new(config, MacroquadClock, store);
    let mut input = KeyboardInput;
    let mut renderer = MacroquadRenderer;
    let mut pacer = TickPacer::new(get_time());

    loop {
        let before = game.state();
        for command in input.poll() {
            if !game.handle_command(command) {
                info!("quit requested");
                return;
            }
        }

        // a round that just started or resumed waits one full tick
        if game.state() == GameState::Playing && before != GameState::Playing {
            pacer.reset(get_time());
        }

        if game.state() == GameState::Playing && pacer.due(get_time(), game.speed()) {
            game.step();
        }

        renderer.draw(&game.snapshot());
        next_frame().await;
    }
}

use macroquad::prelude::*;

use crate::game::{Direction, GameState, Position, PowerUpKind, Snapshot};

// Matrix-style palette
const MATRIX_HEAD: Color = Color::new(0.64, 1.0, 0.64, 1.0); // bright green
const MATRIX_BODY: Color = Color::new(0.25, 0.9, 0.25, 1.0); // medium green
const MATRIX_DIM: Color = Color::new(0.08, 0.4, 0.08, 1.0); // dark green
const MATRIX_FOOD: Color = Color::new(1.0, 0.3, 0.3, 1.0);

const MATRIX_GLYPHS: &[u8] = b"01<>[]{}()/\\|-=+*;:.,^~ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Draws a frame from a [`Snapshot`]. Never touches the game itself.
pub trait Renderer {
    fn draw(&mut self, view: &Snapshot);
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Speed => BLUE,
        PowerUpKind::Slow => YELLOW,
        PowerUpKind::DoublePoints => RED,
    }
}

pub fn hud_line(view: &Snapshot) -> String {
    format!(
        "Score: {} | High Score: {} | Speed: {}",
        view.score, view.high_score, view.speed
    )
}

/// "Power-up: SPEED - 3.2s" while an effect is running
pub fn effect_line(view: &Snapshot) -> Option<String> {
    view.effect
        .map(|e| format!("Power-up: {} - {:.1}s", e.kind.label(), e.remaining_secs))
}

fn head_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Stable glyph per cell so the body doesn't flicker between frames
fn glyph_for_cell(c: Position) -> char {
    let hx = (c.x as i64).wrapping_mul(73_856_093);
    let hy = (c.y as i64).wrapping_mul(19_349_663);
    let h = (hx ^ hy).unsigned_abs() as usize;
    MATRIX_GLYPHS[h % MATRIX_GLYPHS.len()] as char
}

/// Board placement on the current window: tile size and top-left offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub tile: f32,
    pub off_x: f32,
    pub off_y: f32,
}

impl Layout {
    /// Largest square tiles that fit the board in a `sw` x `sh` window, centred
    pub fn fit(cols: i32, rows: i32, sw: f32, sh: f32) -> Self {
        let tile = (sw / cols as f32).min(sh / rows as f32);
        Self {
            tile,
            off_x: (sw - tile * cols as f32) * 0.5,
            off_y: (sh - tile * rows as f32) * 0.5,
        }
    }

    pub fn cell_origin(&self, c: Position) -> (f32, f32) {
        (
            self.off_x + c.x as f32 * self.tile,
            self.off_y + c.y as f32 * self.tile,
        )
    }
}

#[derive(Debug, Default)]
pub struct MacroquadRenderer;

impl MacroquadRenderer {
    fn glyph(&self, ch: char, cell: Position, color: Color, layout: &Layout) {
        let (x, y) = layout.cell_origin(cell);
        let size = layout.tile.max(6.0);
        let params = TextParams {
            font_size: size as u16,
            font_scale: 1.0,
            font_scale_aspect: 1.0,
            color,
            ..Default::default()
        };
        // text is drawn from its baseline
        draw_text_ex(&ch.to_string(), x + 1.0, y + layout.tile - 1.0, params);
    }

    fn centered(&self, text: &str, y: f32, size: u16, color: Color) {
        let m = measure_text(text, None, size, 1.0);
        draw_text(text, (screen_width() - m.width) * 0.5, y, size as f32, color);
    }

    fn draw_menu(&self, view: &Snapshot) {
        let sh = screen_height();
        self.centered("SUPER SNAKE", sh * 0.25, 56, MATRIX_HEAD);
        self.centered("Enter: Start   Q: Quit", sh * 0.5, 28, WHITE);
        self.centered("Arrows/WASD to move, Esc or P to pause", sh * 0.5 + 32.0, 20, GRAY);
        self.centered(&format!("High Score: {}", view.high_score), sh * 0.75, 28, YELLOW);
    }

    fn draw_board(&self, view: &Snapshot) {
        let layout = Layout::fit(view.board.cols, view.board.rows, screen_width(), screen_height());

        let (x, y) = layout.cell_origin(Position::new(0, 0));
        draw_rectangle_lines(
            x,
            y,
            layout.tile * view.board.cols as f32,
            layout.tile * view.board.rows as f32,
            1.0,
            MATRIX_DIM,
        );

        for (i, c) in view.snake.iter().enumerate().rev() {
            if i == 0 {
                self.glyph(head_glyph(view.direction), *c, MATRIX_HEAD, &layout);
            } else {
                self.glyph(glyph_for_cell(*c), *c, MATRIX_BODY, &layout);
            }
        }

        self.glyph('@', view.food, MATRIX_FOOD, &layout);

        if let Some((kind, position)) = view.power_up {
            let (x, y) = layout.cell_origin(position);
            draw_rectangle(x, y, layout.tile, layout.tile, power_up_color(kind));
        }

        draw_text(&hud_line(view), 10.0, 20.0, 20.0, WHITE);
        if let Some(line) = effect_line(view) {
            let color = view
                .effect
                .map(|e| power_up_color(e.kind))
                .unwrap_or(WHITE);
            draw_text(&line, 10.0, 44.0, 20.0, color);
        }
    }

    fn draw_pause(&self) {
        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.0, 0.0, 0.0, 0.5),
        );
        self.centered("PAUSED", screen_height() * 0.5, 56, WHITE);
    }

    fn draw_game_over(&self, view: &Snapshot) {
        let sh = screen_height();
        self.centered("GAME OVER", sh / 3.0, 56, MATRIX_FOOD);
        self.centered(&format!("Score: {}", view.score), sh * 0.5, 32, WHITE);
        self.centered(&format!("High Score: {}", view.high_score), sh * 0.5 + 36.0, 24, YELLOW);
        self.centered(
            "Enter: play again   Esc/M: menu   Q: quit",
            sh * 2.0 / 3.0,
            22,
            WHITE,
        );
    }
}

impl Renderer for MacroquadRenderer {
    fn draw(&mut self, view: &Snapshot) {
        clear_background(BLACK);
        match view.state {
            GameState::Menu => self.draw_menu(view),
            GameState::Playing => self.draw_board(view),
            GameState::Paused => {
                self.draw_board(view);
                self.draw_pause();
            }
            GameState::GameOver => self.draw_game_over(view),
        }
    }
}

//! Read-only frame snapshots for the drawing layer
//!
//! The simulation exposes one snapshot per tick; the render driver (canvas,
//! terminal, nothing at all in tests) consumes it without ever touching sim
//! state. Row colors and edge shading are presentation data and live here,
//! not in the sim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::paddle::Hsl;
use crate::sim::state::Mode;
use crate::sim::{GamePhase, GameState, Rect};

/// Per-row lightness ladder for brick colors (top row darkest)
const BRICK_LIGHTNESS: [f32; 5] = [20.0, 35.0, 50.0, 65.0, 80.0];
/// Brick hue (blue)
const BRICK_HUE: f32 = 240.0;

/// Color of a brick row; the ladder repeats for grids taller than it
pub fn brick_color(row: usize) -> Hsl {
    Hsl::new(BRICK_HUE, 100.0, BRICK_LIGHTNESS[row % BRICK_LIGHTNESS.len()])
}

/// CSS color string for canvas fill styles
pub fn css(color: Hsl) -> String {
    format!("hsl({}, {}%, {}%)", color.h, color.s, color.l)
}

/// One alive brick, ready to draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickView {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub color: Hsl,
}

/// Everything the drawing layer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub surface_width: f32,
    pub surface_height: f32,
    pub paddle_rect: Rect,
    pub paddle_color: Hsl,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub bricks: Vec<BrickView>,
    pub score: u32,
    pub max_score: u32,
    pub testing_mode: bool,
    pub phase: GamePhase,
}

/// Capture the current state as draw data
pub fn snapshot(state: &GameState) -> FrameSnapshot {
    FrameSnapshot {
        surface_width: state.tuning.surface_width,
        surface_height: state.tuning.surface_height,
        paddle_rect: Rect::new(
            state.paddle.x,
            state.paddle.y,
            state.paddle.width,
            state.paddle.height,
        ),
        paddle_color: state.paddle.color,
        ball_pos: state.ball.pos,
        ball_radius: state.ball.radius,
        bricks: state
            .bricks
            .alive_bricks()
            .map(|(row, col, rect)| BrickView {
                row,
                col,
                rect,
                color: brick_color(row),
            })
            .collect(),
        score: state.score,
        max_score: state.max_score,
        testing_mode: state.mode == Mode::Testing,
        phase: state.phase,
    }
}

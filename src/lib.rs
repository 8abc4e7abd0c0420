//! Gridbreak - a brick-breaking paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Read-only frame snapshots for the drawing layer
//! - `tuning`: Data-driven game balance and validation
//! - `highscores`: Persistent best-score storage

pub mod highscores;
pub mod render;
pub mod sim;
pub mod tuning;

pub use highscores::{MemoryScoreStore, ScoreStore};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Maximum travel distance per sub-step (pixels). Bounding each sub-step
    /// to this length keeps the discrete collision tests valid at high speed.
    pub const MAX_STEP_TRAVEL: f32 = 5.0;

    /// Play surface defaults (pixels)
    pub const SURFACE_WIDTH: f32 = 900.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_BASE_SPEED: f32 = 15.0;
    /// Added to paddle speed while the boost key is held
    pub const PADDLE_SPEED_BOOST: f32 = 15.0;

    /// Difficulty paddle widths
    pub const PADDLE_WIDTH_EASY: f32 = 300.0;
    pub const PADDLE_WIDTH_NORMAL: f32 = 150.0;
    pub const PADDLE_WIDTH_HARD: f32 = 75.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Launch speed, and the floor for the deceleration control
    pub const BALL_START_SPEED: f32 = 8.0;
    /// Maximum ball speed
    pub const BALL_MAX_SPEED: f32 = 16.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 6;
    pub const BRICK_HEIGHT: f32 = 35.0;
    pub const BRICK_PADDING: f32 = 1.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 0.0;
}

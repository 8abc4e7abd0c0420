//! Data-driven game balance
//!
//! Every number the simulation cares about lives here, so a session can be
//! built against a custom surface size or paddle setup (tests do this a lot).
//! `validate` rejects degenerate geometry before a session is constructed.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning can be rejected at session construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    /// Surface width or height is not a positive finite number
    DegenerateSurface,
    /// Paddle width or height is zero/negative, or wider than the surface
    DegeneratePaddle,
    /// Ball radius is not positive
    DegenerateBall,
    /// Speeds are non-positive or start exceeds max
    InvalidSpeeds,
    /// Brick grid has no cells or bricks would have non-positive width
    DegenerateGrid,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::DegenerateSurface => write!(f, "surface dimensions must be positive"),
            TuningError::DegeneratePaddle => {
                write!(f, "paddle dimensions must be positive and fit the surface")
            }
            TuningError::DegenerateBall => write!(f, "ball radius must be positive"),
            TuningError::InvalidSpeeds => {
                write!(f, "speeds must be positive with start <= max")
            }
            TuningError::DegenerateGrid => write!(f, "brick grid must have positive-size cells"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Game balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Play surface size (pixels)
    pub surface_width: f32,
    pub surface_height: f32,

    /// Paddle geometry and movement (px, px/tick)
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_speed_boost: f32,
    pub paddle_width_easy: f32,
    pub paddle_width_normal: f32,
    pub paddle_width_hard: f32,

    /// Ball geometry and speed bounds (px, px/tick)
    pub ball_radius: f32,
    pub ball_start_speed: f32,
    pub ball_max_speed: f32,

    /// Brick grid layout
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_BASE_SPEED,
            paddle_speed_boost: PADDLE_SPEED_BOOST,
            paddle_width_easy: PADDLE_WIDTH_EASY,
            paddle_width_normal: PADDLE_WIDTH_NORMAL,
            paddle_width_hard: PADDLE_WIDTH_HARD,
            ball_radius: BALL_RADIUS,
            ball_start_speed: BALL_START_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,
        }
    }
}

impl Tuning {
    /// Brick width computed so the grid tiles the surface width exactly
    pub fn brick_width(&self) -> f32 {
        (self.surface_width - self.brick_padding * (self.brick_cols as f32 - 1.0))
            / self.brick_cols as f32
    }

    /// Reject degenerate geometry before it can reach the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.surface_width) || !positive(self.surface_height) {
            return Err(TuningError::DegenerateSurface);
        }
        let widths = [
            self.paddle_width_easy,
            self.paddle_width_normal,
            self.paddle_width_hard,
        ];
        if !positive(self.paddle_height)
            || widths.iter().any(|&w| !positive(w) || w > self.surface_width)
        {
            return Err(TuningError::DegeneratePaddle);
        }
        if !positive(self.ball_radius) {
            return Err(TuningError::DegenerateBall);
        }
        if !positive(self.ball_start_speed)
            || !positive(self.ball_max_speed)
            || self.ball_start_speed > self.ball_max_speed
            || !positive(self.paddle_speed)
        {
            return Err(TuningError::InvalidSpeeds);
        }
        if self.brick_rows == 0
            || self.brick_cols == 0
            || !positive(self.brick_height)
            || !positive(self.brick_width())
        {
            return Err(TuningError::DegenerateGrid);
        }
        Ok(())
    }
}

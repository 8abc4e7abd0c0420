//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-locked timestep (speeds are pixels per tick)
//! - Seeded RNG only
//! - Row-major brick iteration order (the multi-hit tie-break)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bricks;
pub mod collision;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use bricks::BrickField;
pub use collision::{
    ImpactSide, Rect, circle_intersects_rect, resolve_impact_side, resolve_rect_bounce,
};
pub use paddle::{Difficulty, Paddle};
pub use state::{GameEvent, GamePhase, GameState, Mode};
pub use tick::{TickInput, tick};

//! Frame-locked simulation tick
//!
//! One call advances the session by one frame: paddle intent, then the ball
//! sub-stepped across wall, paddle and brick collisions. Sub-stepping bounds
//! per-step travel so a fast ball cannot tunnel through a brick or the
//! paddle line in a single update.

use super::collision::{circle_intersects_rect, resolve_impact_side, resolve_rect_bounce};
use super::paddle::Difficulty;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MAX_STEP_TRAVEL;

/// Input snapshot for a single tick. Built by the input collaborator from
/// press/release events and consumed exactly once; the simulation never
/// reads shared key flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Ball speed-boost key held (press doubles, release halves)
    pub ball_boost: bool,
    /// Paddle speed-boost key held
    pub paddle_boost: bool,
    /// Difficulty select (ignored while testing mode is active)
    pub difficulty: Option<Difficulty>,
    /// Testing-mode toggle (one-shot)
    pub testing_mode: bool,
    /// Restart request (accepted only while a terminal condition is active)
    pub restart: bool,
}

/// Advance the game state by one frame. Returns the events the driver needs
/// for persistence and scheduling; an empty result on a terminal phase means
/// the session is frozen awaiting restart.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase.is_terminal() {
        if input.restart && state.restart() {
            log::debug!("restart accepted");
        }
        return events;
    }

    state.time_ticks += 1;

    // Mode and control events before any motion
    if input.testing_mode {
        state.enter_testing_mode();
    }
    if let Some(difficulty) = input.difficulty {
        state.set_difficulty(difficulty);
    }
    state
        .paddle
        .set_boost(input.paddle_boost, state.tuning.paddle_speed_boost);

    // Ball boost is edge-detected from the held flag: double on press,
    // halve on release, bounded by [start, max].
    if input.ball_boost && !state.ball_boost_held {
        state.ball.accelerate();
    } else if !input.ball_boost && state.ball_boost_held {
        state.ball.decelerate(state.tuning.ball_start_speed);
    }
    state.ball_boost_held = input.ball_boost;

    state
        .paddle
        .step(input.left, input.right, state.tuning.surface_width);

    state.ball.clamp_speed();

    // Sub-step so each position update travels at most MAX_STEP_TRAVEL px
    let steps = (state.ball.speed / MAX_STEP_TRAVEL).ceil().max(1.0);
    let mut step_vel = state.ball.vel / steps;

    for _ in 0..steps as u32 {
        let prev = state.ball.pos;
        state.ball.pos += step_vel;

        let radius = state.ball.radius;
        let width = state.tuning.surface_width;
        let height = state.tuning.surface_height;

        // Side walls: clamp flush, flip vx, and flip the remaining step
        // direction so later sub-steps this frame continue corrected.
        if state.ball.pos.x - radius < 0.0 {
            state.ball.pos.x = radius;
            state.ball.vel.x = -state.ball.vel.x;
            step_vel.x = -step_vel.x;
            state.ball.normalize_speed();
            events.push(GameEvent::WallBounce);
        } else if state.ball.pos.x + radius > width {
            state.ball.pos.x = width - radius;
            state.ball.vel.x = -state.ball.vel.x;
            step_vel.x = -step_vel.x;
            state.ball.normalize_speed();
            events.push(GameEvent::WallBounce);
        }

        if state.ball.pos.y - radius < 0.0 {
            // Top wall, symmetric to the sides
            state.ball.pos.y = radius;
            state.ball.vel.y = -state.ball.vel.y;
            step_vel.y = -step_vel.y;
            state.ball.normalize_speed();
            events.push(GameEvent::WallBounce);
        } else if state.ball.pos.y + radius > height {
            // Bottom edge: paddle deflection or loss
            if state.paddle.spans(state.ball.pos.x) {
                let offset = state.paddle.impact_offset(state.ball.pos.x);
                state.ball.deflect(offset);
                state.ball.pos.y = height - state.paddle.height - radius;
                step_vel = state.ball.vel / steps;
                events.push(GameEvent::PaddleBounce);
            } else {
                state.record_session_end(GamePhase::Lost);
                events.push(GameEvent::Lost);
                break;
            }
        }

        // First alive brick hit in row-major order; only one brick may be
        // broken per frame.
        let ball_pos = state.ball.pos;
        let hit = state
            .bricks
            .alive_bricks()
            .find(|(_, _, rect)| circle_intersects_rect(ball_pos, radius, rect));

        if let Some((row, col, rect)) = hit {
            let side = resolve_impact_side(prev, radius, &rect);
            let (pos, vel) =
                resolve_rect_bounce(state.ball.pos, state.ball.vel, radius, &rect, side);
            state.ball.pos = pos;
            state.ball.vel = vel;
            state.ball.normalize_speed();

            state.bricks.destroy(row, col);
            events.push(GameEvent::BrickDestroyed { row, col });
            if let Some(best) = state.award_brick() {
                events.push(GameEvent::HighScore(best));
            }
            if state.bricks.is_cleared() {
                state.record_session_end(GamePhase::Won);
                events.push(GameEvent::Won);
            }
            break;
        }
    }

    events
}

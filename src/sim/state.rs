//! Game state and session aggregate
//!
//! Everything mutable for one game lives in `GameState`; ticks take it by
//! mutable reference, so tests can run as many independent sessions as they
//! like with no shared globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bricks::BrickField;
use super::paddle::{Difficulty, Paddle};
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// All bricks cleared
    Won,
    /// Ball passed the paddle
    Lost,
}

impl GamePhase {
    /// Terminal phases freeze the session until an explicit restart
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Mode state machine. Testing entry is idempotent: the one-time paddle
/// widening and ball speed doubling happen only on the Normal -> Testing
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal,
    Testing,
}

/// Things that happened during a tick, reported to the driver. The driver
/// owns persistence and scheduling, so the high-score crossing is an event
/// rather than a storage call from inside the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleBounce,
    BrickDestroyed { row: usize, col: usize },
    /// Score exceeded the previous maximum; emitted once per crossing
    HighScore(u32),
    Won,
    Lost,
}

/// RNG state wrapper. Reseeded per draw from (seed, draw counter) so the
/// whole state stays serializable without carrying generator internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Draw a fair bool (the launch-direction sign)
    pub fn next_bool(&mut self) -> bool {
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.draws));
        self.draws += 1;
        rng.random_bool(0.5)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng_state: RngState,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickField,
    /// Destroyed-brick count; never exceeds rows * cols
    pub score: u32,
    /// Best score ever seen, seeded from the store at construction.
    /// Invariant: `max_score >= score` after every update.
    pub max_score: u32,
    pub phase: GamePhase,
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Edge-detection latch for the held ball-boost key
    pub(crate) ball_boost_held: bool,
}

impl GameState {
    /// Create a session. Rejects degenerate tuning; `best_score` comes from
    /// the external score store (0 if absent).
    pub fn new(tuning: Tuning, seed: u64, best_score: u32) -> Result<Self, TuningError> {
        tuning.validate()?;

        let mut rng_state = RngState::new(seed);
        let paddle = Paddle::new(&tuning);
        let ball = Self::spawn_ball(&tuning, &paddle, &mut rng_state);

        Ok(Self {
            bricks: BrickField::new(&tuning),
            paddle,
            ball,
            rng_state,
            score: 0,
            max_score: best_score,
            phase: GamePhase::Playing,
            mode: Mode::Normal,
            difficulty: Difficulty::Normal,
            time_ticks: 0,
            ball_boost_held: false,
            tuning,
        })
    }

    /// Ball centered above the paddle, launched at 45° with a seeded sign
    fn spawn_ball(tuning: &Tuning, paddle: &Paddle, rng: &mut RngState) -> Ball {
        let pos = Vec2::new(
            tuning.surface_width / 2.0,
            paddle.y - tuning.ball_radius,
        );
        let mut ball = Ball::new(
            pos,
            tuning.ball_radius,
            tuning.ball_start_speed,
            tuning.ball_max_speed,
        );
        ball.launch(rng.next_bool());
        ball
    }

    /// Reinitialize everything except the persisted max score
    pub fn reset(&mut self) {
        self.paddle = Paddle::new(&self.tuning);
        self.ball = Self::spawn_ball(&self.tuning, &self.paddle, &mut self.rng_state);
        self.bricks.reset();
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.mode = Mode::Normal;
        self.difficulty = Difficulty::Normal;
        self.time_ticks = 0;
        self.ball_boost_held = false;
        log::info!("session reset (best {})", self.max_score);
    }

    /// Restart is accepted only while a terminal condition is active
    pub fn restart(&mut self) -> bool {
        if !self.phase.is_terminal() {
            return false;
        }
        self.reset();
        true
    }

    /// Freeze the session with a terminal outcome
    pub fn record_session_end(&mut self, outcome: GamePhase) {
        debug_assert!(outcome.is_terminal());
        if !self.phase.is_terminal() {
            self.phase = outcome;
            log::info!("session over: {:?}, score {}", outcome, self.score);
        }
    }

    /// Difficulty select; rejected while testing mode is active
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.mode == Mode::Testing {
            log::debug!("difficulty change ignored in testing mode");
            return;
        }
        self.difficulty = difficulty;
        self.paddle.apply_difficulty(difficulty, &self.tuning);
    }

    /// Enter testing mode: paddle spans the full surface and ball speed is
    /// doubled, both exactly once. Re-entry is a no-op.
    pub fn enter_testing_mode(&mut self) {
        if self.mode == Mode::Testing {
            return;
        }
        self.mode = Mode::Testing;
        self.paddle.fill_surface(self.tuning.surface_width);
        self.ball.accelerate();
        log::info!("testing mode enabled");
    }

    /// Count a destroyed brick; returns the new maximum when the score
    /// crosses above it.
    pub(crate) fn award_brick(&mut self) -> Option<u32> {
        self.score += 1;
        debug_assert!(self.score as usize <= self.bricks.total());
        if self.score > self.max_score {
            self.max_score = self.score;
            Some(self.max_score)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::TuningError;

    fn session() -> GameState {
        GameState::new(Tuning::default(), 7, 0).expect("default tuning is valid")
    }

    #[test]
    fn test_degenerate_tuning_rejected_at_construction() {
        let tuning = Tuning {
            ball_radius: 0.0,
            ..Tuning::default()
        };
        assert_eq!(
            GameState::new(tuning, 1, 0).err(),
            Some(TuningError::DegenerateBall)
        );
    }

    #[test]
    fn test_ball_spawns_above_paddle_moving_at_45_degrees() {
        let s = session();
        assert_eq!(s.ball.pos.x, s.tuning.surface_width / 2.0);
        assert!(s.ball.pos.y < s.paddle.y);
        assert!(s.ball.vel.y < 0.0);
        assert!((s.ball.vel.x.abs() - s.ball.vel.y.abs()).abs() < 1e-4);
    }

    #[test]
    fn test_launch_sign_is_seed_deterministic() {
        let a = GameState::new(Tuning::default(), 42, 0).unwrap();
        let b = GameState::new(Tuning::default(), 42, 0).unwrap();
        assert_eq!(a.ball.vel, b.ball.vel);
    }

    #[test]
    fn test_reset_preserves_max_score_only() {
        let mut s = session();
        s.score = 12;
        s.max_score = 12;
        s.bricks.destroy(0, 0);
        s.phase = GamePhase::Lost;
        s.reset();
        assert_eq!(s.score, 0);
        assert_eq!(s.max_score, 12);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.bricks.destroyed_count(), 0);
    }

    #[test]
    fn test_restart_only_from_terminal_phase() {
        let mut s = session();
        assert!(!s.restart());
        s.record_session_end(GamePhase::Lost);
        assert!(s.restart());
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_session_end_is_not_retriggered() {
        let mut s = session();
        s.record_session_end(GamePhase::Won);
        s.record_session_end(GamePhase::Lost);
        assert_eq!(s.phase, GamePhase::Won);
    }

    #[test]
    fn test_testing_mode_doubles_speed_once() {
        let mut s = session();
        let start = s.ball.speed;
        s.enter_testing_mode();
        assert_eq!(s.ball.speed, start * 2.0);
        assert_eq!(s.paddle.width, s.tuning.surface_width);
        // Re-entry must not double again
        s.enter_testing_mode();
        assert_eq!(s.ball.speed, start * 2.0);
    }

    #[test]
    fn test_difficulty_ignored_in_testing_mode() {
        let mut s = session();
        s.enter_testing_mode();
        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.paddle.width, s.tuning.surface_width);
        assert_eq!(s.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_award_brick_reports_each_crossing_once() {
        let mut s = GameState::new(Tuning::default(), 7, 5).unwrap();
        for expected in 1..=5u32 {
            assert_eq!(s.award_brick(), None, "score {expected} below stored best");
        }
        assert_eq!(s.award_brick(), Some(6));
        assert_eq!(s.award_brick(), Some(7));
        assert_eq!(s.max_score, 7);
    }
}

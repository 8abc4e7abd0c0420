//! Paddle controller
//!
//! Movement is frame-locked: the paddle moves `speed` pixels per tick while
//! a direction is held, clamped so it never leaves the surface. Difficulty
//! only changes the width; the speed-boost key adds a flat bonus while held,
//! latched so key-repeat cannot stack it.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// An HSL color triple (the source kept paddle color in this form)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Same color with lightness shifted by `delta`, clamped to [0, 100]
    pub fn with_lightness_delta(self, delta: f32) -> Self {
        Self {
            l: (self.l + delta).clamp(0.0, 100.0),
            ..self
        }
    }
}

/// Paddle width presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Wide paddle
    Easy,
    #[default]
    Normal,
    /// Narrow paddle
    Hard,
}

impl Difficulty {
    pub fn paddle_width(&self, tuning: &Tuning) -> f32 {
        match self {
            Difficulty::Easy => tuning.paddle_width_easy,
            Difficulty::Normal => tuning.paddle_width_normal,
            Difficulty::Hard => tuning.paddle_width_hard,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge (px). Invariant: `0 <= x <= surface_width - width`
    pub x: f32,
    /// Top edge (px), fixed at the bottom of the surface
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Movement per tick (base plus any active boost)
    pub speed: f32,
    pub color: Hsl,
    /// Latch so a held boost key adds its bonus exactly once
    boost_held: bool,
}

impl Paddle {
    /// Create a paddle centered at the bottom, at Normal width
    pub fn new(tuning: &Tuning) -> Self {
        let width = tuning.paddle_width_normal;
        Self {
            x: (tuning.surface_width - width) / 2.0,
            y: tuning.surface_height - tuning.paddle_height,
            width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            color: Hsl::new(0.0, 100.0, 50.0),
            boost_held: false,
        }
    }

    /// Move one tick's worth in the held direction, clamped to the surface.
    /// Holding both directions favors left, matching the source.
    pub fn step(&mut self, left: bool, right: bool, surface_width: f32) {
        if left {
            self.x -= self.speed;
        } else if right {
            self.x += self.speed;
        }
        self.x = self.x.clamp(0.0, (surface_width - self.width).max(0.0));
    }

    /// Normalized horizontal hit position: -1 at the left edge, 0 at the
    /// center, +1 at the right edge.
    #[inline]
    pub fn impact_offset(&self, ball_x: f32) -> f32 {
        2.0 * ((ball_x - self.x) / self.width - 0.5)
    }

    /// True when `x` lies within the paddle's horizontal span
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Apply a difficulty width, re-clamping so the paddle stays on-surface
    pub fn apply_difficulty(&mut self, difficulty: Difficulty, tuning: &Tuning) {
        self.width = difficulty.paddle_width(tuning);
        self.x = self.x.clamp(0.0, (tuning.surface_width - self.width).max(0.0));
    }

    /// Latched speed boost: the bonus is applied on the first press report
    /// and removed on release, no matter how often key-repeat re-fires.
    pub fn set_boost(&mut self, held: bool, bonus: f32) {
        if held && !self.boost_held {
            self.speed += bonus;
            self.boost_held = true;
        } else if !held && self.boost_held {
            self.speed -= bonus;
            self.boost_held = false;
        }
    }

    /// Widen to the full surface and pin to the left edge (testing mode)
    pub fn fill_surface(&mut self, surface_width: f32) {
        self.width = surface_width;
        self.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle() -> (Paddle, Tuning) {
        let tuning = Tuning::default();
        (Paddle::new(&tuning), tuning)
    }

    #[test]
    fn test_starts_centered() {
        let (p, t) = paddle();
        assert_eq!(p.x, (t.surface_width - p.width) / 2.0);
        assert_eq!(p.y, t.surface_height - p.height);
    }

    #[test]
    fn test_step_clamps_to_surface() {
        let (mut p, t) = paddle();
        for _ in 0..2000 {
            p.step(true, false, t.surface_width);
            assert!(p.x >= 0.0);
        }
        assert_eq!(p.x, 0.0);
        for _ in 0..2000 {
            p.step(false, true, t.surface_width);
            assert!(p.x <= t.surface_width - p.width);
        }
        assert_eq!(p.x, t.surface_width - p.width);
    }

    #[test]
    fn test_impact_offset_range() {
        let (mut p, _) = paddle();
        p.x = 100.0;
        p.width = 150.0;
        assert_eq!(p.impact_offset(100.0), -1.0);
        assert_eq!(p.impact_offset(175.0), 0.0);
        assert_eq!(p.impact_offset(250.0), 1.0);
    }

    #[test]
    fn test_difficulty_widths() {
        let (mut p, t) = paddle();
        p.apply_difficulty(Difficulty::Easy, &t);
        assert_eq!(p.width, t.paddle_width_easy);
        p.apply_difficulty(Difficulty::Hard, &t);
        assert_eq!(p.width, t.paddle_width_hard);
    }

    #[test]
    fn test_difficulty_change_keeps_paddle_on_surface() {
        let (mut p, t) = paddle();
        p.apply_difficulty(Difficulty::Hard, &t);
        // Park at the right edge with a narrow paddle, then widen
        p.x = t.surface_width - p.width;
        p.apply_difficulty(Difficulty::Easy, &t);
        assert!(p.x + p.width <= t.surface_width);
    }

    #[test]
    fn test_boost_latch_does_not_stack() {
        let (mut p, t) = paddle();
        let base = p.speed;
        // Key repeat delivers the press many times
        p.set_boost(true, t.paddle_speed_boost);
        p.set_boost(true, t.paddle_speed_boost);
        p.set_boost(true, t.paddle_speed_boost);
        assert_eq!(p.speed, base + t.paddle_speed_boost);
        p.set_boost(false, t.paddle_speed_boost);
        p.set_boost(false, t.paddle_speed_boost);
        assert_eq!(p.speed, base);
    }

    #[test]
    fn test_fill_surface() {
        let (mut p, t) = paddle();
        p.fill_surface(t.surface_width);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.width, t.surface_width);
    }
}

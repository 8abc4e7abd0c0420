//! Ball kinematics
//!
//! The ball carries a velocity vector and a scalar target speed. Every
//! direction change (wall bounce, brick bounce, paddle deflection) is
//! followed by a renormalization so repeated negation and rounding never
//! drift the actual speed away from the target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius (constant for the session)
    pub radius: f32,
    /// Scalar target speed; `|vel| == speed` after every normalization
    pub speed: f32,
    pub max_speed: f32,
}

impl Ball {
    /// Create a ball at rest. `launch` sets it moving.
    pub fn new(pos: Vec2, radius: f32, speed: f32, max_speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            speed,
            max_speed,
        }
    }

    /// Launch upward at a fixed 45° angle. The horizontal sign is the only
    /// variation between sessions.
    pub fn launch(&mut self, going_right: bool) {
        let component = self.speed * std::f32::consts::FRAC_1_SQRT_2;
        let sign = if going_right { 1.0 } else { -1.0 };
        self.vel = Vec2::new(sign * component, -component);
    }

    /// Rescale the velocity so its magnitude equals `speed` exactly.
    ///
    /// A zero-magnitude velocity has no direction to preserve; that case is
    /// logged and ignored rather than dividing by zero.
    pub fn normalize_speed(&mut self) {
        let mag = self.vel.length();
        if mag == 0.0 {
            log::warn!("normalize_speed called with zero velocity; ignoring");
            return;
        }
        self.vel *= self.speed / mag;
    }

    /// Clamp the target speed to `max_speed`, renormalizing if it changed.
    pub fn clamp_speed(&mut self) {
        if self.speed > self.max_speed {
            self.speed = self.max_speed;
            self.normalize_speed();
        }
    }

    /// Double the target speed (boost press), capped at `max_speed`.
    pub fn accelerate(&mut self) {
        self.speed = (self.speed * 2.0).min(self.max_speed);
        self.normalize_speed();
    }

    /// Halve the target speed (boost release), floored at `floor` - the
    /// session's initial speed.
    pub fn decelerate(&mut self, floor: f32) {
        self.speed = (self.speed / 2.0).max(floor);
        self.normalize_speed();
    }

    /// Apply the paddle deflection law for a normalized impact offset in
    /// [-1, 1]: the horizontal velocity becomes `offset * speed` and the
    /// vertical component is whatever upward speed preserves the total
    /// exactly. An edge graze (offset ±1) leaves the ball moving
    /// horizontally.
    pub fn deflect(&mut self, offset: f32) {
        let offset = offset.clamp(-1.0, 1.0);
        let vx = offset * self.speed;
        let vy = -(self.speed * self.speed - vx * vx).max(0.0).sqrt();
        self.vel = Vec2::new(vx, vy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn ball() -> Ball {
        Ball::new(Vec2::new(100.0, 100.0), 12.0, 8.0, 16.0)
    }

    #[test]
    fn test_launch_is_45_degrees_at_speed() {
        let mut b = ball();
        b.launch(true);
        assert!((b.vel.length() - b.speed).abs() < EPS);
        assert!((b.vel.x - (-b.vel.y)).abs() < EPS);
        assert!(b.vel.y < 0.0);

        b.launch(false);
        assert!(b.vel.x < 0.0);
        assert!((b.vel.length() - b.speed).abs() < EPS);
    }

    #[test]
    fn test_normalize_restores_target_speed() {
        let mut b = ball();
        b.vel = Vec2::new(1.0, -1.0); // direction only, wrong magnitude
        b.normalize_speed();
        assert!((b.vel.length() - 8.0).abs() < EPS);
        // Direction preserved
        assert!(b.vel.x > 0.0 && b.vel.y < 0.0);
    }

    #[test]
    fn test_normalize_zero_velocity_is_noop() {
        let mut b = ball();
        b.normalize_speed();
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_speed() {
        let mut b = ball();
        b.launch(true);
        b.speed = 40.0;
        b.clamp_speed();
        assert_eq!(b.speed, 16.0);
        assert!((b.vel.length() - 16.0).abs() < EPS);
    }

    #[test]
    fn test_accelerate_caps_at_max() {
        let mut b = ball();
        b.launch(true);
        b.accelerate();
        assert_eq!(b.speed, 16.0);
        b.accelerate();
        assert_eq!(b.speed, 16.0);
        assert!((b.vel.length() - 16.0).abs() < EPS);
    }

    #[test]
    fn test_decelerate_floors_at_initial_speed() {
        let mut b = ball();
        b.launch(true);
        b.accelerate();
        b.decelerate(8.0);
        assert_eq!(b.speed, 8.0);
        b.decelerate(8.0);
        assert_eq!(b.speed, 8.0);
        assert!((b.vel.length() - 8.0).abs() < EPS);
    }

    #[test]
    fn test_deflect_preserves_speed_and_points_up() {
        let mut b = ball();
        b.launch(true);
        for offset in [-1.0, -0.5, 0.0, 0.3, 1.0] {
            b.deflect(offset);
            assert!((b.vel.length() - b.speed).abs() < EPS, "offset {offset}");
            assert!(b.vel.y <= 0.0, "offset {offset}");
            assert!((b.vel.x - offset * b.speed).abs() < EPS, "offset {offset}");
        }
    }

    #[test]
    fn test_deflect_center_is_straight_up() {
        let mut b = ball();
        b.launch(true);
        b.deflect(0.0);
        assert!(b.vel.x.abs() < EPS);
        assert!((b.vel.y + b.speed).abs() < EPS);
    }
}

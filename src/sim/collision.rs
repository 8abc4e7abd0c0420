//! Collision detection and side-of-impact resolution
//!
//! Pure geometry: a circle (the ball) against axis-aligned rectangles
//! (bricks). The side a brick was hit from is classified using the ball's
//! pre-step position, which is why the simulation sub-steps its motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (brick, or any rectangular obstacle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Which face of a rectangle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactSide {
    Left,
    Right,
    Top,
    Bottom,
    /// No single side test passed (corner graze); both velocity components
    /// are negated and the ball is not repositioned.
    Ambiguous,
}

/// True when the ball's bounding circle overlaps the rectangle.
///
/// The four half-plane inequalities are strict, matching rasterized
/// edge-touch behavior: a circle exactly tangent to an edge does not hit.
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.y
        && center.y - radius < rect.bottom()
}

/// Classify the side of impact from the ball's pre-step position.
///
/// If the previous position, inflated by the radius, was fully outside the
/// rectangle on a given side, that side is the impact side. Tested in
/// left/right/top/bottom order; a corner approach that passes none of the
/// tests is `Ambiguous`.
pub fn resolve_impact_side(prev: Vec2, radius: f32, rect: &Rect) -> ImpactSide {
    if prev.x + radius <= rect.x {
        ImpactSide::Left
    } else if prev.x - radius >= rect.right() {
        ImpactSide::Right
    } else if prev.y + radius <= rect.y {
        ImpactSide::Top
    } else if prev.y - radius >= rect.bottom() {
        ImpactSide::Bottom
    } else {
        ImpactSide::Ambiguous
    }
}

/// Apply the per-side bounce policy: reposition flush against the struck
/// edge (`edge ± radius`) and negate the matching velocity component.
/// `Ambiguous` negates both components and leaves the position alone.
///
/// Returns the corrected (position, velocity).
pub fn resolve_rect_bounce(
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    rect: &Rect,
    side: ImpactSide,
) -> (Vec2, Vec2) {
    match side {
        ImpactSide::Left => (Vec2::new(rect.x - radius, pos.y), Vec2::new(-vel.x, vel.y)),
        ImpactSide::Right => (
            Vec2::new(rect.right() + radius, pos.y),
            Vec2::new(-vel.x, vel.y),
        ),
        ImpactSide::Top => (Vec2::new(pos.x, rect.y - radius), Vec2::new(vel.x, -vel.y)),
        ImpactSide::Bottom => (
            Vec2::new(pos.x, rect.bottom() + radius),
            Vec2::new(vel.x, -vel.y),
        ),
        ImpactSide::Ambiguous => (pos, -vel),
    }
}

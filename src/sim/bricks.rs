//! The brick field
//!
//! A fixed rows x cols grid of breakable cells. Cell positions are derived
//! from the grid index, padding and offsets, so only the alive/destroyed
//! status is real state. Traversal is row-major (row outer, column inner);
//! when the ball overlaps more than one brick in a sub-step, the first
//! brick in that order wins.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickField {
    rows: usize,
    cols: usize,
    brick_width: f32,
    brick_height: f32,
    padding: f32,
    offset_top: f32,
    offset_left: f32,
    /// Alive flags, row-major
    alive: Vec<bool>,
    destroyed: usize,
}

impl BrickField {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rows: tuning.brick_rows,
            cols: tuning.brick_cols,
            brick_width: tuning.brick_width(),
            brick_height: tuning.brick_height,
            padding: tuning.brick_padding,
            offset_top: tuning.brick_offset_top,
            offset_left: tuning.brick_offset_left,
            alive: vec![true; tuning.brick_rows * tuning.brick_cols],
            destroyed: 0,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count
    #[inline]
    pub fn total(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.alive[self.index(row, col)]
    }

    /// Derived rectangle of a cell
    pub fn rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * (self.brick_width + self.padding) + self.offset_left,
            row as f32 * (self.brick_height + self.padding) + self.offset_top,
            self.brick_width,
            self.brick_height,
        )
    }

    /// Lazy row-major traversal of alive bricks
    pub fn alive_bricks(&self) -> impl Iterator<Item = (usize, usize, Rect)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                self.is_alive(row, col)
                    .then(|| (row, col, self.rect(row, col)))
            })
        })
    }

    /// Flip a cell alive -> destroyed. Returns false if it was already
    /// destroyed; the flip is irreversible until `reset`.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        let idx = self.index(row, col);
        if !self.alive[idx] {
            return false;
        }
        self.alive[idx] = false;
        self.destroyed += 1;
        true
    }

    /// True when every cell is destroyed
    pub fn is_cleared(&self) -> bool {
        self.destroyed == self.total()
    }

    /// Repopulate every cell to alive
    pub fn reset(&mut self) {
        self.alive.fill(true);
        self.destroyed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> BrickField {
        BrickField::new(&Tuning::default())
    }

    #[test]
    fn test_traversal_is_row_major() {
        let f = field();
        let order: Vec<(usize, usize)> = f.alive_bricks().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order.len(), f.total());
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[1], (0, 1));
        assert_eq!(order[f.cols()], (1, 0));
    }

    #[test]
    fn test_destroyed_bricks_leave_traversal() {
        let mut f = field();
        assert!(f.destroy(0, 0));
        assert!(f.alive_bricks().all(|(r, c, _)| (r, c) != (0, 0)));
        assert_eq!(f.alive_bricks().count(), f.total() - 1);
    }

    #[test]
    fn test_destroy_is_one_shot() {
        let mut f = field();
        assert!(f.destroy(2, 3));
        assert!(!f.destroy(2, 3));
        assert_eq!(f.destroyed_count(), 1);
    }

    #[test]
    fn test_cleared_when_all_destroyed() {
        let mut f = field();
        for row in 0..f.rows() {
            for col in 0..f.cols() {
                assert!(!f.is_cleared());
                f.destroy(row, col);
            }
        }
        assert!(f.is_cleared());
    }

    #[test]
    fn test_reset_repopulates() {
        let mut f = field();
        f.destroy(0, 0);
        f.destroy(4, 5);
        f.reset();
        assert_eq!(f.destroyed_count(), 0);
        assert_eq!(f.alive_bricks().count(), f.total());
    }

    #[test]
    fn test_rect_positions_follow_grid_math() {
        let t = Tuning::default();
        let f = BrickField::new(&t);
        let r = f.rect(2, 3);
        let w = t.brick_width();
        assert!((r.x - (3.0 * (w + t.brick_padding) + t.brick_offset_left)).abs() < 0.001);
        assert!(
            (r.y - (2.0 * (t.brick_height + t.brick_padding) + t.brick_offset_top)).abs() < 0.001
        );
        assert_eq!(r.h, t.brick_height);
    }

    #[test]
    fn test_rows_do_not_overlap() {
        let f = field();
        let upper = f.rect(0, 0);
        let lower = f.rect(1, 0);
        assert!(upper.bottom() <= lower.y);
    }
}

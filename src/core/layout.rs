//! Table geometry: points, rectangles, anchors.
//!
//! The rules engine is display-agnostic, but drop-target resolution and the
//! illegal-drop reset both work in table coordinates, so the engine carries
//! a minimal geometry layer. Anchors match the classic 1280x720 table:
//! seven tableau columns along the middle, four foundation piles top-right,
//! the talon top-left.

use serde::{Deserialize, Serialize};

/// Card width in table units.
pub const CARD_WIDTH: f32 = 80.0;

/// Card height in table units.
pub const CARD_HEIGHT: f32 = 116.0;

/// Vertical offset between fanned cards in a tableau column.
pub const FAN_OFFSET: f32 = 30.0;

/// Number of tableau columns.
pub const TABLEAU_COUNT: usize = 7;

/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;

/// Anchor of tableau column `index` (0-based, left to right).
#[must_use]
pub fn tableau_anchor(index: usize) -> Point {
    Point::new(340.0 + 110.0 * index as f32, 200.0)
}

/// Anchor of foundation pile `index` (0-based, left to right).
#[must_use]
pub fn foundation_anchor(index: usize) -> Point {
    Point::new(340.0 + 110.0 * (4 + index) as f32, 50.0)
}

/// Anchor of the talon.
#[must_use]
pub fn talon_anchor() -> Point {
    Point::new(100.0, 50.0)
}

/// A point in table coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in table coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The card-sized rectangle at `pos`.
    #[must_use]
    pub fn card_at(pos: Point) -> Self {
        Self::new(pos.x, pos.y, CARD_WIDTH, CARD_HEIGHT)
    }

    /// Do the two rectangles overlap?
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Horizontal midpoint, the reference point for drop-target proximity.
    #[must_use]
    pub fn midpoint_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_are_distinct_columns() {
        for i in 0..TABLEAU_COUNT {
            for j in 0..TABLEAU_COUNT {
                if i != j {
                    assert_ne!(tableau_anchor(i).x, tableau_anchor(j).x);
                }
            }
        }
    }

    #[test]
    fn test_foundations_sit_above_tableaus() {
        for i in 0..FOUNDATION_COUNT {
            assert!(foundation_anchor(i).y < tableau_anchor(0).y);
        }
    }

    #[test]
    fn test_point_offset() {
        let p = Point::new(10.0, 20.0).offset(5.0, -5.0);
        assert_eq!(p, Point::new(15.0, 15.0));
    }

    #[test]
    fn test_rect_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_intersects_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(200.0, 0.0, 100.0, 100.0);

        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 100.0, 100.0);

        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_card_rect_midpoint() {
        let rect = Rect::card_at(Point::new(100.0, 200.0));
        assert_eq!(rect.midpoint_x(), 100.0 + CARD_WIDTH / 2.0);
    }
}

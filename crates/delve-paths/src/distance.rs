use delve_core::{MovementCost, Point};

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// A* estimate: Chebyshev distance scaled by [`MovementCost::NORMAL`].
///
/// Never overestimates as long as no step costs less than `NORMAL`.
#[inline]
pub fn estimate(a: Point, b: Point) -> i32 {
    MovementCost::NORMAL * chebyshev(a, b)
}

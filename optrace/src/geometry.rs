//! 2D vector helpers.
//!
//! Addition, subtraction, scaling and dot products are the `nalgebra`
//! operators on [`Position`]; this module holds what `nalgebra` doesn't
//! spell the way the engine needs it.

use super::Float;
use nalgebra::Vector2;

/// A point, or the difference of two points.
pub type Position = Vector2<Float>;

/// Returns `v` scaled to unit length, or the zero vector if `v` is (nearly) zero.
#[inline]
#[must_use]
pub fn normalize(v: Position) -> Position {
    let norm = v.norm();
    if norm < Float::EPSILON {
        Position::zeros()
    } else {
        v / norm
    }
}

/// `v` rotated by +90°: `(x, y) -> (-y, x)`
#[inline]
#[must_use]
pub fn perpendicular(v: Position) -> Position {
    Position::new(-v.y, v.x)
}

#[inline]
#[must_use]
pub fn to_radians(degrees: Float) -> Float {
    degrees.to_radians()
}

/// The unit vector pointing at `degrees` from the +x axis.
#[inline]
#[must_use]
pub fn direction(degrees: Float) -> Position {
    let (sin, cos) = to_radians(degrees).sin_cos();
    Position::new(cos, sin)
}

/// Rotate `v` by `degrees` around the origin.
#[inline]
#[must_use]
pub fn rotate(v: Position, degrees: Float) -> Position {
    let (sin, cos) = to_radians(degrees).sin_cos();
    Position::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(normalize(Position::zeros()), Position::zeros());
        assert_eq!(normalize(Position::new(1e-300, 0.0)), Position::zeros());
    }

    #[test]
    fn normalize_unit_length() {
        let n = normalize(Position::new(3.0, 4.0));
        assert_abs_diff_eq!(n, Position::new(0.6, 0.8), epsilon = 1e-12);
    }

    #[test]
    fn perpendicular_turns_left() {
        assert_eq!(perpendicular(Position::new(1.0, 0.0)), Position::new(-0.0, 1.0));
        assert_eq!(perpendicular(Position::new(2.0, 3.0)), Position::new(-3.0, 2.0));
    }

    #[test]
    fn full_turn_points_along_x() {
        assert_abs_diff_eq!(direction(360.0), Position::new(1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(direction(90.0), Position::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_matches_direction() {
        for deg in [1.0, 45.0, 137.0, 290.0] {
            assert_abs_diff_eq!(
                rotate(Position::new(1.0, 0.0), deg),
                direction(deg),
                epsilon = 1e-12
            );
        }
    }
}

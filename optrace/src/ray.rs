use super::*;

/// A light ray, represented as a half-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The starting point of the half-line
    pub origin: Position,
    /// The direction of the half-line, of unit length unless it degenerated to zero
    pub dir: Position,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Position>, dir: impl Into<Position>) -> Self {
        Self {
            origin: origin.into(),
            dir: dir.into(),
        }
    }

    /// Move the ray's origin forward (or backward if t < 0.0) by `t`
    #[inline]
    pub fn advance(&mut self, t: Float) {
        self.origin = self.at(t);
    }

    /// Get the point at distance `t` (can be negative) from the ray's origin
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Position {
        self.origin + self.dir * t
    }
}

/// A ray still travelling through the bench, along with the energy it carries
/// and the surface it departed from.
///
/// `'a` is the lifetime of the component set being traced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveRay<'a> {
    pub ray: Ray,
    /// In `0.0..=1.0`, never increases along a lineage.
    pub intensity: Float,
    /// Id of the component this ray left, ignored when looking for its next hit.
    pub last_hit: Option<&'a str>,
}

impl<'a> ActiveRay<'a> {
    #[inline]
    #[must_use]
    pub fn new(ray: Ray, intensity: Float, last_hit: Option<&'a str>) -> Self {
        Self {
            ray,
            intensity,
            last_hit,
        }
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> Position {
        self.ray.origin
    }

    #[inline]
    #[must_use]
    pub fn dir(&self) -> Position {
        self.ray.dir
    }

    /// A continuation of this ray leaving `from` at `origin` towards `dir`,
    /// with its intensity scaled by `factor`.
    #[inline]
    #[must_use]
    pub fn spawn<'b>(
        &self,
        origin: Position,
        dir: Position,
        factor: Float,
        from: &'b str,
    ) -> ActiveRay<'b> {
        ActiveRay::new(Ray::new(origin, dir), self.intensity * factor, Some(from))
    }
}

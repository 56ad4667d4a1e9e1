use super::*;
use crate::geometry::perpendicular;

/// Thresholds guarding the ray/surface intersection against roundoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    /// Rays whose direction has a smaller dot product with a surface normal are
    /// considered parallel to that surface, and never hit it.
    pub parallel: Float,
    /// Hits closer than this to the ray's origin are discarded, so that a ray
    /// leaving a surface can't bump into it again.
    pub forward: Float,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            parallel: 1e-6,
            forward: 1e-4,
        }
    }
}

/// Where a ray meets a component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection<'a> {
    /// Distance travelled along the ray.
    pub dist: Float,
    pub point: Position,
    pub component: &'a OpticalComponent,
    /// The surface normal at `point`, not necessarily facing the ray.
    pub normal: Position,
}

#[derive(Clone, Copy, Debug)]
pub struct SimulationCtx<'a> {
    eps: &'a Tolerances,
}

impl<'a> SimulationCtx<'a> {
    #[inline]
    #[must_use]
    pub fn new(eps: &'a Tolerances) -> Self {
        Self { eps }
    }

    #[inline]
    #[must_use]
    pub fn tolerances(&self) -> &'a Tolerances {
        self.eps
    }

    /// The nearest of `hits`. On equal distances, the first one wins.
    #[inline]
    #[must_use]
    pub fn closest<'b>(
        &self,
        hits: impl IntoIterator<Item = Intersection<'b>>,
    ) -> Option<Intersection<'b>> {
        hits.into_iter()
            .min_by(|i1, i2| i1.dist.total_cmp(&i2.dist))
    }
}

/// Something a ray can run into.
///
/// Implemented for single components, and for any collection of them, in which
/// case the nearest hit among its elements is returned.
pub trait Surface {
    /// The nearest point, strictly in front of `ray`, at which it meets `self`, if any.
    ///
    /// Never returns a hit on the component `ray` last left.
    fn closest_intersection(
        &self,
        ray: &ActiveRay<'_>,
        ctx: SimulationCtx<'_>,
    ) -> Option<Intersection<'_>>;
}

impl Surface for OpticalComponent {
    fn closest_intersection(
        &self,
        ray: &ActiveRay<'_>,
        ctx: SimulationCtx<'_>,
    ) -> Option<Intersection<'_>> {
        if ray.last_hit == Some(self.id.as_str()) {
            return None;
        }

        // emitters have no surface
        let normal = self.normal()?;
        let tangent = perpendicular(normal);
        let eps = ctx.tolerances();

        let denominator = ray.dir().dot(&normal);
        if denominator.abs() < eps.parallel {
            return None;
        }

        let t = (self.position - ray.origin()).dot(&normal) / denominator;
        // written this way round so that NaNs are rejected too
        if !(t >= eps.forward) {
            return None;
        }

        let point = ray.ray.at(t);
        let offset = (point - self.position).dot(&tangent);
        if !(offset.abs() <= self.half_extent()) {
            return None;
        }

        Some(Intersection {
            dist: t,
            point,
            component: self,
            normal,
        })
    }
}

impl<T: Surface> Surface for [T] {
    #[inline]
    fn closest_intersection(
        &self,
        ray: &ActiveRay<'_>,
        ctx: SimulationCtx<'_>,
    ) -> Option<Intersection<'_>> {
        ctx.closest(
            self.iter()
                .filter_map(|surface| surface.closest_intersection(ray, ctx)),
        )
    }
}

impl<T: Surface> Surface for Vec<T> {
    #[inline]
    fn closest_intersection(
        &self,
        ray: &ActiveRay<'_>,
        ctx: SimulationCtx<'_>,
    ) -> Option<Intersection<'_>> {
        self.as_slice().closest_intersection(ray, ctx)
    }
}

/// The nearest component `ray` runs into, with the default [`Tolerances`].
#[inline]
#[must_use]
pub fn find_closest_intersection<'a>(
    ray: &ActiveRay<'_>,
    components: &'a [OpticalComponent],
) -> Option<Intersection<'a>> {
    components.closest_intersection(ray, SimulationCtx::new(&Tolerances::default()))
}

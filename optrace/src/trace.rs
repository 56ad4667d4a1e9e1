use core::mem;

use arrayvec::ArrayVec;
use log::{debug, trace};

use super::*;
use crate::geometry::{normalize, perpendicular};

/// The constants driving a propagation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceConfig {
    /// Maximum number of bounce rounds.
    pub max_bounces: usize,
    /// Spawned rays at or below this intensity are dropped.
    pub min_intensity: Float,
    /// Length of the segment drawn for a ray that hits nothing.
    pub far_distance: Float,
    /// How far in front of its emitter a ray starts.
    pub emitter_offset: Float,
    pub tolerances: Tolerances,
}

impl TraceConfig {
    pub const MAX_BOUNCES: usize = 30;
    pub const MIN_INTENSITY: Float = 0.01;
    pub const FAR_DISTANCE: Float = 500.0;
    pub const EMITTER_OFFSET: Float = 1e-3;
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_bounces: Self::MAX_BOUNCES,
            min_intensity: Self::MIN_INTENSITY,
            far_distance: Self::FAR_DISTANCE,
            emitter_offset: Self::EMITTER_OFFSET,
            tolerances: Tolerances::default(),
        }
    }
}

/// A straight piece of a traced beam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySegment {
    pub p1: Position,
    pub p2: Position,
    pub intensity: Float,
}

impl RaySegment {
    #[inline]
    #[must_use]
    pub fn new(p1: impl Into<Position>, p2: impl Into<Position>, intensity: Float) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
            intensity,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        (self.p2 - self.p1).norm()
    }

    /// Unit vector from `p1` to `p2`, zero for a degenerate segment.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Position {
        normalize(self.p2 - self.p1)
    }
}

/// `normal`, flipped if needed so that it points against `dir`.
#[inline]
#[must_use]
pub fn facing_normal(dir: Position, normal: Position) -> Position {
    if dir.dot(&normal) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// Mirror image of `dir` w.r.t. the surface whose normal is `normal`.
#[inline]
#[must_use]
pub fn reflect(dir: Position, normal: Position) -> Position {
    normalize(dir - normal * (2.0 * dir.dot(&normal)))
}

/// Thin lens deflection of `dir` entering at `offset` from the lens's center,
/// measured along `axis`.
///
/// A focal length of (nearly) zero leaves `dir` untouched.
#[inline]
#[must_use]
pub fn refract(dir: Position, axis: Position, offset: Float, focal_length: Float) -> Position {
    if focal_length.abs() < Float::EPSILON {
        return dir;
    }
    normalize(dir - axis * (offset / focal_length))
}

/// The rays leaving `hit` after `ray` runs into it, in spawn order.
///
/// Intensities are scaled but not filtered, see [`TraceConfig::min_intensity`].
#[must_use]
pub fn interact<'a>(ray: &ActiveRay<'_>, hit: &Intersection<'a>) -> ArrayVec<ActiveRay<'a>, 2> {
    let mut spawned = ArrayVec::new();

    let component = hit.component;
    let id = component.id.as_str();
    let dir = ray.dir();
    let normal = facing_normal(dir, hit.normal);

    let kind = &component.kind;

    match kind {
        ComponentKind::Emitter { .. } | ComponentKind::Detector => {}
        ComponentKind::Mirror { .. } | ComponentKind::Splitter { .. } => {
            if let Some(r) = kind.reflectivity() {
                spawned.push(ray.spawn(hit.point, reflect(dir, normal), r, id));
            }
            if let Some(t) = kind.transmissivity() {
                spawned.push(ray.spawn(hit.point, dir, t, id));
            }
        }
        ComponentKind::ConvexLens { .. } | ComponentKind::ConcaveLens { .. } => {
            if let Some(f) = kind.signed_focal_length() {
                let axis = perpendicular(normal);
                let offset = (hit.point - component.position).dot(&axis);
                spawned.push(ray.spawn(hit.point, refract(dir, axis, offset, f), 1.0, id));
            }
        }
    }

    spawned
}

/// A propagation run, advancing one bounce round per call to [`Iterator::next`],
/// which yields the segments drawn during that round.
///
/// Stops once the bounce ceiling is reached or no ray is left.
#[derive(Clone, Debug)]
pub struct Propagation<'a> {
    components: &'a [OpticalComponent],
    config: TraceConfig,
    active: Vec<ActiveRay<'a>>,
    bounce: usize,
}

impl<'a> Propagation<'a> {
    /// Start a run with one ray per emitter in `components`.
    #[must_use]
    pub fn new(components: &'a [OpticalComponent], config: TraceConfig) -> Self {
        let active = components
            .iter()
            .filter_map(|c| {
                c.emitted_ray(config.emitter_offset)
                    .map(|ray| ActiveRay::new(ray, 1.0, Some(c.id.as_str())))
            })
            .collect();

        Self {
            components,
            config,
            active,
            bounce: 0,
        }
    }

    /// Rays that will be traced in the next round.
    #[inline]
    #[must_use]
    pub fn active_rays(&self) -> &[ActiveRay<'a>] {
        &self.active
    }

    /// Number of rounds run so far.
    #[inline]
    #[must_use]
    pub const fn bounce(&self) -> usize {
        self.bounce
    }

    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.active.is_empty() || self.bounce >= self.config.max_bounces
    }
}

impl<'a> Iterator for Propagation<'a> {
    type Item = Vec<RaySegment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }

        let ctx = SimulationCtx::new(&self.config.tolerances);
        let rays = mem::take(&mut self.active);
        let mut segments = Vec::with_capacity(rays.len());

        for ray in &rays {
            let origin = ray.origin();

            let Some(hit) = self.components.closest_intersection(ray, ctx) else {
                segments.push(RaySegment::new(
                    origin,
                    ray.ray.at(self.config.far_distance),
                    ray.intensity,
                ));
                continue;
            };

            trace!(
                "bounce {}: ray from ({}, {}) hit {} `{}` at ({}, {})",
                self.bounce,
                origin.x,
                origin.y,
                hit.component.ty(),
                hit.component.id,
                hit.point.x,
                hit.point.y,
            );

            segments.push(RaySegment::new(origin, hit.point, ray.intensity));

            let min_intensity = self.config.min_intensity;
            self.active.extend(
                interact(ray, &hit)
                    .into_iter()
                    .filter(|spawned| spawned.intensity > min_intensity),
            );
        }

        debug!(
            "bounce {}: traced {} rays, {} still active",
            self.bounce,
            rays.len(),
            self.active.len(),
        );

        self.bounce += 1;
        Some(segments)
    }
}

/// Trace every emitter in `components` with the default [`TraceConfig`].
#[inline]
#[must_use]
pub fn calculate_ray_path(components: &[OpticalComponent]) -> Vec<RaySegment> {
    trace_with(components, &TraceConfig::default())
}

/// Trace every emitter in `components`.
///
/// Segments come out round by round, and within a round, in the order of the
/// rays that drew them.
#[must_use]
pub fn trace_with(components: &[OpticalComponent], config: &TraceConfig) -> Vec<RaySegment> {
    if !components.iter().any(|c| c.kind.is_emitter()) {
        return Vec::new();
    }

    Propagation::new(components, *config).flatten().collect()
}

use super::*;

/// Whether `segment` ends on `detector`: its end point lies closer to the
/// detector's center than half of the detector's drawn size.
#[inline]
#[must_use]
pub fn ends_on(segment: &RaySegment, detector: &OpticalComponent) -> bool {
    (segment.p2 - detector.position).norm() < detector.visual_size() * 0.5
}

/// The detectors in `components` some segment ends on, in component order.
///
/// The surface half-extent of a detector is smaller than half its drawn size,
/// so every detector absorbing a ray is reported.
#[must_use]
pub fn detectors_hit<'a>(
    components: &'a [OpticalComponent],
    segments: &[RaySegment],
) -> Vec<&'a OpticalComponent> {
    components
        .iter()
        .filter(|c| c.ty() == ComponentType::Detector)
        .filter(|detector| segments.iter().any(|s| ends_on(s, detector)))
        .collect()
}

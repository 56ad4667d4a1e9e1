use core::fmt;

use super::*;
use crate::geometry::{direction, perpendicular, rotate};

pub type ComponentId = String;

/// Length of a component's interactive surface at `size == 1.0`.
///
/// Must stay in sync with the drawn surface: the physical footprint of a
/// component is its visual footprint.
pub const SURFACE_LENGTH: Float = 2.5;

/// Side of the square a component is drawn in at `size == 1.0`.
pub const VISUAL_SIZE: Float = 3.0;

/// The tag of a [`ComponentKind`], without its attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Emitter,
    Mirror,
    ConvexLens,
    ConcaveLens,
    Splitter,
    Detector,
}

impl ComponentType {
    pub const ALL: [Self; 6] = [
        Self::Emitter,
        Self::Mirror,
        Self::ConvexLens,
        Self::ConcaveLens,
        Self::Splitter,
        Self::Detector,
    ];

    /// The name found in the `"type"` field of a serialized component.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Emitter => "LASER",
            Self::Mirror => "MIRROR",
            Self::ConvexLens => "CONVEX_LENS",
            Self::ConcaveLens => "CONCAVE_LENS",
            Self::Splitter => "BEAM_SPLITTER",
            Self::Detector => "DETECTOR",
        }
    }

    /// Inverse of [`Self::name`], also accepting `EMITTER` and `SPLITTER`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "LASER" | "EMITTER" => Self::Emitter,
            "MIRROR" => Self::Mirror,
            "CONVEX_LENS" => Self::ConvexLens,
            "CONCAVE_LENS" => Self::ConcaveLens,
            "BEAM_SPLITTER" | "SPLITTER" => Self::Splitter,
            "DETECTOR" => Self::Detector,
            _ => return None,
        })
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a component is, with the attributes only that kind of component has.
///
/// Missing attributes are kept as `None` and resolved to their defaults when
/// the engine needs them, so a setup round-trips without gaining fields.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentKind {
    Emitter {
        /// Not used by the tracer.
        power: Option<Float>,
        /// In nanometers, only used for display colour.
        wavelength: Option<Float>,
    },
    Mirror {
        reflectivity: Option<Float>,
    },
    ConvexLens {
        focal_length: Option<Float>,
    },
    ConcaveLens {
        focal_length: Option<Float>,
    },
    Splitter {
        reflectivity: Option<Float>,
        transmissivity: Option<Float>,
    },
    Detector,
}

impl ComponentKind {
    pub const DEFAULT_REFLECTIVITY: Float = 1.0;
    pub const DEFAULT_TRANSMISSIVITY: Float = 0.5;
    pub const DEFAULT_FOCAL_LENGTH: Float = 1.0;

    #[inline]
    #[must_use]
    pub const fn ty(&self) -> ComponentType {
        match self {
            Self::Emitter { .. } => ComponentType::Emitter,
            Self::Mirror { .. } => ComponentType::Mirror,
            Self::ConvexLens { .. } => ComponentType::ConvexLens,
            Self::ConcaveLens { .. } => ComponentType::ConcaveLens,
            Self::Splitter { .. } => ComponentType::Splitter,
            Self::Detector => ComponentType::Detector,
        }
    }

    /// The attributes a freshly placed component of type `ty` starts with.
    #[must_use]
    pub fn with_defaults(ty: ComponentType) -> Self {
        match ty {
            ComponentType::Emitter => Self::Emitter {
                power: Some(5.0),
                wavelength: Some(650.0),
            },
            ComponentType::Mirror => Self::Mirror {
                reflectivity: Some(0.98),
            },
            ComponentType::ConvexLens => Self::ConvexLens {
                focal_length: Some(10.0),
            },
            ComponentType::ConcaveLens => Self::ConcaveLens {
                focal_length: Some(10.0),
            },
            ComponentType::Splitter => Self::Splitter {
                reflectivity: Some(0.5),
                transmissivity: Some(0.5),
            },
            ComponentType::Detector => Self::Detector,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_emitter(&self) -> bool {
        matches!(self, Self::Emitter { .. })
    }

    /// The surface normal before the component is rotated.
    ///
    /// `None` for emitters, which rays pass through.
    #[must_use]
    pub fn base_normal(&self) -> Option<Position> {
        match self {
            Self::Emitter { .. } => None,
            Self::Mirror { .. }
            | Self::ConvexLens { .. }
            | Self::ConcaveLens { .. }
            | Self::Detector => Some(Position::new(1.0, 0.0)),
            // drawn as the diagonal of its square
            Self::Splitter { .. } => Some(direction(-45.0)),
        }
    }

    /// Fraction of the incoming intensity sent along the reflected direction,
    /// `None` if this kind doesn't reflect.
    #[must_use]
    pub fn reflectivity(&self) -> Option<Float> {
        match self {
            Self::Mirror { reflectivity } | Self::Splitter { reflectivity, .. } => {
                Some(reflectivity.unwrap_or(Self::DEFAULT_REFLECTIVITY))
            }
            _ => None,
        }
    }

    /// Fraction of the incoming intensity let straight through,
    /// `None` if this kind doesn't transmit.
    #[must_use]
    pub fn transmissivity(&self) -> Option<Float> {
        match self {
            Self::Splitter { transmissivity, .. } => {
                Some(transmissivity.unwrap_or(Self::DEFAULT_TRANSMISSIVITY))
            }
            _ => None,
        }
    }

    /// Focal length, negative for diverging lenses, `None` if this isn't a lens.
    #[must_use]
    pub fn signed_focal_length(&self) -> Option<Float> {
        match self {
            Self::ConvexLens { focal_length } => {
                Some(focal_length.unwrap_or(Self::DEFAULT_FOCAL_LENGTH))
            }
            Self::ConcaveLens { focal_length } => {
                Some(-focal_length.unwrap_or(Self::DEFAULT_FOCAL_LENGTH))
            }
            _ => None,
        }
    }
}

impl From<ComponentType> for ComponentKind {
    fn from(ty: ComponentType) -> Self {
        Self::with_defaults(ty)
    }
}

/// An element placed on the bench.
#[derive(Clone, Debug, PartialEq)]
pub struct OpticalComponent {
    pub id: ComponentId,
    pub kind: ComponentKind,
    /// Center of the component.
    pub position: Position,
    /// In degrees. Never exactly `0.0` for emitters, see [`Self::set_rotation`].
    rotation: Float,
    /// Multiplier on the drawn and physical length of the component.
    pub size: Float,
}

impl OpticalComponent {
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<ComponentId>,
        kind: impl Into<ComponentKind>,
        position: impl Into<Position>,
        rotation: Float,
    ) -> Self {
        let mut this = Self {
            id: id.into(),
            kind: kind.into(),
            position: position.into(),
            rotation: 0.0,
            size: 1.0,
        };
        this.set_rotation(rotation);
        this
    }

    /// A component of type `ty` with the attributes and rotation the editor places it with.
    #[must_use]
    pub fn placed(
        id: impl Into<ComponentId>,
        ty: ComponentType,
        position: impl Into<Position>,
    ) -> Self {
        let rotation = if ty == ComponentType::Emitter { 1.0 } else { 0.0 };
        Self::new(id, ty, position, rotation)
    }

    #[inline]
    #[must_use]
    pub fn with_size(mut self, size: Float) -> Self {
        self.size = size;
        self
    }

    #[inline]
    #[must_use]
    pub const fn ty(&self) -> ComponentType {
        self.kind.ty()
    }

    #[inline]
    #[must_use]
    pub const fn rotation(&self) -> Float {
        self.rotation
    }

    /// Set the rotation, in degrees.
    ///
    /// `0.0` means "no direction" for an emitter, so an emitter set to `0.0`
    /// is stored as `360.0`, which fires the same way.
    pub fn set_rotation(&mut self, degrees: Float) {
        self.rotation = if self.kind.is_emitter() && degrees == 0.0 {
            360.0
        } else {
            degrees
        };
    }

    /// Turn the component by `step` degrees, wrapping into `0.0..360.0`
    /// (`0.0` landing on `360.0` for emitters).
    pub fn rotate_by(&mut self, step: Float) {
        let wrapped = (self.rotation + step).rem_euclid(360.0);
        // `rem_euclid` rounds tiny negative sums up to the modulus itself
        self.set_rotation(if wrapped >= 360.0 { 0.0 } else { wrapped });
    }

    /// Half the length of the interactive surface, along its tangent.
    #[inline]
    #[must_use]
    pub fn half_extent(&self) -> Float {
        self.size * SURFACE_LENGTH * 0.5
    }

    #[inline]
    #[must_use]
    pub fn visual_size(&self) -> Float {
        self.size * VISUAL_SIZE
    }

    /// World-space surface normal, `None` for emitters.
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Option<Position> {
        self.kind
            .base_normal()
            .map(|n| rotate(n, self.rotation))
    }

    /// World-space surface tangent: the normal turned by +90°.
    #[inline]
    #[must_use]
    pub fn tangent(&self) -> Option<Position> {
        self.normal().map(perpendicular)
    }

    /// The first ray of an emitter, starting `offset` in front of it.
    ///
    /// `None` if `self` isn't an emitter.
    #[must_use]
    pub fn emitted_ray(&self, offset: Float) -> Option<Ray> {
        self.kind.is_emitter().then(|| {
            // `kind` is public, a component may have become an emitter after its rotation was set
            let rotation = if self.rotation == 0.0 { 360.0 } else { self.rotation };
            let dir = direction(rotation);
            Ray::new(self.position + dir * offset, dir)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn names_round_trip() {
        for ty in ComponentType::ALL {
            assert_eq!(ComponentType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(ComponentType::from_name("EMITTER"), Some(ComponentType::Emitter));
        assert_eq!(ComponentType::from_name("SPLITTER"), Some(ComponentType::Splitter));
        assert_eq!(ComponentType::from_name("PRISM"), None);
    }

    #[test]
    fn emitter_rotation_zero_becomes_full_turn() {
        let mut laser = OpticalComponent::new("l", ComponentType::Emitter, [0.0, 0.0], 0.0);
        assert_eq!(laser.rotation(), 360.0);

        laser.set_rotation(1.0);
        assert_eq!(laser.rotation(), 1.0);

        laser.set_rotation(0.0);
        assert_eq!(laser.rotation(), 360.0);
    }

    #[test]
    fn other_kinds_keep_zero_rotation() {
        let mirror = OpticalComponent::new("m", ComponentType::Mirror, [0.0, 0.0], 0.0);
        assert_eq!(mirror.rotation(), 0.0);
    }

    #[test]
    fn rotate_by_wraps() {
        let mut mirror = OpticalComponent::new("m", ComponentType::Mirror, [0.0, 0.0], 355.0);
        mirror.rotate_by(10.0);
        assert_abs_diff_eq!(mirror.rotation(), 5.0);
        mirror.rotate_by(-10.0);
        assert_abs_diff_eq!(mirror.rotation(), 355.0);

        let mut laser = OpticalComponent::new("l", ComponentType::Emitter, [0.0, 0.0], 5.0);
        laser.rotate_by(-5.0);
        assert_eq!(laser.rotation(), 360.0);
        laser.rotate_by(5.0);
        assert_eq!(laser.rotation(), 5.0);
    }

    #[test]
    fn rotate_by_tiny_negative_step_stays_below_a_full_turn() {
        let mut mirror = OpticalComponent::new("m", ComponentType::Mirror, [0.0, 0.0], 0.0);
        mirror.rotate_by(-1e-20);
        assert_eq!(mirror.rotation(), 0.0);

        let mut laser = OpticalComponent::new("l", ComponentType::Emitter, [0.0, 0.0], 0.0);
        laser.rotate_by(-1e-20);
        assert_eq!(laser.rotation(), 360.0);
    }

    #[test]
    fn placed_defaults() {
        let laser = OpticalComponent::placed("l", ComponentType::Emitter, [1.0, 2.0]);
        assert_eq!(laser.rotation(), 1.0);
        assert_eq!(laser.size, 1.0);
        assert_eq!(
            laser.kind,
            ComponentKind::Emitter {
                power: Some(5.0),
                wavelength: Some(650.0)
            }
        );

        let mirror = OpticalComponent::placed("m", ComponentType::Mirror, [0.0, 0.0]);
        assert_eq!(mirror.rotation(), 0.0);
        assert_eq!(mirror.kind.reflectivity(), Some(0.98));
    }

    #[test]
    fn attribute_defaults() {
        let bare_mirror = ComponentKind::Mirror { reflectivity: None };
        assert_eq!(bare_mirror.reflectivity(), Some(1.0));
        assert_eq!(bare_mirror.transmissivity(), None);

        let bare_splitter = ComponentKind::Splitter {
            reflectivity: None,
            transmissivity: None,
        };
        assert_eq!(bare_splitter.reflectivity(), Some(1.0));
        assert_eq!(bare_splitter.transmissivity(), Some(0.5));

        let concave = ComponentKind::ConcaveLens {
            focal_length: Some(4.0),
        };
        assert_eq!(concave.signed_focal_length(), Some(-4.0));
        assert_eq!(
            ComponentKind::ConvexLens { focal_length: None }.signed_focal_length(),
            Some(1.0)
        );
        assert_eq!(ComponentKind::Detector.signed_focal_length(), None);
    }

    #[test]
    fn normals_follow_rotation() {
        let mirror = OpticalComponent::new("m", ComponentType::Mirror, [0.0, 0.0], 90.0);
        assert_abs_diff_eq!(mirror.normal().unwrap(), Position::new(0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(mirror.tangent().unwrap(), Position::new(-1.0, 0.0), epsilon = 1e-12);

        let splitter = OpticalComponent::new("s", ComponentType::Splitter, [0.0, 0.0], 45.0);
        assert_abs_diff_eq!(splitter.normal().unwrap(), Position::new(1.0, 0.0), epsilon = 1e-12);

        let laser = OpticalComponent::new("l", ComponentType::Emitter, [0.0, 0.0], 45.0);
        assert_eq!(laser.normal(), None);
    }

    #[test]
    fn extents_scale_with_size() {
        let detector =
            OpticalComponent::new("d", ComponentType::Detector, [0.0, 0.0], 0.0).with_size(2.0);
        assert_abs_diff_eq!(detector.half_extent(), 2.5);
        assert_abs_diff_eq!(detector.visual_size(), 6.0);
    }

    #[test]
    fn emitted_ray_starts_in_front() {
        let laser = OpticalComponent::new("l", ComponentType::Emitter, [2.0, 3.0], 90.0);
        let ray = laser.emitted_ray(1e-3).unwrap();
        assert_abs_diff_eq!(ray.origin, Position::new(2.0, 3.001), epsilon = 1e-12);
        assert_abs_diff_eq!(ray.dir, Position::new(0.0, 1.0), epsilon = 1e-12);

        let mirror = OpticalComponent::new("m", ComponentType::Mirror, [0.0, 0.0], 0.0);
        assert_eq!(mirror.emitted_ray(1e-3), None);
    }
}

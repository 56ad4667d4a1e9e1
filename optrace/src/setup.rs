use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencySweep {
    pub start: Float,
    pub stop: Float,
    pub steps: u32,
}

impl Default for FrequencySweep {
    fn default() -> Self {
        Self {
            start: 200.0,
            stop: 400.0,
            steps: 100,
        }
    }
}

/// Bench-wide settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalSettings {
    pub frequency_sweep: FrequencySweep,
    /// Spacing multiplier between components, see [`Setup::set_scale`].
    pub scale: Float,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            frequency_sweep: FrequencySweep::default(),
            scale: 1.0,
        }
    }
}

/// Axis aligned box, `min` being the corner with the smallest coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Position,
    pub max: Position,
}

impl BoundingBox {
    #[inline]
    #[must_use]
    pub fn width(&self) -> Float {
        self.max.x - self.min.x
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> Float {
        self.max.y - self.min.y
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Position {
        (self.min + self.max) * 0.5
    }
}

/// A whole optical bench: the components on it and its settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Setup {
    pub components: Vec<OpticalComponent>,
    pub settings: GlobalSettings,
}

impl Default for Setup {
    /// A laser pointed at a mirror tilted by 45°.
    fn default() -> Self {
        Self {
            components: vec![
                OpticalComponent::new(
                    "initial-laser",
                    ComponentKind::Emitter {
                        power: Some(10.0),
                        wavelength: Some(635.0),
                    },
                    [5.0, 15.0],
                    1.0,
                ),
                OpticalComponent::new(
                    "initial-mirror",
                    ComponentKind::Mirror {
                        reflectivity: Some(1.0),
                    },
                    [15.0, 15.0],
                    45.0,
                ),
            ],
            settings: GlobalSettings::default(),
        }
    }
}

impl Setup {
    #[inline]
    #[must_use]
    pub fn new(components: Vec<OpticalComponent>) -> Self {
        Self {
            components,
            settings: GlobalSettings::default(),
        }
    }

    #[inline]
    pub fn emitters(&self) -> impl Iterator<Item = &OpticalComponent> + '_ {
        self.components.iter().filter(|c| c.kind.is_emitter())
    }

    #[inline]
    #[must_use]
    pub fn component(&self, id: &str) -> Option<&OpticalComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    #[inline]
    #[must_use]
    pub fn trace(&self) -> Vec<RaySegment> {
        calculate_ray_path(&self.components)
    }

    #[inline]
    #[must_use]
    pub fn trace_with(&self, config: &TraceConfig) -> Vec<RaySegment> {
        trace_with(&self.components, config)
    }

    /// The box enclosing every component, padded by twice each component's size.
    ///
    /// An empty bench gets the `(0, 0)` to `(10, 10)` box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        if self.components.is_empty() {
            return BoundingBox {
                min: Position::zeros(),
                max: Position::new(10.0, 10.0),
            };
        }

        let init = BoundingBox {
            min: Position::repeat(Float::INFINITY),
            max: Position::repeat(Float::NEG_INFINITY),
        };

        self.components.iter().fold(init, |bb, c| {
            let pad = Position::repeat(c.size * 2.0);
            BoundingBox {
                min: bb.min.inf(&(c.position - pad)),
                max: bb.max.sup(&(c.position + pad)),
            }
        })
    }

    /// The mean position of all components, `None` for an empty bench.
    #[must_use]
    pub fn centroid(&self) -> Option<Position> {
        let n = self.components.len();
        (n != 0).then(|| {
            self.components
                .iter()
                .map(|c| c.position)
                .sum::<Position>()
                / n as Float
        })
    }

    /// Change the scale setting, spreading (or packing) components
    /// around their centroid by the ratio of the new and old scales.
    ///
    /// Components are left in place if the old scale isn't positive.
    pub fn set_scale(&mut self, scale: Float) {
        let old = self.settings.scale;
        self.settings.scale = scale;

        if scale == old || old <= 0.0 {
            return;
        }

        if let Some(center) = self.centroid() {
            let ratio = scale / old;
            for c in &mut self.components {
                c.position = center + (c.position - center) * ratio;
            }
        }
    }
}

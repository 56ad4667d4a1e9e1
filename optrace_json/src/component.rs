use super::*;

pub trait JsonType {
    /// Returns the string found in the `"type"` field of the json representation of `self`
    fn json_type(&self) -> &'static str;
}

impl JsonType for ComponentType {
    fn json_type(&self) -> &'static str {
        self.name()
    }
}

impl JsonType for ComponentKind {
    fn json_type(&self) -> &'static str {
        self.ty().name()
    }
}

impl JsonType for OpticalComponent {
    fn json_type(&self) -> &'static str {
        self.kind.json_type()
    }
}

/// Attributes of `kind`, as `(key, value)` pairs, absent ones left out.
fn attributes(kind: &ComponentKind) -> Vec<(&'static str, Float)> {
    let pairs: &[(&'static str, Option<Float>)] = match *kind {
        ComponentKind::Emitter { power, wavelength } => {
            &[("power", power), ("wavelength", wavelength)]
        }
        ComponentKind::Mirror { reflectivity } => &[("reflectivity", reflectivity)],
        ComponentKind::ConvexLens { focal_length }
        | ComponentKind::ConcaveLens { focal_length } => &[("focalLength", focal_length)],
        ComponentKind::Splitter {
            reflectivity,
            transmissivity,
        } => &[
            ("reflectivity", reflectivity),
            ("transmissivity", transmissivity),
        ],
        ComponentKind::Detector => &[],
    };

    pairs
        .iter()
        .filter_map(|&(key, value)| value.map(|v| (key, v)))
        .collect()
}

/// Reads the attributes a component of type `ty` can have from `json`,
/// ignoring the others.
pub fn kind_from_json(
    ty: ComponentType,
    json: &serde_json::Value,
) -> Result<ComponentKind, JsonError> {
    Ok(match ty {
        ComponentType::Emitter => ComponentKind::Emitter {
            power: optional_number(json, "power")?,
            wavelength: optional_number(json, "wavelength")?,
        },
        ComponentType::Mirror => ComponentKind::Mirror {
            reflectivity: optional_fraction(json, "reflectivity")?,
        },
        ComponentType::ConvexLens => ComponentKind::ConvexLens {
            focal_length: optional_positive(json, "focalLength")?,
        },
        ComponentType::ConcaveLens => ComponentKind::ConcaveLens {
            focal_length: optional_positive(json, "focalLength")?,
        },
        ComponentType::Splitter => ComponentKind::Splitter {
            reflectivity: optional_fraction(json, "reflectivity")?,
            transmissivity: optional_fraction(json, "transmissivity")?,
        },
        ComponentType::Detector => ComponentKind::Detector,
    })
}

/// The type of the component `json` describes.
///
/// Fails with [`JsonError::UnknownType`] if the name isn't one of [`ComponentType::name`]'s
/// (or an accepted alias).
pub fn component_type(json: &serde_json::Value) -> Result<ComponentType, JsonError> {
    let name = required(json, "type")?
        .as_str()
        .ok_or(JsonError::invalid("type", "a string"))?;

    ComponentType::from_name(name).ok_or_else(|| JsonError::UnknownType(name.into()))
}

/// Deserialize a component, using `fallback_id` if it has no `"id"` field.
pub fn component_from_json(
    json: &serde_json::Value,
    fallback_id: impl FnOnce(ComponentType) -> ComponentId,
) -> Result<OpticalComponent, JsonError> {
    let ty = component_type(json)?;

    let id = match optional(json, "id") {
        Some(id) => id.as_str().ok_or(JsonError::invalid("id", "a string"))?.into(),
        None => fallback_id(ty),
    };

    let position = Position::from_json(required(json, "position")?)?;
    let rotation = required_number(json, "rotation")?;
    let size = optional_positive(json, "size")?.unwrap_or(1.0);

    Ok(OpticalComponent::new(id, kind_from_json(ty, json)?, position, rotation).with_size(size))
}

impl JsonDes for OpticalComponent {
    /// Deserialize a component from a JSON object of the following format:
    ///
    /// ```json
    /// {
    ///     "id": "mirror-1",               // optional, defaults to "<TYPE>-0"
    ///     "type": "MIRROR",               // a `ComponentType::name`, or EMITTER / SPLITTER
    ///     "position": { "x": 15, "y": 15 },
    ///     "rotation": 45,                 // degrees, an emitter's 0 is read as 360
    ///     "size": 1,                      // optional, positive
    ///     "reflectivity": 0.98            // type-specific attributes, all optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        component_from_json(json, |ty| format!("{ty}-0"))
    }
}

impl JsonSer for OpticalComponent {
    /// Serialize a component into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        let mut json = serde_json::json!({
            "id": self.id,
            "type": self.json_type(),
            "position": self.position.to_json(),
            "rotation": self.rotation(),
            "size": self.size,
        });

        if let Some(object) = json.as_object_mut() {
            for (key, value) in attributes(&self.kind) {
                object.insert(key.into(), value.into());
            }
        }

        json
    }
}

use super::*;

impl JsonSer for FrequencySweep {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start,
            "stop": self.stop,
            "steps": self.steps,
        })
    }
}

impl JsonDes for FrequencySweep {
    /// Missing fields take their default value.
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        let default = Self::default();

        let steps = optional(json, "steps")
            .map(|v| {
                v.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or(JsonError::invalid("steps", "a non-negative integer"))
            })
            .transpose()?;

        Ok(Self {
            start: optional_number(json, "start")?.unwrap_or(default.start),
            stop: optional_number(json, "stop")?.unwrap_or(default.stop),
            steps: steps.unwrap_or(default.steps),
        })
    }
}

impl JsonSer for GlobalSettings {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "frequencySweep": self.frequency_sweep.to_json(),
            "scale": self.scale,
        })
    }
}

impl JsonDes for GlobalSettings {
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        let default = Self::default();

        Ok(Self {
            frequency_sweep: optional(json, "frequencySweep")
                .map(FrequencySweep::from_json)
                .transpose()?
                .unwrap_or(default.frequency_sweep),
            scale: optional_positive(json, "scale")?.unwrap_or(default.scale),
        })
    }
}

/// Deserialize the components of a setup, skipping those of unknown type.
///
/// Components without an id are named after their type and index in the array.
pub fn deserialize_components(
    json: &serde_json::Value,
) -> Result<Vec<OpticalComponent>, JsonError> {
    let array = json
        .as_array()
        .ok_or(JsonError::invalid("components", "an array"))?;

    let mut components = Vec::with_capacity(array.len());

    for (i, value) in array.iter().enumerate() {
        match component_from_json(value, |ty| format!("{ty}-{i}")) {
            Ok(c) => components.push(c),
            Err(JsonError::UnknownType(name)) => {
                log::warn!("skipping component {i} of unknown type `{name}`");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(components)
}

impl JsonSer for Setup {
    /// Serialize a setup into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "components": self.components.to_json(),
            "globalSettings": self.settings.to_json(),
        })
    }
}

impl JsonDes for Setup {
    /// Deserialize a setup from a JSON object of the following format:
    ///
    /// ```json
    /// {
    ///     "components": [ <component>, ... ],
    ///     "globalSettings": {                 // optional
    ///         "frequencySweep": { "start": 200, "stop": 400, "steps": 100 },
    ///         "scale": 1
    ///     }
    /// }
    /// ```
    ///
    /// A bare array of components is also accepted, with default settings.
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        if json.is_array() {
            return deserialize_components(json).map(Setup::new);
        }

        Ok(Self {
            components: deserialize_components(required(json, "components")?)?,
            settings: optional(json, "globalSettings")
                .map(GlobalSettings::from_json)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[inline]
pub fn deserialize_setup(json: &serde_json::Value) -> Result<Setup, JsonError> {
    Setup::from_json(json)
}

/// Parse and deserialize a setup from JSON text.
pub fn setup_from_str(text: &str) -> Result<Setup, JsonError> {
    deserialize_setup(&serde_json::from_str(text)?)
}

/// Parse and deserialize a setup from a reader, such as a file.
pub fn setup_from_reader(reader: impl std::io::Read) -> Result<Setup, JsonError> {
    deserialize_setup(&serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EDITOR_EXPORT: &str = r#"{
        "components": [
            {
                "id": "laser", "type": "LASER", "position": { "x": 0, "y": 0 }, "rotation": 0,
                "power": 5, "wavelength": 650
            },
            { "type": "PRISM", "position": { "x": 5, "y": 0 }, "rotation": 0 },
            { "type": "DETECTOR", "position": { "x": 10, "y": 0 }, "rotation": 0 }
        ],
        "globalSettings": {
            "frequencySweep": { "start": 100, "stop": 300, "steps": 10 },
            "scale": 2
        }
    }"#;

    #[test]
    fn reads_editor_export() {
        let setup = setup_from_str(EDITOR_EXPORT).unwrap();

        let ids: Vec<_> = setup.components.iter().map(|c| c.id.as_str()).collect();
        // the prism is skipped, the detector keeps its index in the array
        assert_eq!(ids, ["laser", "DETECTOR-2"]);

        assert_eq!(
            setup.settings,
            GlobalSettings {
                frequency_sweep: FrequencySweep {
                    start: 100.0,
                    stop: 300.0,
                    steps: 10
                },
                scale: 2.0,
            }
        );

        let segments = setup.trace();
        assert_eq!(segments.len(), 1);
        assert_eq!(
            detectors_hit(&setup.components, &segments)
                .iter()
                .map(|d| d.id.as_str())
                .collect::<Vec<_>>(),
            ["DETECTOR-2"]
        );
    }

    #[test]
    fn bare_array_gets_default_settings() {
        let setup = deserialize_setup(&json!([
            { "type": "MIRROR", "position": { "x": 1, "y": 1 }, "rotation": 30 },
        ]))
        .unwrap();

        assert_eq!(setup.components.len(), 1);
        assert_eq!(setup.components[0].id, "MIRROR-0");
        assert_eq!(setup.settings, GlobalSettings::default());
    }

    #[test]
    fn partial_settings() {
        let setup = deserialize_setup(&json!({
            "components": [],
            "globalSettings": { "frequencySweep": { "steps": 7 } },
        }))
        .unwrap();

        assert_eq!(setup.settings.scale, 1.0);
        assert_eq!(setup.settings.frequency_sweep.start, 200.0);
        assert_eq!(setup.settings.frequency_sweep.steps, 7);
    }

    #[test]
    fn errors() {
        assert!(matches!(setup_from_str("{ not json"), Err(JsonError::Syntax(_))));

        assert!(matches!(
            deserialize_setup(&json!({ "globalSettings": {} })),
            Err(JsonError::MissingField("components"))
        ));

        assert!(matches!(
            deserialize_setup(&json!({ "components": [], "globalSettings": { "scale": 0 } })),
            Err(JsonError::InvalidField { field: "scale", .. })
        ));

        // a known type with broken fields fails the whole setup
        assert!(matches!(
            deserialize_setup(&json!([{ "type": "MIRROR", "rotation": 0 }])),
            Err(JsonError::MissingField("position"))
        ));
    }

    #[test]
    fn loaded_intensities_never_rise() {
        let out_of_range = json!([
            { "id": "l", "type": "LASER", "position": { "x": 0, "y": 0 }, "rotation": 0 },
            {
                "id": "m", "type": "MIRROR", "position": { "x": 10, "y": 0 }, "rotation": 45,
                "reflectivity": 2.0
            },
        ]);
        assert!(matches!(
            deserialize_setup(&out_of_range),
            Err(JsonError::InvalidField { field: "reflectivity", .. })
        ));

        let setup = deserialize_setup(&json!([
            { "id": "l", "type": "LASER", "position": { "x": 0, "y": 0 }, "rotation": 0 },
            {
                "id": "bs", "type": "BEAM_SPLITTER", "position": { "x": 10, "y": 0 }, "rotation": 0,
                "reflectivity": 1.0, "transmissivity": 1.0
            },
            {
                "id": "m", "type": "MIRROR", "position": { "x": 20, "y": 0 }, "rotation": 0,
                "reflectivity": 1.0
            },
        ]))
        .unwrap();

        let segments = setup.trace();
        assert!(segments.len() > 2);
        assert!(segments.iter().all(|s| s.intensity <= 1.0));
    }

    #[test]
    fn round_trip() {
        let mut setup = Setup::default();
        setup.settings.frequency_sweep.steps = 3;
        setup.components.push(
            OpticalComponent::placed("bs", ComponentType::Splitter, [3.0, -4.0]).with_size(2.0),
        );

        assert_eq!(deserialize_setup(&setup.to_json()).unwrap(), setup);
    }
}

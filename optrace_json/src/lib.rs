//! JSON (de)serialization of optical benches and of their traced beams.
//!
//! The layout follows the one the bench editor exports: camelCase keys,
//! positions as `{ "x": .., "y": .. }` objects, and the component's type
//! name stored flat next to its attributes.

use optrace::*;

pub use serde_json;

mod component;
mod setup;

pub use component::*;
pub use setup::*;

#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown component type `{0}`")]
    UnknownType(String),
    #[error("invalid json: {0}")]
    Syntax(#[from] serde_json::Error),
}

impl JsonError {
    #[inline]
    #[must_use]
    pub const fn invalid(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidField { field, expected }
    }
}

/// `json[field]`, if present and not `null`.
#[inline]
pub fn optional<'a>(json: &'a serde_json::Value, field: &str) -> Option<&'a serde_json::Value> {
    json.get(field).filter(|v| !v.is_null())
}

/// `json[field]`, failing if it's missing.
#[inline]
pub fn required<'a>(
    json: &'a serde_json::Value,
    field: &'static str,
) -> Result<&'a serde_json::Value, JsonError> {
    optional(json, field).ok_or(JsonError::MissingField(field))
}

/// `json[field]` as a number, `None` if absent.
pub fn optional_number(
    json: &serde_json::Value,
    field: &'static str,
) -> Result<Option<Float>, JsonError> {
    optional(json, field)
        .map(|v| v.as_f64().ok_or(JsonError::invalid(field, "a number")))
        .transpose()
}

/// `json[field]` as a strictly positive number, `None` if absent.
pub fn optional_positive(
    json: &serde_json::Value,
    field: &'static str,
) -> Result<Option<Float>, JsonError> {
    optional_number(json, field)?
        .map(|v| {
            (v > 0.0)
                .then_some(v)
                .ok_or(JsonError::invalid(field, "a positive number"))
        })
        .transpose()
}

/// `json[field]` as a number in `0.0..=1.0`, `None` if absent.
pub fn optional_fraction(
    json: &serde_json::Value,
    field: &'static str,
) -> Result<Option<Float>, JsonError> {
    optional_number(json, field)?
        .map(|v| {
            (0.0..=1.0)
                .contains(&v)
                .then_some(v)
                .ok_or(JsonError::invalid(field, "a number between 0 and 1"))
        })
        .transpose()
}

pub fn required_number(json: &serde_json::Value, field: &'static str) -> Result<Float, JsonError> {
    optional_number(json, field)?.ok_or(JsonError::MissingField(field))
}

/// Deserialize every element of a JSON array with `map`.
pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    field: &'static str,
    map: impl FnMut(&serde_json::Value) -> Result<T, JsonError>,
) -> Result<C, JsonError> {
    json.as_array()
        .ok_or(JsonError::invalid(field, "an array"))?
        .iter()
        .map(map)
        .collect()
}

pub trait JsonSer {
    /// Serialize `self` into a JSON value.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON value.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError>
    where
        Self: Sized;
}

impl JsonSer for Position {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "x": self.x, "y": self.y })
    }
}

impl JsonDes for Position {
    /// ```json
    /// { "x": 1.0, "y": -2.5 }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        Ok(Self::new(required_number(json, "x")?, required_number(json, "y")?))
    }
}

impl JsonSer for RaySegment {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "p1": self.p1.to_json(),
            "p2": self.p2.to_json(),
            "intensity": self.intensity,
        })
    }
}

impl JsonDes for RaySegment {
    /// ```json
    /// { "p1": { "x": 0, "y": 0 }, "p2": { "x": 10, "y": 0 }, "intensity": 1.0 }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        Ok(Self::new(
            Position::from_json(required(json, "p1")?)?,
            Position::from_json(required(json, "p2")?)?,
            required_number(json, "intensity")?,
        ))
    }
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, JsonError> {
        map_json_array(json, "array", T::from_json)
    }
}

/// Serialize the result of tracing `setup`.
///
/// ```json
/// {
///     "segments": [{ "p1": .., "p2": .., "intensity": .. }, ...],
///     "detectorsHit": ["id", ...],
///     "emitters": [{ "id": "id", "color": [255, 0, 0] }, ...]
/// }
/// ```
///
/// An emitter without a wavelength has a `null` colour.
pub fn serialize_trace(setup: &Setup, segments: &[RaySegment]) -> serde_json::Value {
    let detectors: Vec<_> = detectors_hit(&setup.components, segments)
        .into_iter()
        .map(|d| d.id.as_str())
        .collect();

    let emitters: Vec<_> = setup
        .emitters()
        .map(|e| {
            let color = match e.kind {
                ComponentKind::Emitter {
                    wavelength: Some(w),
                    ..
                } => Some(wavelength_to_rgb(w)),
                _ => None,
            };
            serde_json::json!({ "id": e.id, "color": color })
        })
        .collect();

    serde_json::json!({
        "segments": segments.to_json(),
        "detectorsHit": detectors,
        "emitters": emitters,
    })
}

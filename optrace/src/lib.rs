//! Ray propagation through a flat bench of optical components.
//!
//! Emitters fire rays that bounce off mirrors, split on beam splitters, bend
//! through thin lenses and die in detectors. The result of a run is a flat
//! list of [`RaySegment`]s, each carrying the intensity of the ray that drew it.

pub use nalgebra;

mod color;
mod component;
mod detector;
pub mod geometry;
mod intersect;
mod ray;
mod setup;
mod trace;

pub use color::*;
pub use component::*;
pub use detector::*;
pub use geometry::Position;
pub use intersect::*;
pub use ray::*;
pub use setup::*;
pub use trace::*;

pub type Float = f64;

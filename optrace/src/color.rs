use super::*;

/// Approximate display colour of light of the given wavelength, in nanometers.
///
/// Only meaningful over the visible spectrum, `380..=750`: anything outside of
/// it is black. Colours fade out towards both ends of the spectrum.
#[must_use]
pub fn wavelength_to_rgb(wavelength: Float) -> [u8; 3] {
    const GAMMA: Float = 0.8;

    let w = wavelength;

    let (r, g, b) = if (380.0..=439.0).contains(&w) {
        (-(w - 440.0) / (440.0 - 380.0), 0.0, 1.0)
    } else if (440.0..=489.0).contains(&w) {
        (0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490.0..=509.0).contains(&w) {
        (0.0, 1.0, -(w - 510.0) / (510.0 - 490.0))
    } else if (510.0..=579.0).contains(&w) {
        ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580.0..=644.0).contains(&w) {
        (1.0, -(w - 645.0) / (645.0 - 580.0), 0.0)
    } else if (645.0..=750.0).contains(&w) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    };

    let factor = if (380.0..=419.0).contains(&w) {
        0.3 + 0.7 * (w - 380.0) / (420.0 - 380.0)
    } else if (420.0..=700.0).contains(&w) {
        1.0
    } else if (701.0..=750.0).contains(&w) {
        0.3 + 0.7 * (750.0 - w) / (750.0 - 700.0)
    } else {
        0.0
    };

    let adjust = |c: Float| (255.0 * (c * factor).powf(GAMMA)).round() as u8;

    [adjust(r), adjust(g), adjust(b)]
}

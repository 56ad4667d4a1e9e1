use optrace::*;

use core::iter;
pub use rand;

/// Side of the square random components are placed in, with its corner at the origin.
pub const BENCH_SIZE: Float = 50.0;

pub trait Random: Sized {
    /// Generate a random value of this type using the provided `rng`
    ///
    /// This method must not fail.
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

impl Random for ComponentType {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl Random for ComponentKind {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let ty = ComponentType::random(rng);
        random_kind(rng, ty)
    }
}

/// A component of type `ty` with attributes in the ranges the editor allows.
pub fn random_kind(rng: &mut (impl rand::Rng + ?Sized), ty: ComponentType) -> ComponentKind {
    match ty {
        ComponentType::Emitter => ComponentKind::Emitter {
            power: Some(rng.gen_range(1.0..=10.0)),
            wavelength: Some(rng.gen_range(380.0..=750.0)),
        },
        ComponentType::Mirror => ComponentKind::Mirror {
            reflectivity: Some(rng.gen_range(0.5..=1.0)),
        },
        ComponentType::ConvexLens => ComponentKind::ConvexLens {
            focal_length: Some(rng.gen_range(2.0..=20.0)),
        },
        ComponentType::ConcaveLens => ComponentKind::ConcaveLens {
            focal_length: Some(rng.gen_range(2.0..=20.0)),
        },
        ComponentType::Splitter => {
            let reflectivity = rng.gen_range(0.2..=0.8);
            ComponentKind::Splitter {
                reflectivity: Some(reflectivity),
                transmissivity: Some(1.0 - reflectivity),
            }
        }
        ComponentType::Detector => ComponentKind::Detector,
    }
}

pub fn rand_position(rng: &mut (impl rand::Rng + ?Sized), max_coord: Float) -> Position {
    // the rng generates floats in 0.0..1.0, scale the range accordingly
    Position::from_fn(|_, _| rng.gen::<Float>() * max_coord.abs())
}

/// A component of type `ty` somewhere on the bench, named `"<TYPE>-<index>"`.
pub fn random_component(
    rng: &mut (impl rand::Rng + ?Sized),
    ty: ComponentType,
    index: usize,
) -> OpticalComponent {
    let kind = random_kind(rng, ty);
    let position = rand_position(rng, BENCH_SIZE);
    // emitters turned to 0.0 are stored as 360.0
    let rotation = rng.gen_range(0.0..360.0);

    OpticalComponent::new(format!("{ty}-{index}"), kind, position, rotation)
}

/// A bench with `num_emitters` emitters followed by `num_components` other components.
pub fn random_setup(
    rng: &mut (impl rand::Rng + ?Sized),
    num_emitters: usize,
    num_components: usize,
) -> Setup {
    let emitters = iter::repeat(ComponentType::Emitter).take(num_emitters);

    let non_emitters = &ComponentType::ALL[1..];
    let others = iter::repeat_with(|| non_emitters[rng.gen_range(0..non_emitters.len())])
        .take(num_components)
        .collect::<Vec<_>>();

    let components = emitters
        .chain(others)
        .enumerate()
        .map(|(i, ty)| random_component(rng, ty, i))
        .collect();

    Setup::new(components)
}

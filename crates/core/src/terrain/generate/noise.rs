use crate::{
    config::{NoiseFnConfig, NoiseFnType},
    terrain::grid::GridPoint,
    util::range::{NumRange, Rangeable},
};
use noise::{
    BasicMulti, Billow, Fbm, HybridMulti, MultiFractal, NoiseFn, RidgedMulti,
    Seedable,
};
use rand::Rng;
use std::fmt::Debug;

/// Helper trait for the different types of noise functions we use. We need this
/// in order to create trait objects.
trait NoiseFnTrait: Debug + NoiseFn<[f64; 2]> {}

impl<T: Debug + NoiseFn<[f64; 2]>> NoiseFnTrait for T {}

/// A wrapper around a noise function that makes it easy to use for generating
/// lattice values. You pass in a [GridPoint] and get out a value in an
/// arbitrary output range.
///
/// The output type can be any [Rangeable], e.g. [Meter](crate::Meter) for
/// elevations.
#[derive(Debug)]
pub struct TileNoiseFn<T: Rangeable = f64> {
    noise_fn: Box<dyn NoiseFnTrait>,
    config: NoiseFnConfig,
    output_range: NumRange<T>,
}

impl<T: Rangeable> TileNoiseFn<T> {
    /// If we used the raw grid coordinates, our frequencies would have to be
    /// stupid low to get reasonable looking output, so we scale them down by
    /// this factor
    const INPUT_SCALE: f64 = 16.0;
    /// The (nominal) output range of the internal noise function. Multi-fractal
    /// functions can overshoot it a bit, so values get clamped.
    const NOISE_FN_OUTPUT_RANGE: NumRange<f64> = NumRange::new(-1.0, 1.0);

    /// Initialize a new function. The seed is drawn from the given RNG, so
    /// every function created from the same RNG gets a different seed.
    pub fn new(
        rng: &mut impl Rng,
        config: NoiseFnConfig,
        output_range: NumRange<T>,
    ) -> Self {
        let seed = rng.gen();
        Self {
            noise_fn: Self::make_noise_fn(config, seed),
            config,
            output_range,
        }
    }

    /// Get the function output at the given lattice point. The output is
    /// always inside the function's output range.
    pub fn get(&self, point: GridPoint) -> T {
        let scaled_input = [
            point.x as f64 / Self::INPUT_SCALE,
            point.y as f64 / Self::INPUT_SCALE,
        ];
        let raw = Self::NOISE_FN_OUTPUT_RANGE
            .clamp(self.noise_fn.get(scaled_input));
        // The exponent is applied in [0,1] so it bends the curve without
        // leaving the range
        let normal = Self::NOISE_FN_OUTPUT_RANGE.normalize(raw);
        self.output_range.lerp(normal.powf(self.config.exponent))
    }

    /// Since the config contains the function type, we don't know which struct
    /// the function will be at compile time, so we need a trait object.
    fn make_noise_fn(
        config: NoiseFnConfig,
        seed: u32,
    ) -> Box<dyn NoiseFnTrait> {
        // Seedable and MultiFractal can't be turned into trait objects, so
        // the configuration has to be repeated for each concrete type
        macro_rules! configure {
            ($noise_type:ty) => {
                Box::new(
                    <$noise_type>::default()
                        .set_seed(seed)
                        .set_octaves(config.octaves)
                        .set_frequency(config.frequency)
                        .set_lacunarity(config.lacunarity)
                        .set_persistence(config.persistence),
                )
            };
        }

        match config.noise_type {
            NoiseFnType::BasicMulti => configure!(BasicMulti),
            NoiseFnType::Billow => configure!(Billow),
            NoiseFnType::Fbm => configure!(Fbm),
            NoiseFnType::HybridMulti => configure!(HybridMulti),
            NoiseFnType::RidgedMulti => configure!(RidgedMulti),
        }
    }
}

mod seed;

pub use crate::config::seed::Seed;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

/// Configuration that defines a terrain generation process. Two terrains
/// generated with the same config will always be identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
#[serde(default)]
pub struct TerrainConfig {
    /// RNG seed to use for all randomized processes during generation. See
    /// [Seed] for the accepted input formats.
    pub seed: Seed,

    /// Number of tiles along each side of the (square) grid. The height
    /// lattice has one more vertex than this per side, because neighboring
    /// tiles share corners.
    #[validate(range(min = 1, max = 2048))]
    pub size: u16,

    /// Config for how the raw height field is produced
    #[validate]
    pub height: HeightConfig,

    /// Config for the blur pass applied to the height field
    #[validate]
    pub smoothing: SmoothingConfig,

    /// Config for splitting tiles into land and water
    #[validate]
    pub classify: ClassifyConfig,
}

/// Configuration for the height field generator.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HeightConfig {
    /// Which algorithm fills in the height lattice. See [HeightStrategy].
    pub strategy: HeightStrategy,

    /// Config for the noise function. Only used by [HeightStrategy::Noise],
    /// ignored by the others.
    #[validate]
    pub noise: NoiseFnConfig,
}

/// The different ways of producing a height field.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HeightStrategy {
    /// Every lattice vertex gets its own independent uniform sample.
    Uniform,
    /// Walk the grid tile by tile. Each tile inherits the edges it shares
    /// with its already-generated left and upper neighbors, and only samples
    /// the corners that haven't been seen yet.
    CornerShare,
    /// Sample a seeded multi-fractal noise function at every vertex.
    Noise,
}

/// Config for a particular noise generation function. We use
/// https://crates.io/crates/noise for noise generation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NoiseFnConfig {
    pub noise_type: NoiseFnType,

    /// Number of different frequencies to add together.
    #[validate(range(min = 1, max = 32))]
    pub octaves: usize,

    /// The frequency of the first (lowest) octave.
    #[validate(range(min = 0.0))]
    pub frequency: f64,

    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,

    /// Amplitude multiplier between successive octaves. The first amplitude
    /// is always 1.0, e.g. with 3 octaves and a persistence of 0.5 the
    /// amplitudes are `[1.0, 0.5, 0.25]`.
    pub persistence: f64,

    /// Exponent applied to normalized ([0,1]) values after all octaves are
    /// combined. Below 1 biases upward, above 1 biases downward.
    #[validate(range(min = 0.0))]
    pub exponent: f64,
}

/// The supported noise function types. These are all seedable and
/// multi-fractal.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoiseFnType {
    BasicMulti,
    Billow,
    Fbm,
    HybridMulti,
    RidgedMulti,
}

/// Configuration for the smoothing pass.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Number of blur iterations. Each one averages every cell with its
    /// orthogonal neighbors. More iterations trade relief for smoothness.
    /// Zero disables smoothing entirely.
    #[validate(range(max = 1000))]
    pub iterations: u16,
}

/// Configuration for tile classification.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClassifyConfig {
    /// If set, sea level is moved so that roughly this fraction of tiles ends
    /// up as water. The cutoff is found by sorting the highest corner of every
    /// tile and indexing at this fraction. If unset, sea level stays at zero.
    #[validate(range(min = 0.0, max = 1.0))]
    pub water_fraction: Option<f64>,

    /// Clamp the corners of every water tile to sea level, so water renders
    /// as a flat surface.
    pub flatten_water: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: Seed::default(),
            size: 64,
            height: HeightConfig::default(),
            smoothing: SmoothingConfig::default(),
            classify: ClassifyConfig::default(),
        }
    }
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            strategy: HeightStrategy::Uniform,
            noise: NoiseFnConfig::default(),
        }
    }
}

impl Default for NoiseFnConfig {
    fn default() -> Self {
        Self {
            noise_type: NoiseFnType::Fbm,
            octaves: 3,
            frequency: 0.5,
            lacunarity: 3.0,
            persistence: 0.3,
            exponent: 0.9,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { iterations: 4 }
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            water_fraction: None,
            flatten_water: false,
        }
    }
}

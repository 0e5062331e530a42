use calm::{
    ClassifyConfig, HeightConfig, HeightStrategy, RenderConfig,
    SmoothingConfig, TerrainConfig, TileLens,
};
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// The canned terrains the viewer can show. Each one is a fixed config, so
/// the same preset always renders the same mesh.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    EnumIter,
    EnumString,
    EnumVariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum Preset {
    /// Every vertex sampled independently, no smoothing. Very spiky.
    Scatter,
    /// Tiles built one at a time, inheriting the edges they share with
    /// earlier tiles.
    Stitched,
    /// Uniform samples blurred into rolling hills
    Smoothed,
    /// Rolling hills with a percentile sea level and flat water
    #[default]
    Islands,
    /// Multi-fractal noise
    Noise,
}

impl Preset {
    const SEED: u64 = 1_618_033;
    const SIZE: u16 = 96;

    pub fn terrain_config(self) -> TerrainConfig {
        let (strategy, iterations, classify) = match self {
            Self::Scatter => {
                (HeightStrategy::Uniform, 0, ClassifyConfig::default())
            }
            Self::Stitched => {
                (HeightStrategy::CornerShare, 0, ClassifyConfig::default())
            }
            Self::Smoothed => {
                (HeightStrategy::Uniform, 6, ClassifyConfig::default())
            }
            Self::Islands => (
                HeightStrategy::Uniform,
                6,
                ClassifyConfig {
                    water_fraction: Some(0.6),
                    flatten_water: true,
                },
            ),
            Self::Noise => {
                (HeightStrategy::Noise, 1, ClassifyConfig::default())
            }
        };

        TerrainConfig {
            seed: Self::SEED.into(),
            size: Self::SIZE,
            height: HeightConfig {
                strategy,
                ..Default::default()
            },
            smoothing: SmoothingConfig { iterations },
            classify,
        }
    }

    pub fn render_config(self) -> RenderConfig {
        match self {
            // Raw samples are all over the place, squash them a bit
            Self::Scatter | Self::Stitched => RenderConfig {
                vertical_scale: 0.15,
                center_raise: 0.0,
                ..Default::default()
            },
            Self::Noise => RenderConfig {
                tile_lens: TileLens::Elevation,
                ..Default::default()
            },
            Self::Smoothed | Self::Islands => RenderConfig::default(),
        }
    }
}

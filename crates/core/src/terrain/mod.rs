mod generate;
pub mod grid;
pub mod tile;

pub use crate::terrain::generate::{
    percentile_cutoff, percentile_index, share_corners, smooth,
    smooth_iterations,
};
use crate::{
    terrain::{
        generate::TerrainBuilder,
        grid::{GridPoint, HeightGrid},
        tile::{Tile, TileCategory},
    },
    timed,
    util::{range::NumRange, unit::Meter},
    TerrainConfig,
};
#[cfg(any(feature = "bin", feature = "json"))]
use anyhow::bail;
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A fully generated terrain. Contains the height lattice, the finished
/// tiles, and the config that was used to generate all of it.
///
/// ## Serialization
/// Terrains can be serialized and deserialized through two formats: JSON and
/// binary.
///
/// ### JSON Format
/// All fields and values use snake casing. Tiles are stored as an array in
/// row-major order, and the lattice as a flat row-major array of elevations.
///
/// ### Binary Format
/// Terrains can be saved in a binary format via [Terrain::to_bin] and reloaded
/// via [Terrain::from_bin]. Currently the binary format is
/// [CBOR](https://cbor.io/), but that is subject to change so beware of that
/// if you write other programs that load the format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    /// The config used to generate this terrain. Generation is deterministic
    /// based on config, and once the terrain has been generated, the config
    /// can never change.
    config: TerrainConfig,

    /// Final sea level. This is [Terrain::DEFAULT_SEA_LEVEL] unless the
    /// config asked for a water fraction.
    sea_level: Meter,

    /// Elevation of every tile corner, after smoothing and flattening
    heights: HeightGrid,

    /// Every tile in the grid, row-major
    tiles: Vec<Tile>,
}

impl Terrain {
    /// The range of possible elevation values. We guarantee that every corner
    /// elevation will be in this range (inclusive on both ends).
    pub const ELEVATION_RANGE: NumRange<Meter> =
        NumRange::new(Meter(-10.0), Meter(10.0));
    /// Sea level used when no water fraction is configured
    pub const DEFAULT_SEA_LEVEL: Meter = Meter(0.0);

    /// Generate a new terrain with the given config. Returns an error if the
    /// given config is invalid. Panics only in the case of internal bugs in
    /// the generation algorithm.
    pub fn generate(config: TerrainConfig) -> anyhow::Result<Self> {
        info!("Generating terrain with config {:#?}", config);

        config.validate().context("invalid config")?;

        let (heights, sea_level, tiles) = timed!(
            "Terrain generation",
            log::Level::Info,
            TerrainBuilder::new(config.clone()).generate_terrain()
        )?;

        Ok(Self {
            config,
            sea_level,
            heights,
            tiles,
        })
    }

    /// Get a reference to the config that defines this terrain.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Elevation that separates land from water. Every water tile has all of
    /// its corners at or below this.
    pub fn sea_level(&self) -> Meter {
        self.sea_level
    }

    /// The shared height lattice that all tile corners are read from
    pub fn heights(&self) -> &HeightGrid {
        &self.heights
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get the tile at a position, or `None` if it's outside the grid
    pub fn tile(&self, position: GridPoint) -> Option<&Tile> {
        let size = self.config.size as usize;
        if position.x < size && position.y < size {
            self.tiles.get(position.y * size + position.x)
        } else {
            None
        }
    }

    /// Get the owned tile list for this terrain
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    /// Number of tiles with the given category
    pub fn count(&self, category: TileCategory) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.category() == category)
            .count()
    }

    /// Deserialize a terrain from JSON. A terrain can be serialized into JSON
    /// with [Terrain::to_json]. Will fail if the input is malformed or
    /// describes an inconsistent terrain (see [Terrain::from_bin]).
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let terrain: Self =
            serde_json::from_str(json).context("error deserializing terrain")?;
        terrain.check_loaded().context("inconsistent terrain")?;
        Ok(terrain)
    }

    /// Deserialize a terrain from binary format. See the struct-level
    /// [Terrain] documentation for a description of the binary format.
    ///
    /// Fails if the input is malformed, or if it doesn't hold together as a
    /// terrain: the config must be valid, the lattice and tile list must be
    /// sized for it, and every tile must match the lattice and sea level.
    #[cfg(feature = "bin")]
    pub fn from_bin(read: impl std::io::Read) -> anyhow::Result<Self> {
        let terrain: Self = serde_cbor::from_reader(read)
            .context("error deserializing terrain")?;
        terrain.check_loaded().context("inconsistent terrain")?;
        Ok(terrain)
    }

    /// Everything [Terrain::generate] guarantees, re-checked on a terrain
    /// that came from outside
    #[cfg(any(feature = "bin", feature = "json"))]
    fn check_loaded(&self) -> anyhow::Result<()> {
        self.config.validate().context("invalid config")?;

        use crate::util::{grid_len, lattice_width};

        let size = self.config.size;
        let width = lattice_width(size);
        if self.heights.width() != width
            || self.heights.values().len() != width * width
        {
            bail!(
                "lattice has {} values over width {}, \
                expected {}x{} for size {}",
                self.heights.values().len(),
                self.heights.width(),
                width,
                width,
                size
            );
        }
        for elevation in self.heights.values() {
            Self::ELEVATION_RANGE.ensure_contains(*elevation)?;
        }

        if self.tiles.len() != grid_len(size) {
            bail!(
                "expected {} tiles for size {}, got {}",
                grid_len(size),
                size,
                self.tiles.len()
            );
        }
        for (position, tile) in self.heights.tile_points().zip(&self.tiles) {
            if tile.position() != position {
                bail!("tile {} is stored at {}", tile.position(), position);
            }
            if *tile.corners() != self.heights.tile_corners(position)? {
                bail!("tile {} doesn't match the lattice", position);
            }
            let category =
                TileCategory::classify(tile.corners(), self.sea_level);
            if tile.category() != category {
                bail!(
                    "tile {} is {} but its corners make it {}",
                    position,
                    tile.category(),
                    category
                );
            }
        }
        Ok(())
    }

    /// Serializes this terrain into JSON. This is a recoverable format, which
    /// can be loaded back with [Terrain::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing terrain")
    }

    /// Serializes this terrain into a binary format, which can be loaded back
    /// with [Terrain::from_bin].
    #[cfg(feature = "bin")]
    pub fn to_bin(&self) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        serde_cbor::to_writer(&mut buffer, self)
            .context("error serializing terrain")?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassifyConfig, HeightStrategy, Seed};

    #[cfg(feature = "json")]
    fn islands(seed: u64) -> Terrain {
        Terrain::generate(TerrainConfig {
            seed: Seed::Int(seed),
            size: 16,
            classify: ClassifyConfig {
                water_fraction: Some(0.5),
                flatten_water: true,
            },
            ..Default::default()
        })
        .unwrap()
    }

    fn config(strategy: HeightStrategy) -> TerrainConfig {
        let mut config = TerrainConfig {
            seed: Seed::Int(1234),
            size: 10,
            ..Default::default()
        };
        config.height.strategy = strategy;
        config
    }

    #[test]
    fn test_tile_lookup() {
        let terrain =
            Terrain::generate(config(HeightStrategy::Uniform)).unwrap();
        assert_eq!(terrain.tiles().len(), 100);
        let tile = terrain.tile(GridPoint::new(3, 7)).unwrap();
        assert_eq!(tile.position(), GridPoint::new(3, 7));
        assert!(terrain.tile(GridPoint::new(10, 0)).is_none());
        assert_eq!(
            terrain.count(TileCategory::Land)
                + terrain.count(TileCategory::Water),
            100
        );
    }

    #[test]
    fn test_sea_level_default() {
        let terrain =
            Terrain::generate(config(HeightStrategy::Noise)).unwrap();
        assert_eq!(terrain.sea_level(), Terrain::DEFAULT_SEA_LEVEL);
    }

    #[test]
    fn test_water_fraction_moves_sea_level() {
        let mut config = config(HeightStrategy::Uniform);
        config.smoothing.iterations = 0;
        config.classify = ClassifyConfig {
            water_fraction: Some(0.5),
            flatten_water: false,
        };
        let terrain = Terrain::generate(config).unwrap();

        // Every tile whose highest corner is at or below the cutoff is water,
        // which is at least half of them
        let water = terrain.count(TileCategory::Water);
        assert!(water >= 50, "only {} water tiles", water);
        for tile in terrain.tiles() {
            assert_eq!(
                tile.is_water(),
                tile.corners().max() <= terrain.sea_level()
            );
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = TerrainConfig {
            size: 0,
            ..Default::default()
        };
        assert!(Terrain::generate(config).is_err());
    }

    #[test]
    #[cfg(feature = "json")]
    fn test_json_round_trip() {
        // Every height has to come back bit-for-bit, not just approximately
        for seed in 0..10 {
            let terrain = islands(seed);
            let json = terrain.to_json().unwrap();
            assert_eq!(Terrain::from_json(&json).unwrap(), terrain);
        }
    }

    #[test]
    #[cfg(feature = "bin")]
    fn test_bin_round_trip() {
        let terrain = Terrain::generate(config(HeightStrategy::Noise)).unwrap();
        let bytes = terrain.to_bin().unwrap();
        assert_eq!(Terrain::from_bin(bytes.as_slice()).unwrap(), terrain);
        assert!(Terrain::from_bin(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    #[cfg(feature = "json")]
    fn test_load_rejects_inconsistent() {
        let terrain = islands(3);
        let good: serde_json::Value =
            serde_json::from_str(&terrain.to_json().unwrap()).unwrap();
        let load_with = |edit: &dyn Fn(&mut serde_json::Value)| {
            let mut value = good.clone();
            edit(&mut value);
            Terrain::from_json(&value.to_string())
        };

        assert!(load_with(&|_| {}).is_ok());
        // Config no longer matches the lattice
        assert!(load_with(&|v| v["config"]["size"] = 15.into()).is_err());
        // Config itself is invalid
        assert!(load_with(&|v| v["config"]["size"] = 0.into()).is_err());
        // Missing a tile
        assert!(load_with(&|v| {
            v["tiles"].as_array_mut().unwrap().pop();
        })
        .is_err());
        // Lattice value out of range
        assert!(load_with(&|v| v["heights"]["cells"][0] = 50.0.into())
            .is_err());
        // Sea level that contradicts the stored categories
        assert!(load_with(&|v| v["sea_level"] = 20.0.into()).is_err());
    }
}

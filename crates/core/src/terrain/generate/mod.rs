mod classify;
mod height;
mod noise;
mod smooth;

pub use classify::{percentile_cutoff, percentile_index};
pub use height::share_corners;
pub use smooth::{smooth, smooth_iterations};

use crate::{
    terrain::{
        generate::{
            classify::ClassifyGenerator, height::HeightGenerator,
            smooth::SmoothGenerator,
        },
        grid::{GridPoint, HeightGrid},
        tile::{Tile, TileCategory},
        Terrain,
    },
    timed, util, Meter, TerrainConfig,
};
use anyhow::{anyhow, Context};
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::fmt::Debug;

/// A container for generating a new terrain. This applies a series of
/// generators in sequence to fill in the height lattice and the tile data.
/// These fields are public to allow for disjoint borrowing of multiple fields
/// at once.
pub struct TerrainBuilder {
    /// This config deterministically controls generation, meaning two
    /// terrains with the same config will always be identical (provided they
    /// were generated on the same version of the code).
    ///
    /// This is public to allow for disjoint borrowing, but please **do not
    /// mutate the config**.
    pub config: TerrainConfig,

    /// RNG provider. Every random draw during generation comes from here.
    pub rng: Pcg64,

    /// Elevation of every tile corner. Starts out flat at sea level, and the
    /// generators overwrite it.
    pub heights: HeightGrid,

    /// Sea level that classification compares against. Starts at
    /// [Terrain::DEFAULT_SEA_LEVEL] and may be moved by the classifier.
    pub sea_level: Meter,

    /// One builder per tile, row-major. Tiles can never be added, removed or
    /// moved during generation.
    pub tiles: Vec<TileBuilder>,
}

impl TerrainBuilder {
    pub fn new(config: TerrainConfig) -> Self {
        let heights = HeightGrid::new(config.size, Terrain::DEFAULT_SEA_LEVEL);
        let tiles: Vec<TileBuilder> =
            heights.tile_points().map(TileBuilder::new).collect();
        debug_assert_eq!(tiles.len(), util::grid_len(config.size));

        info!(
            "Initialized {}x{} grid with {} tiles",
            config.size,
            config.size,
            tiles.len()
        );
        Self {
            rng: Pcg64::seed_from_u64(config.seed.to_u64()),
            config,
            heights,
            sea_level: Terrain::DEFAULT_SEA_LEVEL,
            tiles,
        }
    }

    /// Run every generation step in order. Must be run from a blank slate.
    /// Outputs the final lattice, sea level and tiles.
    pub fn generate_terrain(
        mut self,
    ) -> anyhow::Result<(HeightGrid, Meter, Vec<Tile>)> {
        // The order here is very important!
        self.apply_generator(HeightGenerator)?;
        self.apply_generator(SmoothGenerator)?;
        self.apply_generator(ClassifyGenerator)?;

        let heights = self.heights;
        let tiles = self
            .tiles
            .into_iter()
            .map(|tile| tile.build(&heights))
            .collect::<anyhow::Result<Vec<Tile>>>()?;
        Ok((heights, self.sea_level, tiles))
    }

    /// A helper to run a generation step on this builder.
    fn apply_generator(
        &mut self,
        generator: impl Debug + Generate,
    ) -> anyhow::Result<()> {
        timed!(&format!("{:?}", generator), generator.generate(self))
            .with_context(|| format!("error in {:?}", generator))
    }
}

/// A type that generates some sort of data for the terrain. Generators are
/// chained together, where each one reads what the previous ones produced
/// and adds or rewrites some data.
trait Generate {
    /// Apply some generation step. This can mutate the lattice and the tiles,
    /// but never the grid dimensions. Any error returned from here indicates
    /// a bug in the generator rather than bad input, since the config has
    /// already been validated.
    fn generate(&self, terrain: &mut TerrainBuilder) -> anyhow::Result<()>;
}

/// A partially built [Tile]. Only the category is tracked here, because the
/// corners are read from the lattice when the tile is finalized (the
/// lattice can change after classification, e.g. water flattening).
#[derive(Clone, Debug)]
pub struct TileBuilder {
    position: GridPoint,
    category: Option<TileCategory>,
}

impl TileBuilder {
    pub fn new(position: GridPoint) -> Self {
        Self {
            position,
            category: None,
        }
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// See [Tile::category]. Returns an error if the category is unset.
    pub fn category(&self) -> anyhow::Result<TileCategory> {
        self.category.ok_or_else(|| {
            anyhow!("category not initialized for {}", self.position)
        })
    }

    pub fn set_category(&mut self, category: TileCategory) {
        self.category = Some(category);
    }

    /// Finalize this builder to create a [Tile]. Returns an error if the
    /// category is unset or the lattice doesn't cover this tile.
    pub fn build(self, heights: &HeightGrid) -> anyhow::Result<Tile> {
        let corners = heights.tile_corners(self.position)?;
        for elevation in corners.as_array() {
            Terrain::ELEVATION_RANGE.ensure_contains(elevation)?;
        }
        Ok(Tile {
            position: self.position,
            category: self.category()?,
            corners,
        })
    }
}

//! Calm is a tile-based terrain generation system. This crate contains all the
//! core logic: building a height field, smoothing it, splitting tiles into
//! land and water, and emitting a triangle mesh. Presentation layers (the 3D
//! viewer and the CLI) are implemented elsewhere.
//!
//! ```
//! use calm::{RenderConfig, Terrain, TerrainConfig, TerrainRenderer};
//!
//! let config = TerrainConfig::default();
//! let terrain = Terrain::generate(config).unwrap();
//! let renderer = TerrainRenderer::new(RenderConfig::default()).unwrap();
//! let mesh = renderer.build_mesh(&terrain);
//! println!("{} vertices", mesh.vertices().len());
//! // From here you can display/use the mesh however you like.
//! ```
//!
//! See [TerrainConfig] for details on how generation can be customized.

mod config;
mod render;
mod terrain;
mod util;

pub use crate::{
    config::{
        ClassifyConfig, HeightConfig, HeightStrategy, NoiseFnConfig,
        NoiseFnType, Seed, SmoothingConfig, TerrainConfig,
    },
    render::{
        config::RenderConfig,
        mesh::{Aabb, MeshBuffer, MeshVertex},
        unit::Color3,
        TerrainRenderer, TileLens,
    },
    terrain::{
        grid::{Corner, GridPoint, HeightGrid, TileCorners},
        percentile_cutoff, percentile_index, share_corners, smooth,
        smooth_iterations,
        tile::{Tile, TileCategory},
        Terrain,
    },
    util::{
        range::{NumRange, Rangeable},
        unit::Meter,
    },
};

pub mod config;
pub mod mesh;
#[cfg(feature = "stl")]
pub mod stl;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

use crate::{
    render::{config::RenderConfig, mesh::MeshBuffer, unit::Color3},
    GridPoint, Meter, Terrain, Tile, TileCategory,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

/// A terrain renderer is used to convert terrains into various visual output
/// formats. A renderer is created using a particular [RenderConfig], and from
/// there can be used to render any number of terrains any number of times.
///
/// Aside from providing complete rendering, a renderer also provides utility
/// functions that make it easy to generate your own renderings based on a
/// terrain.
///
/// Config options cannot be changed after creating a renderer, but renderers
/// are very cheap to create so if you need to change the config, just create
/// a new renderer.
///
/// ## Supported Formats
/// - Triangle mesh (3D with vertex colors, see [MeshBuffer])
/// - STL (3D, no colors or textures)
/// - SVG (2D with colors)
#[derive(Clone, Debug)]
pub struct TerrainRenderer {
    /// Config that determines how rendering is done
    ///
    /// **This is different from the terrain config.** The terrain config
    /// controls how the terrain is generated, the render config just controls
    /// how it's visually presented _after_ generation.
    render_config: RenderConfig,
}

impl TerrainRenderer {
    /// Color of every land tile under [TileLens::Category]
    pub const LAND_COLOR: Color3 = Color3::from_rgb8(59, 143, 55);
    /// Color of every water tile under [TileLens::Category]
    pub const WATER_COLOR: Color3 = Color3::from_rgb8(20, 77, 163);
    /// Top of the land gradient under [TileLens::Elevation]
    pub const PEAK_COLOR: Color3 = Color3::from_rgb8(240, 240, 232);

    /// Initialize a new renderer with the given options. Returns an error if
    /// the render config is invalid.
    pub fn new(render_config: RenderConfig) -> anyhow::Result<Self> {
        render_config.validate()?;
        Ok(Self { render_config })
    }

    /// Get a reference to the config that this renderer uses
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Get the position of a lattice vertex on the horizontal plane, as
    /// `(x, z)`. For a tile position this is the tile's minimum (north-west)
    /// corner.
    pub fn tile_origin(&self, position: GridPoint) -> (f64, f64) {
        let tile_size = self.render_config.tile_size;
        (position.x as f64 * tile_size, position.y as f64 * tile_size)
    }

    /// Convert an elevation to an absolute height in 3D rendering
    /// coordinates. Sea level always renders at zero, and distance from it
    /// is multiplied by [RenderConfig::vertical_scale].
    pub fn elevation_to_height(
        &self,
        elevation: Meter,
        sea_level: Meter,
    ) -> f64 {
        (elevation - sea_level).0 * self.render_config.vertical_scale
    }

    /// Compute the color of a tile based on current render settings. The tile
    /// lens in the render config controls what data the color is derived from.
    pub fn tile_color(&self, tile: &Tile) -> Color3 {
        match self.render_config.tile_lens {
            TileLens::Category => self.category_color(tile.category()),
            TileLens::Elevation => {
                if tile.is_water() {
                    Self::WATER_COLOR
                } else {
                    let t = Terrain::ELEVATION_RANGE
                        .normalize(tile.elevation());
                    Self::LAND_COLOR.lerp(Self::PEAK_COLOR, t as f32)
                }
            }
        }
    }

    /// Map a tile category to its preset color.
    pub fn category_color(&self, category: TileCategory) -> Color3 {
        match category {
            TileCategory::Land => Self::LAND_COLOR,
            TileCategory::Water => Self::WATER_COLOR,
        }
    }

    /// Emit the terrain as a single triangle mesh. See [MeshBuffer] for the
    /// layout.
    pub fn build_mesh(&self, terrain: &Terrain) -> MeshBuffer {
        crate::timed!("Mesh emission", mesh::terrain_to_mesh(terrain, self))
    }

    /// Render this terrain as a 2D SVG, from a top-down perspective. Returns
    /// the SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self, terrain: &Terrain) -> String {
        let svg = svg::terrain_to_svg(terrain, self);
        svg.to_string()
    }

    /// Render this terrain into an STL model. Return value is the STL binary
    /// data. See [MeshBuffer::to_stl] if you already have the mesh.
    #[cfg(feature = "stl")]
    pub fn render_as_stl(
        &self,
        terrain: &Terrain,
    ) -> anyhow::Result<Vec<u8>> {
        self.build_mesh(terrain).to_stl()
    }
}

/// A definition of what data is used to compute a tile's color.
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
pub enum TileLens {
    /// Color is based solely on the tile's category. Land and water each
    /// have a static color.
    Category,
    /// Land is a gradient based on elevation, water keeps its static color.
    Elevation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::grid::TileCorners;

    fn renderer(tile_lens: TileLens) -> TerrainRenderer {
        TerrainRenderer::new(RenderConfig {
            tile_lens,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_invalid_config() {
        let config = RenderConfig {
            tile_size: 0.0,
            ..Default::default()
        };
        assert!(TerrainRenderer::new(config).is_err());
    }

    #[test]
    fn test_elevation_to_height() {
        let renderer = TerrainRenderer::new(RenderConfig {
            vertical_scale: 2.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(renderer.elevation_to_height(Meter(3.0), Meter(0.0)), 6.0);
        assert_eq!(renderer.elevation_to_height(Meter(3.0), Meter(1.0)), 4.0);
        assert_eq!(renderer.elevation_to_height(Meter(1.0), Meter(1.0)), 0.0);
    }

    #[test]
    fn test_tile_color() {
        let water = Tile::new(
            GridPoint::ORIGIN,
            TileCorners::default(),
            TileCategory::Water,
        );
        let peak = Meter(10.0);
        let land = Tile::new(
            GridPoint::new(1, 0),
            TileCorners::new(peak, peak, peak, peak),
            TileCategory::Land,
        );

        let category = renderer(TileLens::Category);
        assert_eq!(category.tile_color(&water), TerrainRenderer::WATER_COLOR);
        assert_eq!(category.tile_color(&land), TerrainRenderer::LAND_COLOR);

        let elevation = renderer(TileLens::Elevation);
        assert_eq!(elevation.tile_color(&water), TerrainRenderer::WATER_COLOR);
        assert_eq!(elevation.tile_color(&land), TerrainRenderer::PEAK_COLOR);

        // Lowest possible land is the plain land color
        let floor = Meter(-10.0);
        let lowland = Tile::new(
            GridPoint::new(2, 0),
            TileCorners::new(floor, floor, floor, floor),
            TileCategory::Land,
        );
        assert_eq!(
            elevation.tile_color(&lowland),
            TerrainRenderer::LAND_COLOR
        );
    }

    #[test]
    fn test_tile_origin() {
        let renderer = TerrainRenderer::new(RenderConfig {
            tile_size: 2.5,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(renderer.tile_origin(GridPoint::new(2, 4)), (5.0, 10.0));
    }
}

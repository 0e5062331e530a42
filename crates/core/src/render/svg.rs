use crate::{render::TerrainRenderer, Terrain, Tile};
use svg::{
    node::{element::Rectangle, Comment},
    Document,
};

/// Render a terrain as an SVG. This will be a 2D top-down rendering, one
/// square per tile, colored according to the renderer's tile lens.
pub fn terrain_to_svg(
    terrain: &Terrain,
    renderer: &TerrainRenderer,
) -> Document {
    // The grid starts at the origin and grows toward +x/+y, so the view box
    // is just the grid's footprint
    let side =
        terrain.config().size as f64 * renderer.render_config().tile_size;

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, side, side))
        .set("shape-rendering", "crispEdges")
        .add(Comment::new(format!("\n{:#?}\n", terrain.config())));

    for tile in terrain.tiles() {
        document = document.add(draw_tile(renderer, tile));
    }

    document
}

/// Generate an SVG square for a single tile
fn draw_tile(renderer: &TerrainRenderer, tile: &Tile) -> Rectangle {
    let (x, y) = renderer.tile_origin(tile.position());
    let tile_size = renderer.render_config().tile_size;
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", tile_size)
        .set("height", tile_size)
        .set("fill", renderer.tile_color(tile).to_html())
}

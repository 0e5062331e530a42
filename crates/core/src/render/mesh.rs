//! Triangle mesh emission. Every tile becomes a four-sided pyramid: one
//! triangle per tile edge, all meeting at a vertex over the tile's center.
//! Vertices are never shared between triangles, so each triangle carries its
//! own flat normal and the index buffer is just `0..n`.

use crate::{
    render::{unit::Color3, TerrainRenderer},
    terrain::grid::Corner,
    Terrain, Tile,
};
use nalgebra::{Point3, Vector3};
use strum::IntoEnumIterator;

/// A single mesh vertex, with every attribute the viewer uploads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshVertex {
    /// `[x, y, z]` with Y up. X follows the grid's X axis and Z follows the
    /// grid's Y axis.
    pub position: [f32; 3],
    /// Unit normal of the triangle this vertex belongs to
    pub normal: [f32; 3],
    /// Opaque RGBA
    pub color: [f32; 4],
    /// Texture coordinate within the tile
    pub uv: [f32; 2],
}

/// Axis-aligned bounding box of a mesh
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Size along each axis
    pub fn extents(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// An owned, engine-agnostic triangle list. Built once from a terrain, then
/// handed off to whatever displays or exports it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl MeshBuffer {
    /// Four triangles per tile, three vertices each
    pub const VERTICES_PER_TILE: usize = 12;
    /// UV for each corner, in [Corner] order
    const CORNER_UVS: [[f32; 2]; 4] =
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    const CENTER_UV: [f32; 2] = [0.5, 0.5];

    pub fn with_tile_capacity(tiles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(tiles * Self::VERTICES_PER_TILE),
            indices: Vec::with_capacity(tiles * Self::VERTICES_PER_TILE),
        }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterate over every triangle's vertices, in winding order
    pub fn triangles(&self) -> impl Iterator<Item = &[MeshVertex]> {
        self.vertices.chunks_exact(3)
    }

    /// Positions as a flat attribute array
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn normals(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.normal).collect()
    }

    pub fn colors(&self) -> Vec<[f32; 4]> {
        self.vertices.iter().map(|v| v.color).collect()
    }

    pub fn uvs(&self) -> Vec<[f32; 2]> {
        self.vertices.iter().map(|v| v.uv).collect()
    }

    /// Get the smallest box that holds every vertex. Returns `None` for an
    /// empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = self.vertices.first()?.position;
        let (min, max) = self.vertices.iter().fold(
            (first, first),
            |(mut min, mut max), vertex| {
                for axis in 0..3 {
                    min[axis] = min[axis].min(vertex.position[axis]);
                    max[axis] = max[axis].max(vertex.position[axis]);
                }
                (min, max)
            },
        );
        Some(Aabb { min, max })
    }

    /// Append one tile's pyramid. `corners` are in [Corner] order. Each
    /// triangle is `[corner_k, center, corner_k+1]`, which is
    /// counter-clockwise when viewed from above.
    fn push_tile(
        &mut self,
        corners: [Point3<f64>; 4],
        center: Point3<f64>,
        color: Color3,
    ) {
        let color = color.to_rgba();
        for k in 0..4 {
            let next = (k + 1) % 4;
            let triangle = [
                (corners[k], Self::CORNER_UVS[k]),
                (center, Self::CENTER_UV),
                (corners[next], Self::CORNER_UVS[next]),
            ];
            let normal = face_normal(corners[k], center, corners[next]);
            for (position, uv) in triangle {
                self.indices.push(self.vertices.len() as u32);
                self.vertices.push(MeshVertex {
                    position: [
                        position.x as f32,
                        position.y as f32,
                        position.z as f32,
                    ],
                    normal,
                    color,
                    uv,
                });
            }
        }
    }
}

/// Unit normal of a triangle under the right-hand rule
fn face_normal(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> [f32; 3] {
    let normal: Vector3<f64> = (b - a).cross(&(c - a));
    let normal = normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::y);
    [normal.x as f32, normal.y as f32, normal.z as f32]
}

/// Emit the whole terrain as one mesh, tiles in row-major order.
pub fn terrain_to_mesh(
    terrain: &Terrain,
    renderer: &TerrainRenderer,
) -> MeshBuffer {
    let tiles = terrain.tiles();
    let mut mesh = MeshBuffer::with_tile_capacity(tiles.len());
    for tile in tiles {
        let (corners, center) = tile_points(terrain, renderer, tile);
        mesh.push_tile(corners, center, renderer.tile_color(tile));
    }
    mesh
}

/// Compute the 3D corner and center points of a tile
fn tile_points(
    terrain: &Terrain,
    renderer: &TerrainRenderer,
    tile: &Tile,
) -> ([Point3<f64>; 4], Point3<f64>) {
    let tile_size = renderer.render_config().tile_size;
    let sea_level = terrain.sea_level();
    let position = tile.position();

    let mut corners = [Point3::origin(); 4];
    for (i, corner) in Corner::iter().enumerate() {
        let (x, z) = renderer.tile_origin(position.corner(corner));
        let elevation = tile.corners().get(corner);
        let y = renderer.elevation_to_height(elevation, sea_level);
        corners[i] = Point3::new(x, y, z);
    }

    let raise = if tile.is_water() {
        0.0
    } else {
        renderer.render_config().center_raise
    };
    let (x, z) = renderer.tile_origin(position);
    let center = Point3::new(
        x + tile_size / 2.0,
        renderer.elevation_to_height(tile.elevation(), sea_level) + raise,
        z + tile_size / 2.0,
    );

    (corners, center)
}

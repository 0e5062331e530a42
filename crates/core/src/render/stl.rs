//! This module provides logic for rendering a terrain as an STL. Only
//! available with the "stl" feature enabled.

use crate::render::mesh::MeshBuffer;
use anyhow::Context;
use stl_io::{Normal, Triangle, Vertex};

impl MeshBuffer {
    /// Encode this mesh as a binary STL
    pub fn to_stl(&self) -> anyhow::Result<Vec<u8>> {
        let triangles = mesh_to_stl(self);
        let mut buffer = Vec::<u8>::new();
        stl_io::write_stl(&mut buffer, triangles.iter())
            .context("error serializing STL")?;
        Ok(buffer)
    }
}

/// Convert an emitted mesh into STL triangles. STL only carries geometric
/// data, so colors and UVs are dropped. There's no dominant convention around
/// which axis should be up in an STL, so here we consider the **Y axis to be
/// up and down** to be consistent with the viewer.
pub fn mesh_to_stl(mesh: &MeshBuffer) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(mesh.triangle_count());

    // Mesh vertices are already counter-clockwise when looking at the visible
    // side, which is the right-hand rule STL expects
    for triangle in mesh.triangles() {
        triangles.push(Triangle {
            normal: Normal::new(triangle[0].normal),
            vertices: [
                Vertex::new(triangle[0].position),
                Vertex::new(triangle[1].position),
                Vertex::new(triangle[2].position),
            ],
        });
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Seed, Terrain, TerrainConfig, TerrainRenderer};

    #[test]
    fn test_stl_triangles() {
        let terrain = Terrain::generate(TerrainConfig {
            seed: Seed::Int(5),
            size: 4,
            ..Default::default()
        })
        .unwrap();
        let renderer = TerrainRenderer::new(Default::default()).unwrap();
        let mesh = renderer.build_mesh(&terrain);
        let triangles = mesh_to_stl(&mesh);
        assert_eq!(triangles.len(), 16 * 4);

        let bytes = renderer.render_as_stl(&terrain).unwrap();
        // 80 byte header, 4 byte count, 50 bytes per triangle
        assert_eq!(bytes.len(), 84 + 50 * triangles.len());
        assert_eq!(mesh.to_stl().unwrap(), bytes);
    }
}

use crate::{
    config::HeightStrategy,
    terrain::{
        generate::{noise::TileNoiseFn, Generate, TerrainBuilder},
        grid::{Corner, HeightGrid, TileCorners},
        Terrain,
    },
    util, Meter,
};
use log::debug;
use rand::Rng;
use strum::IntoEnumIterator;

/// Fill the height lattice according to the configured [HeightStrategy].
#[derive(Debug)]
pub struct HeightGenerator;

impl Generate for HeightGenerator {
    fn generate(&self, terrain: &mut TerrainBuilder) -> anyhow::Result<()> {
        let size = terrain.config.size;
        let strategy = terrain.config.height.strategy;
        debug!("Generating heights with strategy {}", strategy);

        terrain.heights = match strategy {
            HeightStrategy::Uniform => HeightGrid::from_fn(size, |_| {
                sample_elevation(&mut terrain.rng)
            }),
            HeightStrategy::CornerShare => {
                let tiles = share_corners(size, &mut terrain.rng);
                HeightGrid::from_tile_corners(size, &tiles)?
            }
            HeightStrategy::Noise => {
                let noise_fn: TileNoiseFn<Meter> = TileNoiseFn::new(
                    &mut terrain.rng,
                    terrain.config.height.noise,
                    Terrain::ELEVATION_RANGE,
                );
                HeightGrid::from_fn(size, |point| noise_fn.get(point))
            }
        };

        Ok(())
    }
}

/// Draw a single elevation uniformly from [Terrain::ELEVATION_RANGE]
fn sample_elevation(rng: &mut impl Rng) -> Meter {
    Terrain::ELEVATION_RANGE.sample(rng)
}

/// Generate the corners of every tile, one tile at a time in row-major order.
/// A tile copies its west edge from the tile to its left and its north edge
/// from the tile above it, so the only corners that get sampled are the ones
/// no earlier tile has produced. That makes adjacent tiles agree on their
/// shared edges without any stitching afterwards.
///
/// Returns one corner set per tile, row-major.
pub fn share_corners(size: u16, rng: &mut impl Rng) -> Vec<TileCorners> {
    let size = size as usize;
    let mut tiles: Vec<TileCorners> =
        Vec::with_capacity(util::grid_len(size as u16));

    for y in 0..size {
        for x in 0..size {
            let left = x.checked_sub(1).map(|left_x| tiles[y * size + left_x]);
            let up = y.checked_sub(1).map(|up_y| tiles[up_y * size + x]);

            let mut corners = TileCorners::default();
            for corner in Corner::iter() {
                // Inherit from the left neighbor first, then the upper one.
                // For the NW corner both are available and both agree.
                let inherited = match corner {
                    Corner::Nw => left
                        .map(|t| t.get(Corner::Ne))
                        .or_else(|| up.map(|t| t.get(Corner::Sw))),
                    Corner::Ne => up.map(|t| t.get(Corner::Se)),
                    Corner::Sw => left.map(|t| t.get(Corner::Se)),
                    Corner::Se => None,
                };
                let elevation = match inherited {
                    Some(elevation) => elevation,
                    None => sample_elevation(rng),
                };
                corners.set(corner, elevation);
            }
            tiles.push(corners);
        }
    }

    debug!(
        "Shared corners across {} tiles ({} samples drawn)",
        tiles.len(),
        util::lattice_width(size as u16).pow(2)
    );
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::grid::GridPoint;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_share_corners_continuous() {
        let size = 12;
        let tiles = share_corners(size as u16, &mut Pcg64::seed_from_u64(42));
        assert_eq!(tiles.len(), size * size);

        for y in 0..size {
            for x in 0..size {
                let tile = tiles[y * size + x];
                if x + 1 < size {
                    let right = tiles[y * size + x + 1];
                    assert_eq!(tile.get(Corner::Ne), right.get(Corner::Nw));
                    assert_eq!(tile.get(Corner::Se), right.get(Corner::Sw));
                }
                if y + 1 < size {
                    let down = tiles[(y + 1) * size + x];
                    assert_eq!(tile.get(Corner::Sw), down.get(Corner::Nw));
                    assert_eq!(tile.get(Corner::Se), down.get(Corner::Ne));
                }
            }
        }
    }

    #[test]
    fn test_share_corners_in_range() {
        let tiles = share_corners(8, &mut Pcg64::seed_from_u64(7));
        for corners in tiles {
            for elevation in corners.as_array() {
                assert!(Terrain::ELEVATION_RANGE.contains(elevation));
            }
        }
    }

    #[test]
    fn test_share_corners_samples_every_vertex_once() {
        // Every vertex is drawn exactly once, so the draw count matches
        // sampling the lattice directly
        let size = 5u16;
        let mut rng = Pcg64::seed_from_u64(3);
        share_corners(size, &mut rng);
        let after_share: f64 = rng.gen();

        let mut rng = Pcg64::seed_from_u64(3);
        for _ in 0..util::lattice_width(size).pow(2) {
            sample_elevation(&mut rng);
        }
        let after_direct: f64 = rng.gen();
        assert_eq!(after_share, after_direct);
    }

    #[test]
    fn test_share_corners_folds_into_lattice() {
        let tiles = share_corners(6, &mut Pcg64::seed_from_u64(11));
        let grid = HeightGrid::from_tile_corners(6, &tiles).unwrap();
        for (i, corners) in tiles.iter().enumerate() {
            let point = GridPoint::new(i % 6, i / 6);
            assert_eq!(&grid.tile_corners(point).unwrap(), corners);
        }
    }
}

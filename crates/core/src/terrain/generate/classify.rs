use crate::{
    terrain::{
        generate::{Generate, TerrainBuilder},
        grid::{Corner, TileCorners},
        tile::TileCategory,
    },
    Meter,
};
use anyhow::Context;
use log::{debug, info};
use strum::IntoEnumIterator;

/// Pick a sea level, split every tile into land or water against it, and
/// optionally flatten the water.
#[derive(Debug)]
pub struct ClassifyGenerator;

impl Generate for ClassifyGenerator {
    fn generate(&self, terrain: &mut TerrainBuilder) -> anyhow::Result<()> {
        let config = terrain.config.classify;
        let corners: Vec<TileCorners> = terrain
            .tiles
            .iter()
            .map(|tile| terrain.heights.tile_corners(tile.position()))
            .collect::<anyhow::Result<_>>()?;

        if let Some(fraction) = config.water_fraction {
            let mut maxima: Vec<Meter> =
                corners.iter().map(TileCorners::max).collect();
            maxima.sort_by(|a, b| a.0.total_cmp(&b.0));
            terrain.sea_level = percentile_cutoff(&maxima, fraction)
                .context("cannot take a percentile of zero tiles")?;
            debug!(
                "Water fraction {} puts sea level at {}",
                fraction, terrain.sea_level
            );
        }

        let sea_level = terrain.sea_level;
        let mut water_count = 0;
        for (tile, corners) in terrain.tiles.iter_mut().zip(&corners) {
            let category = TileCategory::classify(corners, sea_level);
            if category == TileCategory::Water {
                water_count += 1;
            }
            tile.set_category(category);
        }
        info!(
            "Classified {} water tiles and {} land tiles",
            water_count,
            terrain.tiles.len() - water_count
        );

        if config.flatten_water {
            for tile in &terrain.tiles {
                if tile.category()? == TileCategory::Water {
                    for corner in Corner::iter() {
                        let vertex = tile.position().corner(corner);
                        let elevation = &mut terrain.heights[vertex];
                        *elevation = elevation.max(sea_level);
                    }
                }
            }
            debug!("Flattened {} water tiles to {}", water_count, sea_level);
        }

        Ok(())
    }
}

/// Index into a sorted array of `len` values at the given fraction. The
/// result is `floor(fraction * len)`, clamped to the last valid index so that
/// a fraction of 1.0 still lands inside the array. Returns 0 for an empty
/// array.
pub fn percentile_index(len: usize, fraction: f64) -> usize {
    let index = (fraction * len as f64).floor() as usize;
    index.min(len.saturating_sub(1))
}

/// Get the value at the given fraction of an **already sorted** slice. See
/// [percentile_index] for how the index is picked. Returns `None` if the slice
/// is empty.
pub fn percentile_cutoff(sorted: &[Meter], fraction: f64) -> Option<Meter> {
    sorted.get(percentile_index(sorted.len(), fraction)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_index() {
        assert_eq!(percentile_index(10, 0.0), 0);
        assert_eq!(percentile_index(10, 0.25), 2);
        assert_eq!(percentile_index(10, 0.5), 5);
        assert_eq!(percentile_index(10, 0.99), 9);
        // Clamped to the last index
        assert_eq!(percentile_index(10, 1.0), 9);
        assert_eq!(percentile_index(1, 0.7), 0);
        assert_eq!(percentile_index(0, 0.5), 0);
    }

    #[test]
    fn test_percentile_cutoff() {
        let sorted: Vec<Meter> =
            [-4.0, -1.0, 0.5, 2.0, 3.5].iter().copied().map(Meter).collect();
        assert_eq!(percentile_cutoff(&sorted, 0.0), Some(Meter(-4.0)));
        assert_eq!(percentile_cutoff(&sorted, 0.5), Some(Meter(0.5)));
        assert_eq!(percentile_cutoff(&sorted, 1.0), Some(Meter(3.5)));
        assert_eq!(percentile_cutoff(&[], 0.5), None);
    }

    #[test]
    fn test_percentile_cutoff_stable() {
        let sorted: Vec<Meter> =
            (0..100).map(|i| Meter(i as f64 * 0.1 - 5.0)).collect();
        let first = percentile_cutoff(&sorted, 0.37);
        for _ in 0..10 {
            assert_eq!(percentile_cutoff(&sorted, 0.37), first);
        }
    }
}

use crate::terrain::{
    generate::{Generate, TerrainBuilder},
    grid::HeightGrid,
};
use log::debug;

/// Blur the height lattice a configurable number of times. See [smooth].
#[derive(Debug)]
pub struct SmoothGenerator;

impl Generate for SmoothGenerator {
    fn generate(&self, terrain: &mut TerrainBuilder) -> anyhow::Result<()> {
        let iterations = terrain.config.smoothing.iterations;
        let before = terrain.heights.variance();
        terrain.heights = smooth_iterations(&terrain.heights, iterations);
        debug!(
            "Smoothed heights {} times (variance {:.3} -> {:.3})",
            iterations,
            before,
            terrain.heights.variance()
        );
        Ok(())
    }
}

/// Run one smoothing pass. Every vertex becomes the mean of itself and its
/// in-bounds orthogonal neighbors, so interior vertices average 5 values,
/// edges 4 and corners 3. All reads come from the input and all writes go to
/// a new lattice, so the result doesn't depend on visiting order.
pub fn smooth(grid: &HeightGrid) -> HeightGrid {
    let mut output = grid.clone();
    for point in grid.points() {
        let (sum, count) = grid
            .neighbors(point)
            .map(|neighbor| grid[neighbor])
            .fold((grid[point], 1usize), |(sum, count), elevation| {
                (sum + elevation, count + 1)
            });
        output[point] = sum / count as f64;
    }
    output
}

/// Run [smooth] `iterations` times, feeding each output into the next pass.
/// Zero iterations returns an unchanged copy.
pub fn smooth_iterations(grid: &HeightGrid, iterations: u16) -> HeightGrid {
    let mut output = grid.clone();
    for _ in 0..iterations {
        output = smooth(&output);
    }
    output
}

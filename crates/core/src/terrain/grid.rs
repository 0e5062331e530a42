//! Grid coordinates and the height lattice.
//!
//! A terrain with `size` tiles per side has a lattice of `(size+1)²` height
//! samples. Tile `(x, y)` owns the lattice square whose minimum corner is
//! vertex `(x, y)`, so tiles that touch always read the same samples along
//! their shared edge.

use crate::{util, Meter, NumRange};
use anyhow::{anyhow, bail};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::{EnumIter, IntoEnumIterator};

/// A 2D integer coordinate. Depending on context this refers to either a
/// lattice vertex (`0..=size` on each axis) or a tile (`0..size`). X grows to
/// the east, Y grows to the south.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct GridPoint {
    pub x: usize,
    pub y: usize,
}

impl GridPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Get the lattice vertex at the given corner of the tile at this point
    pub fn corner(self, corner: Corner) -> Self {
        let (dx, dy) = corner.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One of the four corners of a tile. Iteration order (see [Corner::iter]) is
/// clockwise when viewed from above, starting at the minimum corner. This is
/// the order used everywhere corners are stored or emitted.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash, EnumIter)]
pub enum Corner {
    /// `(x, y)`
    Nw,
    /// `(x+1, y)`
    Ne,
    /// `(x+1, y+1)`
    Se,
    /// `(x, y+1)`
    Sw,
}

impl Corner {
    /// Lattice offset of this corner from the tile's own point
    pub fn offset(self) -> (usize, usize) {
        match self {
            Self::Nw => (0, 0),
            Self::Ne => (1, 0),
            Self::Se => (1, 1),
            Self::Sw => (0, 1),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Nw => 0,
            Self::Ne => 1,
            Self::Se => 2,
            Self::Sw => 3,
        }
    }
}

/// The four corner elevations of a single tile, stored in [Corner] order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileCorners([Meter; 4]);

impl TileCorners {
    pub const fn new(nw: Meter, ne: Meter, se: Meter, sw: Meter) -> Self {
        Self([nw, ne, se, sw])
    }

    pub fn get(&self, corner: Corner) -> Meter {
        self.0[corner.index()]
    }

    pub fn set(&mut self, corner: Corner, elevation: Meter) {
        self.0[corner.index()] = elevation;
    }

    /// All four elevations, in [Corner] order
    pub fn as_array(&self) -> [Meter; 4] {
        self.0
    }

    /// Highest of the four corners
    pub fn max(&self) -> Meter {
        self.0.iter().copied().fold(self.0[0], Meter::max)
    }

    /// Lowest of the four corners
    pub fn min(&self) -> Meter {
        self.0.iter().copied().fold(self.0[0], Meter::min)
    }

    /// Average of the four corners
    pub fn mean(&self) -> Meter {
        self.0.iter().copied().sum::<Meter>() / 4.0
    }
}

/// A square lattice of elevation samples, stored row-major. The dimensions
/// are fixed at creation, only the values can change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightGrid {
    /// Number of vertices per side
    width: usize,
    cells: Vec<Meter>,
}

impl HeightGrid {
    /// Create a flat lattice for a grid with `size` tiles per side. Every
    /// vertex starts at the given elevation.
    pub fn new(size: u16, elevation: Meter) -> Self {
        let width = util::lattice_width(size);
        Self {
            width,
            cells: vec![elevation; width * width],
        }
    }

    /// Create a lattice for a grid with `size` tiles per side, using the given
    /// function to produce each vertex. Vertices are visited row by row.
    pub fn from_fn(size: u16, mut f: impl FnMut(GridPoint) -> Meter) -> Self {
        let width = util::lattice_width(size);
        let cells = (0..width)
            .flat_map(|y| (0..width).map(move |x| GridPoint::new(x, y)))
            .map(|point| f(point))
            .collect();
        Self { width, cells }
    }

    /// Fold a complete set of per-tile corners into a lattice. The corners
    /// must be given row-major, one entry per tile. Returns an error if two
    /// tiles disagree on a vertex they share, or if the corner count doesn't
    /// match the grid size.
    pub fn from_tile_corners(
        size: u16,
        tiles: &[TileCorners],
    ) -> anyhow::Result<Self> {
        let tile_count = util::grid_len(size);
        if tiles.len() != tile_count {
            bail!(
                "expected {} tile corner sets, got {}",
                tile_count,
                tiles.len()
            );
        }

        let mut grid = Self::new(size, Meter(0.0));
        let mut written = vec![false; grid.cells.len()];
        for (i, corners) in tiles.iter().enumerate() {
            let tile_pos = GridPoint::new(i % size as usize, i / size as usize);
            for corner in Corner::iter() {
                let vertex = tile_pos.corner(corner);
                let index = grid.index_of(vertex);
                let elevation = corners.get(corner);
                if written[index] {
                    if grid.cells[index] != elevation {
                        bail!(
                            "tile {} disagrees with its neighbor at vertex {}: \
                            {} vs {}",
                            tile_pos,
                            vertex,
                            elevation,
                            grid.cells[index]
                        );
                    }
                } else {
                    grid.cells[index] = elevation;
                    written[index] = true;
                }
            }
        }

        Ok(grid)
    }

    /// Number of vertices along each side
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of tiles along each side
    pub fn tiles_per_side(&self) -> usize {
        self.width - 1
    }

    /// All values, row-major
    pub fn values(&self) -> &[Meter] {
        &self.cells
    }

    /// Get the elevation at a vertex, or `None` if it's outside the lattice
    pub fn get(&self, point: GridPoint) -> Option<Meter> {
        self.contains(point).then(|| self.cells[self.index_of(point)])
    }

    /// Is the given vertex inside the lattice?
    pub fn contains(&self, point: GridPoint) -> bool {
        point.x < self.width && point.y < self.width
    }

    /// Iterate over every vertex in the lattice, row by row
    pub fn points(&self) -> impl Iterator<Item = GridPoint> {
        let width = self.width;
        (0..width)
            .flat_map(move |y| (0..width).map(move |x| GridPoint::new(x, y)))
    }

    /// Iterate over every tile position that this lattice covers, row by row
    pub fn tile_points(&self) -> impl Iterator<Item = GridPoint> {
        let tiles = self.tiles_per_side();
        (0..tiles)
            .flat_map(move |y| (0..tiles).map(move |x| GridPoint::new(x, y)))
    }

    /// Get the in-bounds orthogonal neighbors of a vertex. Interior vertices
    /// have 4, edge vertices 3, and corner vertices 2.
    pub fn neighbors(
        &self,
        point: GridPoint,
    ) -> impl Iterator<Item = GridPoint> + '_ {
        let GridPoint { x, y } = point;
        [
            y.checked_sub(1).map(|y| GridPoint::new(x, y)),
            Some(GridPoint::new(x + 1, y)),
            Some(GridPoint::new(x, y + 1)),
            x.checked_sub(1).map(|x| GridPoint::new(x, y)),
        ]
        .into_iter()
        .flatten()
        .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Read the four corners of the tile at the given tile position. Returns
    /// an error if the tile isn't covered by this lattice.
    pub fn tile_corners(&self, tile: GridPoint) -> anyhow::Result<TileCorners> {
        let mut corners = TileCorners::default();
        for corner in Corner::iter() {
            let vertex = tile.corner(corner);
            let elevation = self.get(vertex).ok_or_else(|| {
                anyhow!(
                    "tile {} is outside the {}-wide lattice",
                    tile,
                    self.width
                )
            })?;
            corners.set(corner, elevation);
        }
        Ok(corners)
    }

    /// The lowest and highest values in the lattice
    pub fn range(&self) -> NumRange<Meter> {
        let first = self.cells[0];
        let (min, max) = self
            .cells
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        NumRange::new(min, max)
    }

    /// Population variance of all values in the lattice
    pub fn variance(&self) -> f64 {
        let count = self.cells.len() as f64;
        let mean = self.cells.iter().map(|v| v.0).sum::<f64>() / count;
        self.cells.iter().map(|v| (v.0 - mean).powi(2)).sum::<f64>() / count
    }

    fn index_of(&self, point: GridPoint) -> usize {
        point.y * self.width + point.x
    }
}

impl Index<GridPoint> for HeightGrid {
    type Output = Meter;

    /// Panics if the point is out of bounds. Use [HeightGrid::get] for
    /// checked access.
    fn index(&self, point: GridPoint) -> &Meter {
        assert!(
            self.contains(point),
            "{} is outside the {}-wide lattice",
            point,
            self.width
        );
        &self.cells[self.index_of(point)]
    }
}

impl IndexMut<GridPoint> for HeightGrid {
    fn index_mut(&mut self, point: GridPoint) -> &mut Meter {
        assert!(
            self.contains(point),
            "{} is outside the {}-wide lattice",
            point,
            self.width
        );
        let index = self.index_of(point);
        &mut self.cells[index]
    }
}

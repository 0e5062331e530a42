use crate::{
    terrain::grid::{GridPoint, TileCorners},
    Meter,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A terrain is made up of square tiles. Each tile is bounded by four corner
/// elevations, which it shares with its neighbors, and is rendered as a
/// four-sided pyramid whose apex sits over the tile's center.
///
/// Tiles can't be constructed directly, they can only be made by the
/// generation process. See [Terrain::generate](crate::Terrain::generate).
/// They also can't be modified after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    // These fields are all pub(super) so they can be accessed by the builder
    /// The location of this tile in the grid. Every tile has a unique
    /// position.
    pub(super) position: GridPoint,

    /// Elevation at each of the tile's corners, read from the shared lattice
    /// after every generation step has run.
    pub(super) corners: TileCorners,

    /// Land or water. See [TileCategory].
    pub(super) category: TileCategory,
}

impl Tile {
    #[cfg(test)]
    pub(crate) fn new(
        position: GridPoint,
        corners: TileCorners,
        category: TileCategory,
    ) -> Self {
        Self {
            position,
            corners,
            category,
        }
    }

    /// The location of this tile in the grid
    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// Elevation at each corner of this tile
    pub fn corners(&self) -> &TileCorners {
        &self.corners
    }

    /// The representative elevation of this tile, i.e. the average of its four
    /// corners.
    pub fn elevation(&self) -> Meter {
        self.corners.mean()
    }

    pub fn category(&self) -> TileCategory {
        self.category
    }

    pub fn is_water(&self) -> bool {
        self.category == TileCategory::Water
    }
}

/// High-level classification of a tile.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TileCategory {
    /// At least one corner pokes above sea level
    Land,
    /// Every corner is at or below sea level
    Water,
}

impl TileCategory {
    /// Classify a tile from its corners. A tile is land if **any** corner is
    /// strictly above sea level, otherwise it's water. This is a pure
    /// function of its inputs.
    pub fn classify(corners: &TileCorners, sea_level: Meter) -> Self {
        if corners.as_array().iter().any(|elev| *elev > sea_level) {
            Self::Land
        } else {
            Self::Water
        }
    }
}

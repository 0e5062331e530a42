use crate::TileLens;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration specific to visually rendering a terrain. These options have
/// absolutely no bearing on terrain _generation_, only on the visual
/// presentation. In other words, if you generate a terrain then output to a
/// non-visual format (e.g. JSON or binary), these options will **never**
/// affect that output.
///
/// Not all render options apply to all render output formats, e.g.
/// `vertical_scale` is irrelevant for 2D rendering like SVG. The documentation
/// for each field will list which formats it applies to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
#[serde(default)]
pub struct RenderConfig {
    /// Length of one side of a tile, in rendered units.
    ///
    /// ## Relevant Formats
    /// - Mesh/STL
    /// - SVG
    #[validate(range(min = 0.001))]
    pub tile_size: f64,

    /// The vertical scale factor applied to every elevation. With a scale of
    /// 1.0, one meter of elevation is one rendered unit, i.e. the same
    /// distance as one side of a tile with a `tile_size` of 1.0. This impacts
    /// the _presentation_ of each tile's elevation, but **does not factor
    /// into** the underlying elevation value.
    ///
    /// ## Relevant Formats
    /// - Mesh/STL
    #[validate(range(min = 0.001))]
    pub vertical_scale: f64,

    /// How far the center vertex of a land tile sits above the mean of its
    /// corners, in rendered units. Water tiles always have a flat center.
    ///
    /// ## Relevant Formats
    /// - Mesh/STL
    #[validate(range(min = 0.0))]
    pub center_raise: f64,

    /// A tile lens controls what information is used to determine the
    /// color of each tile. See [TileLens].
    ///
    /// ## Relevant Formats
    /// - Mesh
    /// - SVG
    pub tile_lens: TileLens,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: 1.0,
            vertical_scale: 0.5,
            center_raise: 0.25,
            tile_lens: TileLens::Category,
        }
    }
}

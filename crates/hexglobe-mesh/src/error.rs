//! Error types for tile construction and geometry generation.

use hexglobe_tiling::TilingError;

use crate::tile::TileId;

/// Errors raised by [`Tile`](crate::Tile) construction, height handling, and ring operators.
///
/// These all indicate a bug in the caller or in the tiling input; none of them is retryable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TileError {
    /// The boundary polygon is neither a pentagon nor a hexagon.
    #[error("invalid tile geometry: expected 5 or 6 boundary points, got {0}")]
    InvalidBoundary(usize),

    /// A geometry method ran before the terrain pass assigned a height.
    #[error("height of tile {0} read before it was set")]
    HeightNotSet(TileId),

    /// The height was already assigned once.
    #[error("height of tile {0} is already set")]
    HeightAlreadySet(TileId),

    /// Heights are radial multipliers and must be positive and finite.
    #[error("tile height must be positive and finite, got {0}")]
    InvalidHeight(f32),

    /// Resize ratios must be strictly positive.
    #[error("boundary resize ratio must be greater than zero, got {0}")]
    InvalidResizeRatio(f32),

    /// Side walls can only join rings with the same number of points.
    #[error("ring {index} has {len} points, expected {expected}")]
    RingLengthMismatch {
        index: usize,
        len: usize,
        expected: usize,
    },
}

/// Errors raised while building a [`Polyhedron`](crate::Polyhedron).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolyhedronError {
    /// The tiling parameters were rejected.
    #[error(transparent)]
    Tiling(#[from] TilingError),

    /// A raw tile could not be wrapped.
    #[error("raw tile {index}: {source}")]
    Tile {
        index: usize,
        #[source]
        source: TileError,
    },

    /// More tiles than the id space can address.
    #[error("too many tiles for the id space: {0}")]
    TooManyTiles(usize),
}

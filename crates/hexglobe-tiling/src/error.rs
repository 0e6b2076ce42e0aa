//! Tiling error types.

/// Errors returned when the tiling parameters cannot produce a valid sphere tiling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TilingError {
    /// The subdivision frequency must lie in `1..=MAX_SUBDIVISIONS`.
    #[error("subdivision frequency must be in 1..={max}, got {0}", max = crate::MAX_SUBDIVISIONS)]
    InvalidSubdivisions(u32),

    /// The sphere radius must be positive and finite.
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// The tile width must lie in `(0, 1]`.
    #[error("tile width must be in (0, 1], got {0}")]
    InvalidTileWidth(f32),
}

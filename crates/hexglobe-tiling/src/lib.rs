//! Geodesic sphere tiling: frequency-n icosahedron subdivision and its pentagon/hexagon dual.

mod error;
mod geodesic;
mod icosahedron;
mod tiling;

pub use error::TilingError;
pub use geodesic::GeodesicMesh;
pub use tiling::{MAX_SUBDIVISIONS, RawTile, build_tiling, tile_count};

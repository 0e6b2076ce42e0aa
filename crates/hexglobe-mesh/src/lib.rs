//! Tile mesh construction for Goldberg-polyhedron globes: boundary winding, inset and beveled
//! rings, extruded columns, caps, and tagged hit-test proxies.

pub mod boundary;
pub mod error;
pub mod geometry;
pub mod polyhedron;
pub mod rings;
pub mod tile;

pub use boundary::{DEFAULT_BEVEL_RATIO, bevel, order_boundary, radial_offset, resize_toward_center};
pub use error::{PolyhedronError, TileError};
pub use geometry::{AttributeArrays, GeometryBuffer, MAX_FLOAT_EXACT_TAG, NO_TILE};
pub use hit_test::{HoverTracker, HoverTransition, Intersection, Ray};
pub use polyhedron::Polyhedron;
pub use rings::{FanWinding, fan_close, side_walls, triangle_winds_outward};
pub use tile::{Tile, TileId, TileKind};

//! Terrain policy for hexglobe: noise-driven tile heights, terrain classification, and
//! assembly of per-material geometry buckets.

mod globe;
mod sampler;
mod terrain_type;

pub use globe::{CapMode, Globe, GlobeParams, GlobeStats, MergedGlobe, TerrainBuckets, TerrainError};
pub use sampler::{TerrainSample, TerrainSampler};
pub use terrain_type::{Material, TerrainType};

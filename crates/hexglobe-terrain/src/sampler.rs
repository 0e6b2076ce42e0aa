//! Per-tile terrain height sampling from 3D simplex noise.

use glam::Vec3;
use noise::{NoiseFn, Simplex};

use crate::terrain_type::TerrainType;

/// Per-axis scale applied to a tile center before sampling noise. Stretching the axes unevenly
/// elongates continents along `y`.
const SAMPLE_SCALE: [f64; 3] = [3.0, 1.5, 2.0];

/// Radial extrusion added on top of the unit sphere for the highest terrain.
const MAX_EXTRUSION: f32 = 0.3;

/// Height and category derived for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    /// Normalized terrain height in `[0, 1]`.
    pub terrain_height: f32,
    /// Radial extrusion factor for the tile (`1 + terrain_height · 0.3`).
    pub height: f32,
    pub terrain: TerrainType,
}

/// Seeded terrain sampler. Identical seeds produce identical globes.
pub struct TerrainSampler {
    noise: Simplex,
    seed: u32,
}

impl TerrainSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw noise at a point, clamped to `[-1, 1]`.
    pub fn noise3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Sample the terrain for a tile centered at `center`.
    ///
    /// Noise in `[-1, 1]` maps linearly onto `[1, 0]` and is cubed, which keeps most of the
    /// globe low and leaves few tall peaks.
    pub fn sample(&self, center: Vec3) -> TerrainSample {
        let n = self.noise3d(
            f64::from(center.x) * SAMPLE_SCALE[0],
            f64::from(center.y) * SAMPLE_SCALE[1],
            f64::from(center.z) * SAMPLE_SCALE[2],
        );
        let linear = map_linear(n, -1.0, 1.0, 1.0, 0.0) as f32;
        let terrain_height = linear.powi(3).clamp(0.0, 1.0);

        TerrainSample {
            terrain_height,
            height: 1.0 + terrain_height * MAX_EXTRUSION,
            terrain: TerrainType::classify(terrain_height),
        }
    }
}

/// Linearly map `x` from `[a1, a2]` onto `[b1, b2]`.
fn map_linear(x: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

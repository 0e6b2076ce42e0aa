//! Globe assembly: samples terrain for every tile and buckets the resulting geometry by
//! material.

use std::ops::Index;

use hexglobe_mesh::{GeometryBuffer, Polyhedron, PolyhedronError, TileError, TileId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::sampler::TerrainSampler;
use crate::terrain_type::TerrainType;

/// Errors raised while assembling a globe.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error(transparent)]
    Polyhedron(#[from] PolyhedronError),

    #[error(transparent)]
    Tile(#[from] TileError),

    /// The separate-cap probability must lie in `[0, 1]`.
    #[error("separate cap chance must be in [0, 1], got {0}")]
    InvalidCapChance(f64),
}

/// Parameters for one globe.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeParams {
    /// Segments per icosahedron edge.
    pub subdivisions: u32,
    /// Noise seed.
    pub seed: u32,
    /// Probability that a rock tile gets a separate raised cap instead of an integrated one.
    pub separate_cap_chance: f64,
}

impl Default for GlobeParams {
    fn default() -> Self {
        Self {
            subdivisions: 25,
            seed: 0,
            separate_cap_chance: 0.5,
        }
    }
}

/// How a tile's cap was generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapMode {
    /// Cap stacked into the column buffer.
    InColumn,
    /// Column without a cap plus a standalone raised cap.
    Separate,
}

/// Geometry lists keyed by terrain type.
#[derive(Clone, Debug, Default)]
pub struct TerrainBuckets {
    buckets: [Vec<GeometryBuffer>; 7],
}

impl TerrainBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, terrain: TerrainType, geometry: GeometryBuffer) {
        self.buckets[terrain.index()].push(geometry);
    }

    pub fn get(&self, terrain: TerrainType) -> &[GeometryBuffer] {
        &self.buckets[terrain.index()]
    }

    /// Buckets in [`TerrainType::ALL`] order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (TerrainType, &[GeometryBuffer])> {
        TerrainType::ALL
            .into_iter()
            .map(|t| (t, self.buckets[t.index()].as_slice()))
    }

    /// Total number of buffers across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One merged mesh per non-empty bucket.
    pub fn merged(&self) -> Vec<(TerrainType, GeometryBuffer)> {
        self.iter()
            .filter_map(|(t, parts)| GeometryBuffer::merge(parts).map(|mesh| (t, mesh)))
            .collect()
    }
}

impl Index<TerrainType> for TerrainBuckets {
    type Output = [GeometryBuffer];

    fn index(&self, terrain: TerrainType) -> &Self::Output {
        self.get(terrain)
    }
}

/// Merged render meshes and the merged hit-test mesh of a globe.
#[derive(Clone, Debug)]
pub struct MergedGlobe {
    pub columns: Vec<(TerrainType, GeometryBuffer)>,
    pub caps: Vec<(TerrainType, GeometryBuffer)>,
    pub hit_test: Option<GeometryBuffer>,
}

/// Summary counts for logging and reporting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlobeStats {
    pub subdivisions: u32,
    pub seed: u32,
    pub tiles: usize,
    pub separate_caps: usize,
    pub terrain_counts: Vec<(TerrainType, usize)>,
    pub column_vertices: usize,
    pub cap_vertices: usize,
    pub hit_test_vertices: usize,
}

/// A generated globe: the sized polyhedron plus its bucketed geometry.
#[derive(Clone, Debug)]
pub struct Globe {
    polyhedron: Polyhedron,
    terrain: Vec<TerrainType>,
    cap_modes: Vec<CapMode>,
    params: GlobeParams,
    /// Column geometry per terrain type.
    pub columns: TerrainBuckets,
    /// Separate cap geometry per terrain type.
    pub caps: TerrainBuckets,
    /// One hit-test proxy per tile, in tile order.
    pub hit_test: Vec<GeometryBuffer>,
}

impl Globe {
    /// Generate a globe, drawing cap-mode decisions from a ChaCha8 RNG seeded with the noise
    /// seed.
    ///
    /// # Errors
    ///
    /// See [`Globe::generate`].
    pub fn generate_seeded(params: &GlobeParams) -> Result<Self, TerrainError> {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(params.seed));
        Self::generate(params, &mut rng)
    }

    /// Generate a globe in a single pass over the tiles.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError`] for an out-of-range cap chance or rejected tiling parameters.
    pub fn generate<R: Rng>(params: &GlobeParams, rng: &mut R) -> Result<Self, TerrainError> {
        if !(0.0..=1.0).contains(&params.separate_cap_chance) {
            return Err(TerrainError::InvalidCapChance(params.separate_cap_chance));
        }

        let mut polyhedron = Polyhedron::new(params.subdivisions)?;
        let sampler = TerrainSampler::new(params.seed);

        let mut terrain = Vec::with_capacity(polyhedron.len());
        let mut cap_modes = Vec::with_capacity(polyhedron.len());
        let mut columns = TerrainBuckets::new();
        let mut caps = TerrainBuckets::new();
        let mut hit_test = Vec::with_capacity(polyhedron.len());

        for tile in polyhedron.tiles_mut() {
            let sample = sampler.sample(tile.center());
            tile.set_height(sample.height)?;

            let mode = if sample.terrain.allows_separate_cap()
                && rng.random::<f64>() < params.separate_cap_chance
            {
                CapMode::Separate
            } else {
                CapMode::InColumn
            };

            columns.push(
                sample.terrain,
                tile.create_column(mode == CapMode::InColumn)?,
            );
            if mode == CapMode::Separate {
                caps.push(sample.terrain, tile.create_cap()?);
            }
            hit_test.push(tile.create_hit_test_geometry()?);

            terrain.push(sample.terrain);
            cap_modes.push(mode);
        }

        let globe = Self {
            polyhedron,
            terrain,
            cap_modes,
            params: params.clone(),
            columns,
            caps,
            hit_test,
        };

        for (t, parts) in globe.columns.iter() {
            debug!(terrain = t.name(), columns = parts.len(), caps = globe.caps[t].len(), "bucket");
        }
        info!(
            subdivisions = params.subdivisions,
            seed = params.seed,
            tiles = globe.polyhedron.len(),
            separate_caps = globe.caps.len(),
            "generated globe"
        );

        Ok(globe)
    }

    pub fn polyhedron(&self) -> &Polyhedron {
        &self.polyhedron
    }

    pub fn params(&self) -> &GlobeParams {
        &self.params
    }

    /// Terrain type assigned to a tile.
    pub fn terrain_of(&self, id: TileId) -> Option<TerrainType> {
        self.terrain.get(id.index()).copied()
    }

    /// Cap mode chosen for a tile.
    pub fn cap_mode_of(&self, id: TileId) -> Option<CapMode> {
        self.cap_modes.get(id.index()).copied()
    }

    pub fn merged_hit_test(&self) -> Option<GeometryBuffer> {
        GeometryBuffer::merge(&self.hit_test)
    }

    /// Merge every non-empty bucket and the hit-test list.
    pub fn merged_meshes(&self) -> MergedGlobe {
        MergedGlobe {
            columns: self.columns.merged(),
            caps: self.caps.merged(),
            hit_test: self.merged_hit_test(),
        }
    }

    pub fn stats(&self) -> GlobeStats {
        let vertices = |buckets: &TerrainBuckets| -> usize {
            buckets
                .iter()
                .flat_map(|(_, parts)| parts)
                .map(GeometryBuffer::vertex_count)
                .sum()
        };

        GlobeStats {
            subdivisions: self.params.subdivisions,
            seed: self.params.seed,
            tiles: self.polyhedron.len(),
            separate_caps: self.caps.len(),
            terrain_counts: TerrainType::ALL
                .into_iter()
                .map(|t| (t, self.columns[t].len()))
                .collect(),
            column_vertices: vertices(&self.columns),
            cap_vertices: vertices(&self.caps),
            hit_test_vertices: self.hit_test.iter().map(GeometryBuffer::vertex_count).sum(),
        }
    }
}

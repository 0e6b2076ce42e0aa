//! Triangle-soup geometry buffers with a per-vertex tile tag.

use glam::Vec3;
use tracing::warn;

/// Tag value meaning "no tile". Tile ids are never zero.
pub const NO_TILE: u32 = 0;

/// Largest tag that survives the `f32` tile-id attribute exactly (2^24).
///
/// Above it neighbouring ids round to the same float, so globes whose tile count exceeds it
/// (subdivisions of 1296 and up) cannot be picked through the float attribute.
pub const MAX_FLOAT_EXACT_TAG: u32 = 1 << 24;

/// Triangle soup with one tile tag per vertex.
///
/// Every three consecutive positions form a triangle, counter-clockwise when seen from the side
/// the face is visible from. `tile_tags[i]` belongs to `positions[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryBuffer {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Tile id of the owning tile, or [`NO_TILE`].
    pub tile_tags: Vec<u32>,
}

/// Flat `f32` attribute arrays ready for upload.
///
/// Positions and normals take 3 floats per vertex. The tile tag is repeated 3 times per vertex
/// so every attribute shares an item size of 3.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeArrays {
    pub positions: Vec<f32>,
    /// Flat-shading normals from [`GeometryBuffer::compute_flat_normals`].
    pub normals: Vec<f32>,
    pub tile_ids: Vec<f32>,
}

impl GeometryBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            tile_tags: Vec::with_capacity(vertices),
        }
    }

    /// Appends vertices that all carry the same tag.
    pub fn push_tagged(&mut self, vertices: &[Vec3], tag: u32) {
        self.positions.extend_from_slice(vertices);
        self.tile_tags
            .extend(std::iter::repeat_n(tag, vertices.len()));
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let start = index.checked_mul(3)?;
        match self.positions.get(start..start.checked_add(3)?)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Concatenate buffers into one.
    ///
    /// Returns `None` for an empty list: an empty bucket yields no mesh at all.
    pub fn merge(parts: &[GeometryBuffer]) -> Option<GeometryBuffer> {
        if parts.is_empty() {
            return None;
        }

        let total = parts.iter().map(GeometryBuffer::vertex_count).sum();
        let mut merged = GeometryBuffer::with_capacity(total);
        for part in parts {
            merged.positions.extend_from_slice(&part.positions);
            merged.tile_tags.extend_from_slice(&part.tile_tags);
        }
        Some(merged)
    }

    /// Per-vertex normals for flat shading: every vertex gets its triangle's unit normal.
    ///
    /// Degenerate triangles get a zero normal.
    pub fn compute_flat_normals(&self) -> Vec<Vec3> {
        let mut normals = Vec::with_capacity(self.positions.len());
        for tri in self.positions.chunks_exact(3) {
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
            normals.extend_from_slice(&[normal; 3]);
        }
        normals
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty buffer.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Sphere around the bounding box center enclosing every vertex, as `(center, radius)`.
    pub fn bounding_sphere(&self) -> Option<(Vec3, f32)> {
        let (min, max) = self.bounding_box()?;
        let center = (min + max) * 0.5;
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max)
            .sqrt();
        Some((center, radius))
    }

    /// Flatten into `f32` attribute arrays.
    ///
    /// Tags are only exact up to [`MAX_FLOAT_EXACT_TAG`]; larger ones are converted anyway and
    /// logged as a warning.
    pub fn to_attribute_arrays(&self) -> AttributeArrays {
        if let Some(&max) = self.tile_tags.iter().max()
            && max > MAX_FLOAT_EXACT_TAG
        {
            warn!(max_tag = max, "tile ids above 2^24 lose precision as f32 attributes");
        }

        AttributeArrays {
            positions: self.positions.iter().flat_map(|p| p.to_array()).collect(),
            normals: self
                .compute_flat_normals()
                .iter()
                .flat_map(|n| n.to_array())
                .collect(),
            tile_ids: self
                .tile_tags
                .iter()
                .flat_map(|&tag| [tag as f32; 3])
                .collect(),
        }
    }
}

//! A single pentagon or hexagon cell and the geometry it emits.

use std::fmt;
use std::num::NonZeroU32;

use glam::Vec3;
use hexglobe_tiling::RawTile;

use crate::boundary::{DEFAULT_BEVEL_RATIO, bevel, order_boundary, radial_offset, resize_toward_center};
use crate::error::TileError;
use crate::geometry::{GeometryBuffer, NO_TILE};
use crate::hit_test::Intersection;
use crate::rings::{FanWinding, fan_close, side_walls};

/// Inset of the column body relative to the beveled boundary.
const COLUMN_RATIO: f32 = 0.9;
/// Inset of the cap integrated into a column.
const COLUMN_CAP_RATIO: f32 = 0.85;
/// Thickness of the cap integrated into a column.
const COLUMN_CAP_THICKNESS: f32 = 0.001;

/// Inset of the base of a separate cap.
const CAP_BASE_RATIO: f32 = 0.93;
/// Inset of the top face of a separate cap.
const CAP_TOP_RATIO: f32 = 0.85;
/// Height of a separate cap above its column.
const CAP_HEIGHT: f32 = 0.005;
/// Height of the beveled rim at the top of a separate cap.
const CAP_BEVEL_HEIGHT: f32 = 0.0005;

/// Stable, non-zero tile identifier.
///
/// Zero is reserved for [`NO_TILE`] in hit-test geometry, so it can never name a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(NonZeroU32);

impl TileId {
    /// Wraps a raw id, returning `None` for the sentinel `0`.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Id for the tile at `index` in its polyhedron (`index + 1`).
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(Self::new)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Position of the tile in its polyhedron.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shape of a tile, fixed by its boundary point count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Pentagon,
    Hexagon,
}

impl TileKind {
    /// Number of boundary points.
    pub fn corners(self) -> usize {
        match self {
            Self::Pentagon => 5,
            Self::Hexagon => 6,
        }
    }
}

/// One cell of the tiling: canonical boundary, center, id, and a height set once by the
/// terrain pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
    center: Vec3,
    boundary: Vec<Vec3>,
    height: Option<f32>,
}

impl Tile {
    /// Wrap a raw tiling cell.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidBoundary`] unless the boundary has 5 or 6 points.
    pub fn new(id: TileId, raw: &RawTile) -> Result<Self, TileError> {
        Self::from_parts(id, raw.center, &raw.boundary)
    }

    /// Build a tile from a center and an unordered boundary. The boundary is rewound so that it
    /// faces away from the origin.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidBoundary`] unless the boundary has 5 or 6 points.
    pub fn from_parts(id: TileId, center: Vec3, boundary: &[Vec3]) -> Result<Self, TileError> {
        let kind = match boundary.len() {
            5 => TileKind::Pentagon,
            6 => TileKind::Hexagon,
            n => return Err(TileError::InvalidBoundary(n)),
        };

        Ok(Self {
            id,
            kind,
            center,
            boundary: order_boundary(boundary),
            height: None,
        })
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Outward-wound boundary.
    pub fn boundary(&self) -> &[Vec3] {
        &self.boundary
    }

    /// The radial extrusion factor.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::HeightNotSet`] before [`Tile::set_height`] has been called.
    pub fn height(&self) -> Result<f32, TileError> {
        self.height.ok_or(TileError::HeightNotSet(self.id))
    }

    pub fn has_height(&self) -> bool {
        self.height.is_some()
    }

    /// Assign the radial extrusion factor. A tile's height can be written only once.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::HeightAlreadySet`] on a second call and
    /// [`TileError::InvalidHeight`] for a non-positive or non-finite value.
    pub fn set_height(&mut self, height: f32) -> Result<(), TileError> {
        if self.height.is_some() {
            return Err(TileError::HeightAlreadySet(self.id));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(TileError::InvalidHeight(height));
        }
        self.height = Some(height);
        Ok(())
    }

    /// Beveled canonical boundary, pulled toward the center by `ratio`.
    fn inset_ring(&self, ratio: f32) -> Result<Vec<Vec3>, TileError> {
        resize_toward_center(
            &bevel(&self.boundary, DEFAULT_BEVEL_RATIO),
            self.center,
            ratio,
        )
    }

    /// Extruded column body from the sphere surface to the tile height.
    ///
    /// With `with_cap`, a thin cap slightly narrower than the column is stacked on top and
    /// closed with a fan, all in the same buffer. Every vertex is tagged with the tile id.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::HeightNotSet`] if the height has not been assigned.
    pub fn create_column(&self, with_cap: bool) -> Result<GeometryBuffer, TileError> {
        let height = self.height()?;

        let bottom = self.inset_ring(COLUMN_RATIO)?;
        let top = radial_offset(&bottom, height);

        // Beveled rings carry two points per corner.
        let ring = 2 * self.kind.corners();
        let vertices = if with_cap {
            6 * ring * 3 + 3 * (ring - 2)
        } else {
            6 * ring
        };

        let mut geometry = GeometryBuffer::with_capacity(vertices);
        if with_cap {
            let cap = self.inset_ring(COLUMN_CAP_RATIO)?;
            let cap_bottom = radial_offset(&cap, height);
            let cap_top = radial_offset(&cap, height + COLUMN_CAP_THICKNESS);

            let fan = fan_close(&cap_top, FanWinding::Cw);
            let walls = side_walls(&[bottom, top, cap_bottom, cap_top])?;
            geometry.push_tagged(&walls, self.id.get());
            geometry.push_tagged(&fan, self.id.get());
        } else {
            let walls = side_walls(&[bottom, top])?;
            geometry.push_tagged(&walls, self.id.get());
        }

        Ok(geometry)
    }

    /// Standalone raised cap sitting on top of the column.
    ///
    /// Three rings (base, rim, narrower top) joined by side walls, closed with a downward fan
    /// on the base and an upward fan on the top.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::HeightNotSet`] if the height has not been assigned.
    pub fn create_cap(&self) -> Result<GeometryBuffer, TileError> {
        let height = self.height()?;

        let base = self.inset_ring(CAP_BASE_RATIO)?;
        let reduced = self.inset_ring(CAP_TOP_RATIO)?;
        let rings = [
            radial_offset(&base, height),
            radial_offset(&base, height + CAP_HEIGHT - CAP_BEVEL_HEIGHT),
            radial_offset(&reduced, height + CAP_HEIGHT),
        ];

        let walls = side_walls(&rings)?;
        let bottom = fan_close(&rings[0], FanWinding::Ccw);
        let top = fan_close(&rings[2], FanWinding::Cw);

        let mut geometry = GeometryBuffer::with_capacity(walls.len() + bottom.len() + top.len());
        geometry.push_tagged(&walls, self.id.get());
        geometry.push_tagged(&bottom, self.id.get());
        geometry.push_tagged(&top, self.id.get());
        Ok(geometry)
    }

    /// Coarse proxy covering the tile from the sphere surface to its height, for picking.
    ///
    /// Top fan and side walls are tagged with the tile id. The bottom fan is tagged
    /// [`NO_TILE`]: the tiling covers the whole sphere so rays should never reach it, and if one
    /// does the hit resolves to no tile.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::HeightNotSet`] if the height has not been assigned.
    pub fn create_hit_test_geometry(&self) -> Result<GeometryBuffer, TileError> {
        let height = self.height()?;

        let bottom = self.boundary.clone();
        let top = radial_offset(&bottom, height);
        let cap_top = fan_close(&top, FanWinding::Cw);
        let cap_bottom = fan_close(&bottom, FanWinding::Ccw);
        let walls = side_walls(&[bottom, top])?;

        let mut geometry =
            GeometryBuffer::with_capacity(cap_top.len() + walls.len() + cap_bottom.len());
        geometry.push_tagged(&cap_top, self.id.get());
        geometry.push_tagged(&walls, self.id.get());
        geometry.push_tagged(&cap_bottom, NO_TILE);
        Ok(geometry)
    }

    /// Resolve a hit on a merged hit-test mesh to the tile it belongs to.
    ///
    /// Reads the tag of the first vertex of the hit triangle; [`NO_TILE`] and out-of-range
    /// vertices resolve to `None`.
    pub fn id_from_hit_test_geometry(
        mesh: &GeometryBuffer,
        intersection: &Intersection,
    ) -> Option<TileId> {
        mesh.tile_tags
            .get(intersection.first_vertex)
            .copied()
            .and_then(TileId::new)
    }
}

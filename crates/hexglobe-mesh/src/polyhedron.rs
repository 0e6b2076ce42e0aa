//! The full tile collection of a Goldberg polyhedron.

use hexglobe_tiling::{RawTile, build_tiling};
use tracing::info;

use crate::error::PolyhedronError;
use crate::tile::{Tile, TileId, TileKind};

/// All tiles of one sphere tiling.
///
/// The tile list is fixed at construction. Tile `i` has id `i + 1`, so ids are unique within
/// the polyhedron and resolve back to their tile in O(1).
#[derive(Clone, Debug)]
pub struct Polyhedron {
    tiles: Vec<Tile>,
}

impl Polyhedron {
    /// Sphere radius handed to the tiling.
    pub const RADIUS: f32 = 1.0;
    /// Tile width handed to the tiling (edge-to-edge tiles).
    pub const TILE_WIDTH: f32 = 1.0;

    /// Tile the unit sphere with `subdivisions` segments per icosahedron edge.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError`] if the tiling rejects the parameters or produces a cell that
    /// is not a pentagon or hexagon.
    pub fn new(subdivisions: u32) -> Result<Self, PolyhedronError> {
        let raw = build_tiling(Self::RADIUS, subdivisions, Self::TILE_WIDTH)?;
        let polyhedron = Self::from_raw_tiles(&raw)?;

        info!(
            subdivisions,
            tiles = polyhedron.len(),
            pentagons = polyhedron.count_kind(TileKind::Pentagon),
            "built polyhedron"
        );

        Ok(polyhedron)
    }

    /// Wrap an arbitrary list of raw tiles, assigning ids in list order.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::Tile`] for the first cell that is not a pentagon or hexagon.
    pub fn from_raw_tiles(raw: &[RawTile]) -> Result<Self, PolyhedronError> {
        let tiles = raw
            .iter()
            .enumerate()
            .map(|(index, raw_tile)| {
                let id = TileId::from_index(index).ok_or(PolyhedronError::TooManyTiles(raw.len()))?;
                Tile::new(id, raw_tile).map_err(|source| PolyhedronError::Tile { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tiles })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable access for the terrain pass. The slice cannot grow or shrink.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::Vec3;
    use hexglobe_tiling::{TilingError, tile_count};

    use super::*;
    use crate::error::TileError;
    use crate::geometry::GeometryBuffer;
    use crate::hit_test::Ray;
    use crate::rings::{FanWinding, fan_close, triangle_winds_outward};

    #[test]
    fn test_tile_count_and_kinds() {
        let poly = Polyhedron::new(5).unwrap();
        assert_eq!(poly.len(), tile_count(5));
        assert_eq!(poly.count_kind(TileKind::Pentagon), 12);
        assert_eq!(poly.count_kind(TileKind::Hexagon), poly.len() - 12);
    }

    #[test]
    fn test_ids_are_unique_and_resolve() {
        let poly = Polyhedron::new(6).unwrap();
        let ids: HashSet<u32> = poly.tiles().iter().map(|t| t.id().get()).collect();
        assert_eq!(ids.len(), poly.len());
        assert!(!ids.contains(&0));

        for tile in poly.tiles() {
            assert_eq!(poly.tile(tile.id()).map(Tile::id), Some(tile.id()));
        }
        assert!(poly.tile(TileId::new(poly.len() as u32 + 1).unwrap()).is_none());
    }

    #[test]
    fn test_global_winding_consistency() {
        let poly = Polyhedron::new(8).unwrap();
        for tile in poly.tiles() {
            for tri in fan_close(tile.boundary(), FanWinding::Cw).chunks(3) {
                assert!(
                    triangle_winds_outward(tri[0], tri[1], tri[2]),
                    "tile {} has an inward-facing boundary",
                    tile.id()
                );
            }
        }
    }

    #[test]
    fn test_invalid_subdivisions() {
        assert!(matches!(
            Polyhedron::new(0),
            Err(PolyhedronError::Tiling(TilingError::InvalidSubdivisions(0)))
        ));
    }

    #[test]
    fn test_from_raw_tiles_rejects_quads() {
        let quad = RawTile {
            center: Vec3::Z,
            boundary: vec![Vec3::X, Vec3::Y, -Vec3::X, -Vec3::Y],
        };
        let err = Polyhedron::from_raw_tiles(&[quad]).unwrap_err();
        assert_eq!(
            err,
            PolyhedronError::Tile {
                index: 0,
                source: TileError::InvalidBoundary(4)
            }
        );
    }

    #[test]
    fn test_heights_are_set_through_tile_mut() {
        let mut poly = Polyhedron::new(2).unwrap();
        let id = poly.tiles()[3].id();
        poly.tile_mut(id).unwrap().set_height(1.2).unwrap();
        assert_eq!(poly.tile(id).unwrap().height(), Ok(1.2));

        for tile in poly.tiles_mut().iter_mut().filter(|t| !t.has_height()) {
            tile.set_height(1.05).unwrap();
        }
        assert!(poly.tiles().iter().all(Tile::has_height));
    }

    #[test]
    fn test_pick_tile_on_merged_hit_test_mesh() {
        let mut poly = Polyhedron::new(4).unwrap();
        for tile in poly.tiles_mut() {
            tile.set_height(1.1).unwrap();
        }

        let parts: Vec<GeometryBuffer> = poly
            .tiles()
            .iter()
            .map(|t| t.create_hit_test_geometry().unwrap())
            .collect();
        let merged = GeometryBuffer::merge(&parts).unwrap();

        for tile in poly.tiles().iter().step_by(17) {
            let b = tile.boundary();
            let edge_mid = (b[1] + b[2]) * 0.5;
            let target: Vec3 = tile.center() + (edge_mid - tile.center()) * 0.3;
            let ray = Ray::toward(target * 5.0, Vec3::ZERO);

            assert_eq!(
                merged.pick_tile(&ray),
                Some(tile.id()),
                "ray through tile {} resolved to another tile",
                tile.id()
            );
        }
    }

    #[test]
    fn test_pick_through_every_tile_center() {
        let mut poly = Polyhedron::new(5).unwrap();
        for (i, tile) in poly.tiles_mut().iter_mut().enumerate() {
            tile.set_height(1.0 + (i % 5) as f32 * 0.07).unwrap();
        }

        let parts: Vec<GeometryBuffer> = poly
            .tiles()
            .iter()
            .map(|t| t.create_hit_test_geometry().unwrap())
            .collect();
        let merged = GeometryBuffer::merge(&parts).unwrap();

        for tile in poly.tiles() {
            let ray = Ray::toward(tile.center() * 5.0, Vec3::ZERO);
            assert_eq!(
                merged.pick_tile(&ray),
                Some(tile.id()),
                "ray through the center of tile {} missed it",
                tile.id()
            );
        }
    }
}

//! Dual of the geodesic mesh: one pentagon or hexagon tile per geodesic vertex.

use glam::Vec3;
use tracing::debug;

use crate::error::TilingError;
use crate::geodesic::GeodesicMesh;

/// A raw tile as produced by the tiling: a center and a boundary polygon.
///
/// The boundary goes around the center, but consumers should not rely on its winding direction.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTile {
    /// Tile center on the sphere surface.
    pub center: Vec3,
    /// Boundary polygon, 5 or 6 points.
    pub boundary: Vec<Vec3>,
}

/// Largest accepted subdivision frequency. Keeps `20·n²` triangle and `10·n² + 2` vertex
/// counts addressable with `u32` indices and tile ids.
pub const MAX_SUBDIVISIONS: u32 = 10_000;

/// Number of tiles a tiling with the given subdivision frequency produces.
pub fn tile_count(subdivisions: u32) -> usize {
    let n = subdivisions as usize;
    10 * n * n + 2
}

/// Build the tiling of a sphere of `radius`.
///
/// `subdivisions` is the number of segments each icosahedron edge is split into. `tile_width`
/// moves every boundary point toward its tile center (`1.0` keeps the tiles edge to edge).
///
/// # Errors
///
/// Returns [`TilingError`] for a subdivision count of zero or above [`MAX_SUBDIVISIONS`], a
/// non-positive radius, or a tile width outside `(0, 1]`.
pub fn build_tiling(
    radius: f32,
    subdivisions: u32,
    tile_width: f32,
) -> Result<Vec<RawTile>, TilingError> {
    if subdivisions == 0 || subdivisions > MAX_SUBDIVISIONS {
        return Err(TilingError::InvalidSubdivisions(subdivisions));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(TilingError::InvalidRadius(radius));
    }
    if !(tile_width > 0.0 && tile_width <= 1.0) {
        return Err(TilingError::InvalidTileWidth(tile_width));
    }

    let mesh = GeodesicMesh::new(subdivisions);
    let incident = mesh.incident_triangles();

    let tiles: Vec<RawTile> = mesh
        .positions
        .iter()
        .zip(&incident)
        .map(|(&vertex, triangles)| {
            let center = vertex * radius;
            let mut corners: Vec<Vec3> = triangles
                .iter()
                .map(|&t| mesh.triangle_centroid(t) * radius)
                .collect();
            sort_around(vertex, center, &mut corners);

            let boundary = corners
                .into_iter()
                .map(|p| center + (p - center) * tile_width)
                .collect();

            RawTile { center, boundary }
        })
        .collect();

    debug!(
        subdivisions,
        tiles = tiles.len(),
        "built geodesic tiling"
    );

    Ok(tiles)
}

/// Sort points by angle around `axis`, measured in the tangent plane at `center`.
fn sort_around(axis: Vec3, center: Vec3, points: &mut [Vec3]) {
    let normal = axis.normalize();
    let helper = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u = helper.cross(normal).normalize();
    let w = normal.cross(u);

    points.sort_by(|p, q| {
        let dp = *p - center;
        let dq = *q - center;
        let ap = dp.dot(w).atan2(dp.dot(u));
        let aq = dq.dot(w).atan2(dq.dot(u));
        ap.total_cmp(&aq)
    });
}

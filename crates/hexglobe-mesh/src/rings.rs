//! Triangulation of rings into side walls and fan caps.
//!
//! Output is triangle soup: every three consecutive vertices form one triangle, counter-clockwise
//! when seen from the side the face is meant to be visible from.

use glam::Vec3;

use crate::error::TileError;

/// Vertex order used when closing a ring with a fan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FanWinding {
    /// Emits `(pivot, a, b)`: faces away from the sphere for an outward-wound ring (top caps).
    Cw,
    /// Emits `(pivot, b, a)`: faces toward the sphere center (bottom caps).
    Ccw,
}

/// Returns `true` if the triangle's normal points away from the origin.
///
/// The triangle centroid stands in for the outward direction.
pub fn triangle_winds_outward(v0: Vec3, v1: Vec3, v2: Vec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Join each consecutive pair of rings with two triangles per edge.
///
/// For the pair `(bottom, top)` and edge `i -> i + 1` (wrapping to 0), with
/// `a = top[i]`, `b = top[i + 1]`, `c = bottom[i]`, `d = bottom[i + 1]`, the triangles are
/// `(b, a, d)` and `(c, d, a)`. `k` rings of `n` points give `6·n·(k − 1)` vertices.
///
/// # Errors
///
/// Returns [`TileError::RingLengthMismatch`] if the rings differ in length.
pub fn side_walls(rings: &[Vec<Vec3>]) -> Result<Vec<Vec3>, TileError> {
    let Some(first) = rings.first() else {
        return Ok(Vec::new());
    };
    let n = first.len();
    if let Some((index, ring)) = rings.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(TileError::RingLengthMismatch {
            index,
            len: ring.len(),
            expected: n,
        });
    }

    let mut vertices = Vec::with_capacity(6 * n * rings.len().saturating_sub(1));
    for pair in rings.windows(2) {
        let (bottom, top) = (&pair[0], &pair[1]);
        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b) = (top[i], top[j]);
            let (c, d) = (bottom[i], bottom[j]);

            vertices.extend_from_slice(&[b, a, d, c, d, a]);
        }
    }

    Ok(vertices)
}

/// Close a ring with a triangle fan pivoting on its first point.
///
/// Emits `n − 2` triangles (`3·(n − 2)` vertices); rings with fewer than three points produce
/// nothing.
pub fn fan_close(boundary: &[Vec3], winding: FanWinding) -> Vec<Vec3> {
    let Some((&pivot, rest)) = boundary.split_first() else {
        return Vec::new();
    };

    let mut vertices = Vec::with_capacity(3 * boundary.len().saturating_sub(2));
    for edge in rest.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        match winding {
            FanWinding::Cw => vertices.extend_from_slice(&[pivot, a, b]),
            FanWinding::Ccw => vertices.extend_from_slice(&[pivot, b, a]),
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::radial_offset;

    /// Regular n-gon tangent to the unit sphere at +Z, wound counter-clockwise from outside.
    fn polygon(n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / n as f32;
                Vec3::new(0.1 * a.cos(), 0.1 * a.sin(), 1.0)
            })
            .collect()
    }

    #[test]
    fn test_side_wall_vertex_count() {
        for n in [5, 6, 10, 12] {
            let base = polygon(n);
            for k in 2..=4 {
                let rings: Vec<Vec<Vec3>> = (0..k)
                    .map(|level| radial_offset(&base, 1.0 + level as f32 * 0.1))
                    .collect();
                let walls = side_walls(&rings).unwrap();
                assert_eq!(walls.len(), 6 * n * (k - 1), "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_side_walls_face_away_from_column_axis() {
        let base = polygon(6);
        let rings = vec![base.clone(), radial_offset(&base, 1.3)];
        let walls = side_walls(&rings).unwrap();

        for tri in walls.chunks(3) {
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            // Horizontal distance from the column axis (+Z) grows along the normal.
            let radial = Vec3::new(centroid.x, centroid.y, 0.0);
            assert!(normal.dot(radial) > 0.0, "wall triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn test_inset_annulus_faces_up() {
        let base = polygon(6);
        let inner: Vec<Vec3> = base
            .iter()
            .map(|p| Vec3::new(p.x * 0.5, p.y * 0.5, p.z))
            .collect();
        let walls = side_walls(&[base, inner]).unwrap();
        for tri in walls.chunks(3) {
            assert!(triangle_winds_outward(tri[0], tri[1], tri[2]));
        }
    }

    #[test]
    fn test_side_walls_reject_mismatched_rings() {
        let err = side_walls(&[polygon(6), polygon(5)]).unwrap_err();
        assert_eq!(
            err,
            TileError::RingLengthMismatch {
                index: 1,
                len: 5,
                expected: 6
            }
        );
    }

    #[test]
    fn test_side_walls_single_ring_is_empty() {
        assert!(side_walls(&[polygon(6)]).unwrap().is_empty());
        assert!(side_walls(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_fan_vertex_count() {
        for n in 3..=12 {
            assert_eq!(fan_close(&polygon(n), FanWinding::Cw).len(), 3 * (n - 2));
            assert_eq!(fan_close(&polygon(n), FanWinding::Ccw).len(), 3 * (n - 2));
        }
        assert!(fan_close(&polygon(2), FanWinding::Cw).is_empty());
        assert!(fan_close(&[], FanWinding::Cw).is_empty());
    }

    #[test]
    fn test_fan_windings_are_mirrored() {
        let ring = polygon(6);
        let top = fan_close(&ring, FanWinding::Cw);
        let bottom = fan_close(&ring, FanWinding::Ccw);

        for (t, b) in top.chunks(3).zip(bottom.chunks(3)) {
            assert_eq!(t[0], b[0]);
            assert_eq!(t[1], b[2]);
            assert_eq!(t[2], b[1]);
            assert!(triangle_winds_outward(t[0], t[1], t[2]));
            assert!(!triangle_winds_outward(b[0], b[1], b[2]));
        }
    }
}

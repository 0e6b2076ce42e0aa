//! Boundary winding normalization and ring operators.
//!
//! Rings are derived from a tile's canonical boundary in a fixed order: [`bevel`] first (it needs
//! the original corner adjacency), then [`resize_toward_center`], and [`radial_offset`] last to
//! lift the ring to its altitude.

use glam::Vec3;

use crate::error::TileError;

/// Fraction of each adjacent edge cut away at a beveled corner.
pub const DEFAULT_BEVEL_RATIO: f32 = 0.05;

/// Wind a boundary so the normal of its first three points faces away from the origin.
///
/// Tilings can hand back boundaries in either direction. The normal of triangle `[0, 1, 2]` is
/// compared against point 0 as a vector from the origin; a negative dot product means the
/// polygon is wound inward and the whole sequence is reversed. Boundaries with fewer than three
/// points are returned unchanged.
pub fn order_boundary(boundary: &[Vec3]) -> Vec<Vec3> {
    let mut ordered = boundary.to_vec();
    if let [a, b, c, ..] = boundary {
        let normal = (*b - *a).cross(*c - *a);
        if normal.dot(*a) < 0.0 {
            ordered.reverse();
        }
    }
    ordered
}

/// Scale every point's offset from `center` by `ratio`, keeping `center` fixed.
///
/// # Errors
///
/// Returns [`TileError::InvalidResizeRatio`] if `ratio` is not strictly positive.
pub fn resize_toward_center(
    boundary: &[Vec3],
    center: Vec3,
    ratio: f32,
) -> Result<Vec<Vec3>, TileError> {
    if !(ratio > 0.0 && ratio.is_finite()) {
        return Err(TileError::InvalidResizeRatio(ratio));
    }
    Ok(boundary
        .iter()
        .map(|&p| center + (p - center) * ratio)
        .collect())
}

/// Chamfer every corner, replacing each point with two.
///
/// For a corner `p` with neighbours `prev` and `next`, the emitted pair is
/// `p - (next - p) * ratio` followed by `p - (prev - p) * ratio`. An n-point boundary becomes a
/// 2n-point one. Not idempotent: apply it to the canonical boundary only.
pub fn bevel(boundary: &[Vec3], ratio: f32) -> Vec<Vec3> {
    let n = boundary.len();
    let mut beveled = Vec::with_capacity(n * 2);

    for (i, &current) in boundary.iter().enumerate() {
        let next = boundary[(i + 1) % n];
        let prev = boundary[(i + n - 1) % n];

        beveled.push(current - (next - current) * ratio);
        beveled.push(current - (prev - current) * ratio);
    }

    beveled
}

/// Scale every point away from the origin by `scale`.
///
/// Tile boundaries sit on the unit sphere, so this is how a ring gets lifted to `scale` times
/// the sphere radius.
pub fn radial_offset(boundary: &[Vec3], scale: f32) -> Vec<Vec3> {
    boundary.iter().map(|&p| p * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A regular hexagon in the plane tangent to the unit sphere at +Z, wound counter-clockwise
    /// when seen from outside.
    fn hexagon() -> (Vec3, Vec<Vec3>) {
        let center = Vec3::Z;
        let boundary = (0..6)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / 6.0;
                Vec3::new(0.1 * a.cos(), 0.1 * a.sin(), 1.0)
            })
            .collect();
        (center, boundary)
    }

    fn first_triangle_faces_out(boundary: &[Vec3]) -> bool {
        let normal = (boundary[1] - boundary[0]).cross(boundary[2] - boundary[0]);
        normal.dot(boundary[0]) >= 0.0
    }

    #[test]
    fn test_order_keeps_outward_boundary() {
        let (_, boundary) = hexagon();
        let ordered = order_boundary(&boundary);
        assert_eq!(ordered, boundary);
        assert!(first_triangle_faces_out(&ordered));
    }

    #[test]
    fn test_order_reverses_inward_boundary() {
        let (_, mut boundary) = hexagon();
        boundary.reverse();
        assert!(!first_triangle_faces_out(&boundary));

        let ordered = order_boundary(&boundary);
        assert!(first_triangle_faces_out(&ordered));
        assert_eq!(ordered[0], boundary[5]);
    }

    #[test]
    fn test_order_on_far_side_of_sphere() {
        // Same hexagon mirrored to -Z: the outward direction flips with it.
        let (_, boundary) = hexagon();
        let mirrored: Vec<Vec3> = boundary.iter().map(|p| Vec3::new(p.x, p.y, -p.z)).collect();
        let ordered = order_boundary(&mirrored);
        assert!(first_triangle_faces_out(&ordered));
    }

    #[test]
    fn test_resize_identity() {
        let (center, boundary) = hexagon();
        let resized = resize_toward_center(&boundary, center, 1.0).unwrap();
        for (a, b) in boundary.iter().zip(&resized) {
            assert!(a.distance(*b) < 1e-6);
        }
    }

    #[test]
    fn test_resize_shrinks_toward_center() {
        let (center, boundary) = hexagon();
        let resized = resize_toward_center(&boundary, center, 0.5).unwrap();
        for (a, b) in boundary.iter().zip(&resized) {
            let expected = a.distance(center) * 0.5;
            assert!((b.distance(center) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_resize_rejects_non_positive_ratio() {
        let (center, boundary) = hexagon();
        for ratio in [0.0, -0.5, -1.0, f32::NAN] {
            assert!(
                matches!(
                    resize_toward_center(&boundary, center, ratio),
                    Err(TileError::InvalidResizeRatio(_))
                ),
                "ratio {ratio} should be rejected"
            );
        }
    }

    #[test]
    fn test_bevel_doubles_point_count() {
        let (center, boundary) = hexagon();
        let beveled = bevel(&boundary, DEFAULT_BEVEL_RATIO);
        assert_eq!(beveled.len(), 12);

        let resized = resize_toward_center(&beveled, center, 0.9).unwrap();
        assert_eq!(resized.len(), 12);

        let pentagon = &boundary[..5];
        assert_eq!(bevel(pentagon, DEFAULT_BEVEL_RATIO).len(), 10);
    }

    #[test]
    fn test_bevel_points_lie_on_extended_edges() {
        let (_, boundary) = hexagon();
        let beveled = bevel(&boundary, 0.1);
        let (p, next) = (boundary[0], boundary[1]);
        let expected = p - (next - p) * 0.1;
        assert!(beveled[0].distance(expected) < 1e-6);
    }

    #[test]
    fn test_bevel_with_zero_ratio_duplicates_corners() {
        let (_, boundary) = hexagon();
        let beveled = bevel(&boundary, 0.0);
        for (i, p) in boundary.iter().enumerate() {
            assert_eq!(beveled[2 * i], *p);
            assert_eq!(beveled[2 * i + 1], *p);
        }
    }

    #[test]
    fn test_radial_offset_scales_from_origin() {
        let (_, boundary) = hexagon();
        let lifted = radial_offset(&boundary, 1.3);
        for (a, b) in boundary.iter().zip(&lifted) {
            assert!((b.length() - a.length() * 1.3).abs() < 1e-5);
            assert!(a.normalize().dot(b.normalize()) > 0.9999);
        }
    }
}

//! The regular icosahedron every geodesic tiling starts from.

use glam::Vec3;

/// Triangle corners of the 20 icosahedron faces, indexing [`icosahedron_vertices`].
pub(crate) const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 12 icosahedron vertices, normalized onto the unit sphere.
pub(crate) fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(Vec3::normalize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_on_unit_sphere() {
        for v in icosahedron_vertices() {
            assert!((v.length() - 1.0).abs() < 1e-6, "vertex {v} not on unit sphere");
        }
    }

    #[test]
    fn test_every_vertex_touches_five_faces() {
        let mut valence = [0; 12];
        for face in ICOSAHEDRON_FACES {
            for corner in face {
                valence[corner as usize] += 1;
            }
        }
        assert!(valence.iter().all(|&v| v == 5), "valence table: {valence:?}");
    }
}

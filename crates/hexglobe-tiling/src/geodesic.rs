//! Frequency-n geodesic subdivision of the icosahedron.
//!
//! Each icosahedron face is split into `n²` triangles on a barycentric lattice and every lattice
//! point is projected onto the unit sphere. Lattice points on shared face edges and corners are
//! deduplicated through a topological key, so neighbouring faces reuse the same vertex index
//! without relying on float comparisons.

use std::collections::HashMap;

use glam::Vec3;

use crate::icosahedron::{ICOSAHEDRON_FACES, icosahedron_vertices};

/// Identifies a lattice point independently of the face it was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum LatticeKey {
    /// One of the 12 original icosahedron vertices.
    Corner(u32),
    /// A point on the icosahedron edge `from -> to` (`from < to`), `step` lattice units from `from`.
    Edge { from: u32, to: u32, step: u32 },
    /// A point strictly inside one icosahedron face.
    Interior { face: u32, i: u32, j: u32 },
}

/// A subdivided icosahedron with vertices on the unit sphere.
#[derive(Clone, Debug)]
pub struct GeodesicMesh {
    /// Unit-length vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangles as vertex index triplets, wound counter-clockwise seen from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl GeodesicMesh {
    /// Subdivide every icosahedron edge into `frequency` segments.
    ///
    /// Produces `10·f² + 2` vertices and `20·f²` triangles. A frequency of `0` is treated as `1`.
    /// Vertex indices are `u32`, so frequencies above
    /// [`MAX_SUBDIVISIONS`](crate::MAX_SUBDIVISIONS) are not supported;
    /// [`build_tiling`](crate::build_tiling) rejects them.
    pub fn new(frequency: u32) -> Self {
        let n = frequency.max(1);
        let corners = icosahedron_vertices();

        let size = n as usize;
        let mut positions = Vec::with_capacity(10 * size * size + 2);
        let mut triangles = Vec::with_capacity(20 * size * size);
        let mut lookup: HashMap<LatticeKey, u32> = HashMap::new();

        for (face_index, face) in ICOSAHEDRON_FACES.iter().enumerate() {
            let [a, b, c] = face.map(|i| corners[i as usize]);

            // Local lattice indices laid out row by row: row `i` holds `n - i + 1` points.
            let mut local = Vec::with_capacity((size + 1) * (size + 2) / 2);
            for i in 0..=n {
                for j in 0..=(n - i) {
                    let weights = [n - i - j, i, j];
                    let key = lattice_key(face_index as u32, *face, weights);
                    let index = *lookup.entry(key).or_insert_with(|| {
                        let point = a * weights[0] as f32 + b * weights[1] as f32 + c * weights[2] as f32;
                        positions.push(point.normalize());
                        (positions.len() - 1) as u32
                    });
                    local.push(index);
                }
            }

            let at = |i: u32, j: u32| -> u32 {
                // Offset of row `i` is the number of points in rows `0..i`.
                let (i, j) = (i as usize, j as usize);
                let row_start = i * (size + 1) - i * i.saturating_sub(1) / 2;
                local[row_start + j]
            };

            for i in 0..n {
                for j in 0..(n - i) {
                    let p0 = at(i, j);
                    let p1 = at(i + 1, j);
                    let p2 = at(i, j + 1);
                    triangles.push([p0, p1, p2]);

                    if i + j + 1 < n {
                        let p3 = at(i + 1, j + 1);
                        triangles.push([p1, p3, p2]);
                    }
                }
            }
        }

        Self {
            positions,
            triangles,
        }
    }

    /// For every vertex, the indices of the triangles that touch it.
    pub fn incident_triangles(&self) -> Vec<Vec<u32>> {
        let mut incident = vec![Vec::with_capacity(6); self.positions.len()];
        for (t, tri) in self.triangles.iter().enumerate() {
            for &v in tri {
                incident[v as usize].push(t as u32);
            }
        }
        incident
    }

    /// Centroid of a triangle (not projected back onto the sphere).
    pub fn triangle_centroid(&self, triangle: u32) -> Vec3 {
        let [a, b, c] = self.triangles[triangle as usize];
        (self.positions[a as usize] + self.positions[b as usize] + self.positions[c as usize])
            / 3.0
    }
}

fn lattice_key(face: u32, corners: [u32; 3], weights: [u32; 3]) -> LatticeKey {
    let nonzero: Vec<(u32, u32)> = corners
        .into_iter()
        .zip(weights)
        .filter(|&(_, w)| w > 0)
        .collect();

    match nonzero.as_slice() {
        [(corner, _)] => LatticeKey::Corner(*corner),
        [(u, wu), (v, wv)] => {
            if u < v {
                LatticeKey::Edge {
                    from: *u,
                    to: *v,
                    step: *wv,
                }
            } else {
                LatticeKey::Edge {
                    from: *v,
                    to: *u,
                    step: *wu,
                }
            }
        }
        _ => LatticeKey::Interior {
            face,
            i: weights[1],
            j: weights[2],
        },
    }
}

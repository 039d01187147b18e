use anyhow::ensure;

use super::{random_color, Mesh};

#[derive(Clone, Copy, Debug)]
pub struct NestedCubesParams {
    pub outer_half_size: f32,
    pub inner_half_size: f32,
}

impl Default for NestedCubesParams {
    fn default() -> Self {
        NestedCubesParams {
            outer_half_size: 0.7,
            inner_half_size: 0.3,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Facing {
    Outward,
    Inward,
}

/// A small cube inside a larger one.
///
/// The outer cube's faces point inward so that, with back faces culled, its near walls vanish
/// and the far walls frame the inner cube.
pub fn nested_cubes(params: &NestedCubesParams, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
    ensure!(
        0.0 < params.inner_half_size && params.inner_half_size < params.outer_half_size,
        "inner cube ({}) must fit inside outer cube ({})",
        params.inner_half_size,
        params.outer_half_size
    );

    let mut mesh = Mesh::with_capacity(16, 24);
    push_cube(&mut mesh, params.outer_half_size, Facing::Inward, rng);
    push_cube(&mut mesh, params.inner_half_size, Facing::Outward, rng);
    Ok(mesh)
}

/// Corner `c` has x positive when bit 0 is set, y when bit 1 is set, z when bit 2 is set.
fn corner_index(signs: [i32; 3]) -> u32 {
    signs
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s > 0)
        .map(|(axis, _)| 1u32 << axis)
        .sum()
}

fn push_cube(mesh: &mut Mesh, half_size: f32, facing: Facing, rng: &fastrand::Rng) {
    let base = mesh.vertex_count() as u32;

    for corner in 0..8u32 {
        let coord = |axis: u32| {
            if corner & (1 << axis) != 0 {
                half_size
            } else {
                -half_size
            }
        };
        mesh.push_vertex([coord(0), coord(1), coord(2)], random_color(rng));
    }

    for axis in 0..3 {
        for sign in [-1, 1] {
            // (u, v, normal) is right handed, swapped for the negative face.
            let (mut u, mut v) = ((axis + 1) % 3, (axis + 2) % 3);
            if sign < 0 {
                std::mem::swap(&mut u, &mut v);
            }

            let quad = [(-1, -1), (1, -1), (1, 1), (-1, 1)].map(|(su, sv)| {
                let mut signs = [0; 3];
                signs[axis] = sign;
                signs[u] = su;
                signs[v] = sv;
                base + corner_index(signs)
            });

            match facing {
                Facing::Outward => {
                    mesh.push_triangle(quad[0], quad[1], quad[2]);
                    mesh.push_triangle(quad[2], quad[3], quad[0]);
                }
                Facing::Inward => {
                    mesh.push_triangle(quad[0], quad[2], quad[1]);
                    mesh.push_triangle(quad[2], quad[0], quad[3]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector3};

    use super::*;

    fn point(mesh: &Mesh, index: u32) -> Vector3<f32> {
        Vector3::from(mesh.positions[index as usize])
    }

    fn outward_triangles(mesh: &Mesh, range: std::ops::Range<usize>) -> Vec<bool> {
        mesh.triangles()
            .skip(range.start)
            .take(range.len())
            .map(|[a, b, c]| {
                let (a, b, c) = (point(mesh, a), point(mesh, b), point(mesh, c));
                let normal = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                normal.dot(centroid) > 0.0
            })
            .collect()
    }

    #[test]
    fn default_counts() {
        let mesh = nested_cubes(&NestedCubesParams::default(), &fastrand::Rng::with_seed(4))
            .unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 24);
        mesh.validate().unwrap();
    }

    #[test]
    fn outer_cube_faces_inward_and_inner_faces_outward() {
        let mesh = nested_cubes(&NestedCubesParams::default(), &fastrand::Rng::with_seed(4))
            .unwrap();
        assert!(outward_triangles(&mesh, 0..12).iter().all(|outward| !outward));
        assert!(outward_triangles(&mesh, 12..24).iter().all(|outward| *outward));
    }

    #[test]
    fn every_face_is_a_square() {
        let params = NestedCubesParams::default();
        let mesh = nested_cubes(&params, &fastrand::Rng::with_seed(4)).unwrap();
        for [a, b, c] in mesh.triangles().skip(12) {
            let (a, b, c) = (point(&mesh, a), point(&mesh, b), point(&mesh, c));
            let area = (b - a).cross(c - a).magnitude() / 2.0;
            let side = params.inner_half_size * 2.0;
            assert!((area - side * side / 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn corner_layout() {
        assert_eq!(corner_index([-1, -1, -1]), 0);
        assert_eq!(corner_index([1, -1, -1]), 1);
        assert_eq!(corner_index([-1, 1, 1]), 6);
        assert_eq!(corner_index([1, 1, 1]), 7);
    }

    #[test]
    fn rejects_inner_cube_that_does_not_fit() {
        let params = NestedCubesParams {
            outer_half_size: 0.3,
            inner_half_size: 0.5,
        };
        assert!(nested_cubes(&params, &fastrand::Rng::with_seed(4)).is_err());
    }
}

/*
  r is the radius of the tube, R the distance from the centre of the torus to the centre of
  the tube. Both circles are sampled `stride * lines` times.

   r
  <-->
     ------------
    /            \
   /     /----\   \
  |     |      |   |
   \     \----/   /
    \            /
     ------------
         <------>
             R
*/
use std::f64::consts::TAU;

use anyhow::ensure;

use super::{random_color, Mesh};

#[derive(Clone, Copy, Debug)]
pub struct TorusParams {
    pub minor_radius: f64,
    pub major_radius: f64,
    /// Angular distance, in samples, between two diagonal bands.
    pub stride: usize,
    /// Number of bands around each circle.
    pub lines: usize,
}

impl TorusParams {
    pub fn samples(&self) -> usize {
        self.stride * self.lines
    }
}

impl Default for TorusParams {
    fn default() -> Self {
        TorusParams {
            minor_radius: 0.25,
            major_radius: 0.6,
            stride: 9,
            lines: 3,
        }
    }
}

/// Samples a torus and stitches sparse diagonal bands of triangles across it.
///
/// Every sample on the tube circle gets its own color, shared by all the vertices in that
/// stratum.
pub fn torus(params: &TorusParams, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
    let samples = params.samples();
    ensure!(
        samples >= 3,
        "torus needs at least 3 samples per circle, got {samples}"
    );

    let step = TAU / samples as f64;
    let colors: Vec<_> = (0..samples).map(|_| random_color(rng)).collect();

    let mut mesh = Mesh::with_capacity(samples * samples, samples * params.lines * 2);

    // Ring i is the tube cross-section at angle i * step around the major circle.
    for i in 0..samples {
        let (sin_major, cos_major) = (step * i as f64).sin_cos();
        for j in 0..samples {
            let (sin_minor, cos_minor) = (step * j as f64).sin_cos();
            let reach = params.major_radius + cos_minor * params.minor_radius;
            let n = mesh.push_vertex(
                [
                    (cos_major * reach) as f32,
                    (sin_major * reach) as f32,
                    (sin_minor * params.minor_radius) as f32,
                ],
                colors[j],
            );
            if i > 0 {
                stitch_band(&mut mesh, n, i, j, params.stride, samples);
            }
        }
    }

    close_loop(&mut mesh, params.stride, samples);

    Ok(mesh)
}

/// Links vertex `n` (ring `i`, sample `j`) back to the previous ring.
fn stitch_band(mesh: &mut Mesh, n: u32, i: usize, j: usize, stride: usize, samples: usize) {
    let s = samples as u32;
    let last = j == samples - 1;
    let phase = (i + j) % stride;

    if phase == 0 {
        if j > 0 {
            mesh.push_triangle(n, n - 1, n - s);
        }
        if !last {
            mesh.push_triangle(n, n - s, n - s + 1);
        } else {
            mesh.push_triangle(n, n - s, n + 1 - 2 * s);
        }
    } else if last && phase == stride - 1 {
        // The band wraps around the tube: pick up its start on the previous ring.
        mesh.push_triangle(n, n + 1 - 2 * s, n - s + 1);
    }
}

/// Stitches the last ring back onto the first one.
fn close_loop(mesh: &mut Mesh, stride: usize, samples: usize) {
    let n = (mesh.vertex_count() - 1) as u32;
    let s = samples as u32;
    let last_ring = n - s + 1;

    for j in 0..samples {
        let on_band = j % stride == 0;
        if !on_band && j != samples - 1 {
            continue;
        }
        let j32 = j as u32;
        if j > 0 && on_band {
            mesh.push_triangle(j32, j32 - 1, last_ring + j32);
        }
        if j < samples - 1 {
            mesh.push_triangle(j32, last_ring + j32, last_ring + j32 + 1);
        } else {
            mesh.push_triangle(j32, last_ring, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_torus() -> Mesh {
        torus(&TorusParams::default(), &fastrand::Rng::with_seed(7)).unwrap()
    }

    #[test]
    fn default_counts() {
        let mesh = default_torus();
        assert_eq!(mesh.vertex_count(), 27 * 27);
        assert_eq!(mesh.triangle_count(), 162);
        mesh.validate().unwrap();
    }

    #[test]
    fn counts_do_not_depend_on_colors() {
        let a = torus(&TorusParams::default(), &fastrand::Rng::with_seed(1)).unwrap();
        let b = torus(&TorusParams::default(), &fastrand::Rng::with_seed(2)).unwrap();
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.positions, b.positions);
        assert_ne!(a.colors, b.colors);
    }

    #[test]
    fn vertices_lie_on_the_torus() {
        let params = TorusParams::default();
        let mesh = default_torus();
        for [x, y, z] in &mesh.positions {
            let ring = (x * x + y * y).sqrt() as f64 - params.major_radius;
            let distance = (ring * ring + (*z as f64) * (*z as f64)).sqrt();
            assert!((distance - params.minor_radius).abs() < 1e-5);
        }
    }

    #[test]
    fn strata_share_a_color() {
        let mesh = default_torus();
        for i in 1..27 {
            for j in 0..27 {
                assert_eq!(mesh.colors[i * 27 + j], mesh.colors[j]);
            }
        }
    }

    #[test]
    fn closing_triangles_reach_the_first_ring() {
        let mesh = default_torus();
        let closing: Vec<_> = mesh.triangles().skip(156).collect();
        assert_eq!(closing.len(), 6);
        assert_eq!(closing[0], [0, 702, 703]);
        assert_eq!(closing[5], [26, 702, 0]);
    }

    #[test]
    fn smaller_torus() {
        let params = TorusParams {
            stride: 3,
            lines: 2,
            ..Default::default()
        };
        let mesh = torus(&params, &fastrand::Rng::with_seed(3)).unwrap();
        assert_eq!(mesh.vertex_count(), 36);
        mesh.validate().unwrap();
    }

    #[test]
    fn rejects_too_few_samples() {
        let params = TorusParams {
            stride: 1,
            lines: 2,
            ..Default::default()
        };
        assert!(torus(&params, &fastrand::Rng::with_seed(3)).is_err());
    }
}

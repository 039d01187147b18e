use anyhow::ensure;

use super::{circle_point, random_color, Mesh};

#[derive(Clone, Copy, Debug)]
pub struct AnnulusParams {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub segments: usize,
}

impl Default for AnnulusParams {
    fn default() -> Self {
        AnnulusParams {
            inner_radius: 0.35,
            outer_radius: 0.8,
            segments: 48,
        }
    }
}

/// A flat ring in the z = 0 plane. Vertex `2k` sits on the inner circle and `2k + 1` on the
/// outer one; each segment is one color.
pub fn annulus(params: &AnnulusParams, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
    ensure!(
        params.segments >= 3,
        "annulus needs at least 3 segments, got {}",
        params.segments
    );
    ensure!(
        params.inner_radius < params.outer_radius,
        "annulus inner radius {} must be smaller than outer radius {}",
        params.inner_radius,
        params.outer_radius
    );

    let segments = params.segments;
    let mut mesh = Mesh::with_capacity(segments * 2, segments * 2);

    for k in 0..segments {
        let color = random_color(rng);
        let (ix, iy) = circle_point(params.inner_radius, k, segments);
        let (ox, oy) = circle_point(params.outer_radius, k, segments);
        mesh.push_vertex([ix, iy, 0.0], color);
        mesh.push_vertex([ox, oy, 0.0], color);
    }

    for k in 0..segments {
        let next = (k + 1) % segments;
        let (inner, outer) = (2 * k as u32, 2 * k as u32 + 1);
        let (next_inner, next_outer) = (2 * next as u32, 2 * next as u32 + 1);
        mesh.push_triangle(inner, outer, next_outer);
        mesh.push_triangle(inner, next_outer, next_inner);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts() {
        let mesh = annulus(&AnnulusParams::default(), &fastrand::Rng::with_seed(1)).unwrap();
        assert_eq!(mesh.vertex_count(), 96);
        assert_eq!(mesh.triangle_count(), 96);
        mesh.validate().unwrap();
    }

    #[test]
    fn last_segment_wraps_to_first() {
        let params = AnnulusParams {
            segments: 4,
            ..Default::default()
        };
        let mesh = annulus(&params, &fastrand::Rng::with_seed(1)).unwrap();
        let last: Vec<_> = mesh.triangles().skip(6).collect();
        assert_eq!(last, vec![[6, 7, 1], [6, 1, 0]]);
    }

    #[test]
    fn faces_point_towards_the_viewer() {
        let mesh = annulus(&AnnulusParams::default(), &fastrand::Rng::with_seed(1)).unwrap();
        for [a, b, c] in mesh.triangles() {
            let [ax, ay, _] = mesh.positions[a as usize];
            let [bx, by, _] = mesh.positions[b as usize];
            let [cx, cy, _] = mesh.positions[c as usize];
            let area = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
            assert!(area > 0.0);
        }
    }

    #[test]
    fn rejects_inverted_radii() {
        let params = AnnulusParams {
            inner_radius: 0.9,
            outer_radius: 0.2,
            ..Default::default()
        };
        assert!(annulus(&params, &fastrand::Rng::with_seed(1)).is_err());
    }
}

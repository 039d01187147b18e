use anyhow::ensure;

use super::{circle_point, random_color, Mesh};

#[derive(Clone, Copy, Debug)]
pub struct DiscParams {
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Rim vertices, alternating between the outer and the inner radius.
    pub points: usize,
}

impl Default for DiscParams {
    fn default() -> Self {
        DiscParams {
            outer_radius: 0.8,
            inner_radius: 0.5,
            points: 24,
        }
    }
}

const CENTRE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// A star-shaped disc: a triangle fan around a centre vertex whose rim alternates between two
/// radii.
pub fn two_radius_disc(params: &DiscParams, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
    ensure!(
        params.points >= 4 && params.points % 2 == 0,
        "disc needs an even number of rim points (at least 4), got {}",
        params.points
    );

    let points = params.points;
    let rim_colors = [random_color(rng), random_color(rng)];
    let mut mesh = Mesh::with_capacity(points + 1, points);

    let centre = mesh.push_vertex([0.0, 0.0, 0.0], CENTRE_COLOR);
    for k in 0..points {
        let radius = if k % 2 == 0 {
            params.outer_radius
        } else {
            params.inner_radius
        };
        let (x, y) = circle_point(radius, k, points);
        mesh.push_vertex([x, y, 0.0], rim_colors[k % 2]);
    }

    for k in 0..points {
        let rim = 1 + k as u32;
        let next = 1 + ((k + 1) % points) as u32;
        mesh.push_triangle(centre, rim, next);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts() {
        let mesh = two_radius_disc(&DiscParams::default(), &fastrand::Rng::with_seed(5)).unwrap();
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.triangle_count(), 24);
        mesh.validate().unwrap();
    }

    #[test]
    fn rim_alternates_radii() {
        let params = DiscParams::default();
        let mesh = two_radius_disc(&params, &fastrand::Rng::with_seed(5)).unwrap();
        for (k, [x, y, _]) in mesh.positions.iter().skip(1).enumerate() {
            let radius = (x * x + y * y).sqrt() as f64;
            let expected = if k % 2 == 0 {
                params.outer_radius
            } else {
                params.inner_radius
            };
            assert!((radius - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn fan_closes_on_first_rim_vertex() {
        let mesh = two_radius_disc(&DiscParams::default(), &fastrand::Rng::with_seed(5)).unwrap();
        assert_eq!(mesh.triangles().last(), Some([0, 24, 1]));
    }

    #[test]
    fn rejects_odd_point_count() {
        let params = DiscParams {
            points: 7,
            ..Default::default()
        };
        assert!(two_radius_disc(&params, &fastrand::Rng::with_seed(5)).is_err());
    }
}

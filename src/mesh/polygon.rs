use anyhow::ensure;

use super::{circle_point, random_color, Mesh};

#[derive(Clone, Copy, Debug)]
pub struct PolygonParams {
    pub radius: f64,
    pub sides: usize,
}

impl Default for PolygonParams {
    fn default() -> Self {
        PolygonParams {
            radius: 0.7,
            sides: 6,
        }
    }
}

/// Regular polygon in the z = 0 plane, fanned from its first corner.
pub fn polygon(params: &PolygonParams, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
    ensure!(
        params.sides >= 3,
        "polygon needs at least 3 sides, got {}",
        params.sides
    );

    let sides = params.sides;
    let mut mesh = Mesh::with_capacity(sides, sides - 2);

    for k in 0..sides {
        let (x, y) = circle_point(params.radius, k, sides);
        mesh.push_vertex([x, y, 0.0], random_color(rng));
    }
    for k in 1..sides as u32 - 1 {
        mesh.push_triangle(0, k, k + 1);
    }

    Ok(mesh)
}

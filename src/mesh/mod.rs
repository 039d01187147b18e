// Note to self: generators are pure functions of their params and a seeded Rng so the
// counts are testable and the colors reproducible.
pub use self::annulus::{annulus, AnnulusParams};
pub use self::cubes::{nested_cubes, NestedCubesParams};
pub use self::disc::{two_radius_disc, DiscParams};
pub use self::polygon::{polygon, PolygonParams};
pub use self::torus::{torus, TorusParams};

mod annulus;
mod cubes;
mod disc;
mod polygon;
mod torus;

use std::{f64::consts::TAU, fmt};

use anyhow::{anyhow, ensure};

pub type Color = [f32; 3];

/// Vertex positions, a parallel list of per-vertex colors, and a triangle list indexing into them.
#[derive(Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Mesh {
            positions: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: [f32; 3], color: Color) -> u32 {
        self.positions.push(position);
        self.colors.push(color);
        (self.positions.len() - 1) as u32
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Checks that colors match positions and every index refers to an existing vertex.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.positions.len() == self.colors.len(),
            "mesh has {} positions but {} colors",
            self.positions.len(),
            self.colors.len()
        );
        ensure!(
            self.indices.len() % 3 == 0,
            "index count {} is not a multiple of 3",
            self.indices.len()
        );
        if let Some(index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(anyhow!(
                "index {} out of range for {} vertices",
                index,
                self.positions.len()
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh vertex_count: {}, triangle_count: {}",
            self.vertex_count(),
            self.triangle_count()
        )
    }
}

pub(crate) fn random_color(rng: &fastrand::Rng) -> Color {
    [rng.f32(), rng.f32(), rng.f32()]
}

/// Point on a circle of `radius` at sample `index` of `samples`, as (x, y).
pub(crate) fn circle_point(radius: f64, index: usize, samples: usize) -> (f32, f32) {
    let (sin, cos) = (TAU * index as f64 / samples as f64).sin_cos();
    ((cos * radius) as f32, (sin * radius) as f32)
}

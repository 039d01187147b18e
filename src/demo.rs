use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use crate::{
    input::KeyBindings,
    mesh::{
        annulus, nested_cubes, polygon, torus, two_radius_disc, AnnulusParams, DiscParams, Mesh,
        NestedCubesParams, PolygonParams, TorusParams,
    },
    state::Spin,
};

#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Torus(TorusParams),
    Annulus(AnnulusParams),
    Disc(DiscParams),
    NestedCubes(NestedCubesParams),
    Polygon(PolygonParams),
}

impl Shape {
    pub fn generate(&self, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
        match self {
            Shape::Torus(params) => torus(params, rng),
            Shape::Annulus(params) => annulus(params, rng),
            Shape::Disc(params) => two_radius_disc(params, rng),
            Shape::NestedCubes(params) => nested_cubes(params, rng),
            Shape::Polygon(params) => polygon(params, rng),
        }
    }
}

/// One demo variant: what to draw and how the keyboard turns it.
#[derive(Clone, Debug)]
pub struct Demo {
    pub title: &'static str,
    pub shape: Shape,
    pub bindings: KeyBindings,
    pub spin: Option<Spin>,
    /// Flat shapes keep both sides visible.
    pub cull_back_faces: bool,
}

impl Demo {
    /// The torus, turning half a degree about y sixteen times a second.
    pub fn torus() -> Self {
        Demo {
            title: "Gorus",
            shape: Shape::Torus(TorusParams::default()),
            bindings: KeyBindings::default(),
            spin: Some(Spin {
                ticks_per_second: 16,
                deg_z: 0.0,
                deg_x: 0.0,
                deg_y: 0.5,
            }),
            cull_back_faces: true,
        }
    }

    pub fn annulus() -> Self {
        Demo {
            title: "Gorus - Annulus",
            shape: Shape::Annulus(AnnulusParams::default()),
            bindings: KeyBindings::default(),
            spin: None,
            cull_back_faces: false,
        }
    }

    pub fn disc() -> Self {
        Demo {
            title: "Gorus - Disc",
            shape: Shape::Disc(DiscParams::default()),
            bindings: KeyBindings::default(),
            spin: None,
            cull_back_faces: false,
        }
    }

    pub fn nested_cubes() -> Self {
        Demo {
            title: "Gorus - Cubes",
            shape: Shape::NestedCubes(NestedCubesParams::default()),
            bindings: KeyBindings::default(),
            spin: None,
            cull_back_faces: true,
        }
    }

    pub fn polygon() -> Self {
        Demo {
            title: "Gorus - Polygon",
            shape: Shape::Polygon(PolygonParams::default()),
            bindings: KeyBindings::in_plane(),
            spin: None,
            cull_back_faces: false,
        }
    }

    /// Builds the mesh with colors seeded from the clock.
    pub fn build_mesh(&self) -> anyhow::Result<Mesh> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        info!("Color seed {seed}");
        self.build_mesh_with(&fastrand::Rng::with_seed(seed))
    }

    pub fn build_mesh_with(&self, rng: &fastrand::Rng) -> anyhow::Result<Mesh> {
        let mesh = self.shape.generate(rng)?;
        info!("{} built {mesh:?}", self.title);
        Ok(mesh)
    }
}

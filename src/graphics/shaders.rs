use vulkano::{buffer::BufferContents, pipeline::graphics::vertex_input::Vertex};

use crate::mesh::Mesh;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, BufferContents, Vertex)]
pub struct VertexPositionColor {
    #[format(R32G32B32_SFLOAT)]
    pub position: [f32; 3],
    #[format(R32G32B32_SFLOAT)]
    pub color: [f32; 3],
}

impl VertexPositionColor {
    /// Interleaves a mesh's parallel position and color lists.
    pub fn from_mesh(mesh: &Mesh) -> Vec<VertexPositionColor> {
        mesh.positions
            .iter()
            .zip(&mesh.colors)
            .map(|(&position, &color)| VertexPositionColor { position, color })
            .collect()
    }
}

pub mod vs_position_color {
    vulkano_shaders::shader! {
        ty: "vertex",
        path: "assets/shaders/basic/vert.glsl"
    }
}

pub mod fs_basic {
    vulkano_shaders::shader! {
        ty: "fragment",
        path: "assets/shaders/basic/frag.glsl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_positions_and_colors() {
        let mut mesh = Mesh::default();
        mesh.push_vertex([1.0, 2.0, 3.0], [0.1, 0.2, 0.3]);
        mesh.push_vertex([4.0, 5.0, 6.0], [0.4, 0.5, 0.6]);

        let vertices = VertexPositionColor::from_mesh(&mesh);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [4.0, 5.0, 6.0]);
        assert_eq!(vertices[1].color, [0.4, 0.5, 0.6]);
    }
}

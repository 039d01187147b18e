use std::sync::Arc;

use anyhow::Context;
use vulkano::{
    buffer::{Buffer, BufferCreateInfo, BufferUsage, Subbuffer},
    memory::allocator::{AllocationCreateInfo, MemoryAllocator, MemoryTypeFilter},
};

use crate::mesh::Mesh;

use super::shaders::VertexPositionColor;

#[derive(Default)]
pub struct MeshBuilder {
    vertices: Option<Vec<VertexPositionColor>>,
    indices: Option<Vec<u32>>,
}

impl MeshBuilder {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        MeshBuilder::default()
            .with_vertices(VertexPositionColor::from_mesh(mesh))
            .with_indices(mesh.indices.clone())
    }

    pub fn with_vertices(mut self, value: Vec<VertexPositionColor>) -> Self {
        self.vertices = Some(value);
        self
    }

    pub fn with_indices(mut self, value: Vec<u32>) -> Self {
        self.indices = Some(value);
        self
    }

    pub fn build(self, memory_allocator: Arc<dyn MemoryAllocator>) -> anyhow::Result<GpuMesh> {
        let vertices = self.vertices.unwrap_or_default();

        let vertex_buffer = Buffer::from_iter(
            memory_allocator.clone(),
            BufferCreateInfo {
                usage: BufferUsage::VERTEX_BUFFER,
                ..Default::default()
            },
            AllocationCreateInfo {
                memory_type_filter: MemoryTypeFilter::PREFER_DEVICE
                    | MemoryTypeFilter::HOST_SEQUENTIAL_WRITE,
                ..Default::default()
            },
            vertices,
        )
        .context("creating vertex buffer")?;

        let indices = self.indices.unwrap_or_default();
        let index_buffer = Buffer::from_iter(
            memory_allocator,
            BufferCreateInfo {
                usage: BufferUsage::INDEX_BUFFER,
                ..Default::default()
            },
            AllocationCreateInfo {
                memory_type_filter: MemoryTypeFilter::PREFER_DEVICE
                    | MemoryTypeFilter::HOST_SEQUENTIAL_WRITE,
                ..Default::default()
            },
            indices,
        )
        .context("creating index buffer")?;

        Ok(GpuMesh {
            vertex_buffer,
            index_buffer,
        })
    }
}

pub struct GpuMesh {
    pub vertex_buffer: Subbuffer<[VertexPositionColor]>,
    pub index_buffer: Subbuffer<[u32]>,
}

impl GpuMesh {
    pub fn index_count(&self) -> u32 {
        self.index_buffer.len() as u32
    }
}

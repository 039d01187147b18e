// Only the renderer leaves this module; buffers, shaders and pipeline setup stay private.
pub use self::renderer::Renderer;

mod helpers;
mod mesh;
mod renderer;
mod shaders;

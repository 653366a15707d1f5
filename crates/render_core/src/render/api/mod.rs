//! Public rendering API
//!
//! The backend-polymorphic renderer contract and the types that cross it.

pub mod render_backend;
pub mod resources;

pub use render_backend::{ContextInitParameters, Renderer, RendererBackend};
pub use resources::{
    BufferDesc, BufferHandle, BufferUsage, FilterMode, ResourceHandle, SamplerDesc, SamplerHandle, TextureDesc,
    TextureFormat, TextureHandle, WrapMode,
};

//! Immediate-mode dynamic drawing
//!
//! [`DynamicDrawer`] owns a pair of CPU-writable buffers that are refilled
//! every frame with ad-hoc geometry (debug lines, UI quads). Bring-up only
//! sizes and allocates them; the drawer needs the shared default texture and
//! sampler for untextured geometry, so it comes up after the resource manager.

use crate::config::DynamicDrawerConfig;
use crate::render::api::{BufferDesc, BufferHandle, BufferUsage, Renderer, SamplerHandle, TextureHandle};
use crate::render::resources::{DefaultSampler, DefaultTexture, RenderResourceManager};
use crate::render::{RenderError, RenderResult};

/// Bytes per dynamic vertex: position (3 x f32), uv (2 x f32), packed RGBA8 color
pub const VERTEX_STRIDE: u64 = 24;

/// Bytes per index (u32 indices)
pub const INDEX_SIZE: u64 = 4;

#[derive(Debug, Clone, Copy)]
struct DrawerResources {
    vertices: BufferHandle,
    indices: BufferHandle,
    texture: TextureHandle,
    sampler: SamplerHandle,
}

/// Immediate-mode drawer
#[derive(Debug)]
pub struct DynamicDrawer {
    config: DynamicDrawerConfig,
    resources: Option<DrawerResources>,
}

impl DynamicDrawer {
    /// Create an uninitialized drawer with the given buffer sizing
    pub const fn new(config: DynamicDrawerConfig) -> Self {
        Self { config, resources: None }
    }

    /// Buffer sizing this drawer was created with
    pub const fn config(&self) -> &DynamicDrawerConfig {
        &self.config
    }

    /// Allocate the dynamic buffers
    ///
    /// Requires an initialized resource manager providing the white texture and
    /// the linear sampler, and a renderer with a live main context. On failure
    /// nothing stays allocated. Initializing an initialized drawer is a no-op.
    pub fn initialize(&mut self, renderer: &mut dyn Renderer, shared: &RenderResourceManager) -> RenderResult<()> {
        if self.resources.is_some() {
            log::debug!("Dynamic drawer already initialized");
            return Ok(());
        }

        if !shared.is_initialized() {
            return Err(RenderError::InitializationFailed(
                "render resource manager must be initialized before the dynamic drawer".to_string(),
            ));
        }
        if renderer.main_context().is_none() {
            return Err(RenderError::InitializationFailed(
                "dynamic drawer needs a main rendering context".to_string(),
            ));
        }

        let texture = shared.texture(DefaultTexture::White).ok_or_else(|| {
            RenderError::InitializationFailed("default white texture is unavailable".to_string())
        })?;
        let sampler = shared.sampler(DefaultSampler::LinearWrap).ok_or_else(|| {
            RenderError::InitializationFailed("default linear sampler is unavailable".to_string())
        })?;

        let vertices = renderer.create_buffer(&BufferDesc {
            label: "dynamic_vertices",
            size: u64::from(self.config.max_vertices) * VERTEX_STRIDE,
            usage: BufferUsage::VERTEX | BufferUsage::DYNAMIC,
        })?;

        let indices = match renderer.create_buffer(&BufferDesc {
            label: "dynamic_indices",
            size: u64::from(self.config.max_indices) * INDEX_SIZE,
            usage: BufferUsage::INDEX | BufferUsage::DYNAMIC,
        }) {
            Ok(handle) => handle,
            Err(e) => {
                renderer.release(vertices.into());
                return Err(e);
            }
        };

        self.resources = Some(DrawerResources {
            vertices,
            indices,
            texture,
            sampler,
        });
        log::info!(
            "Dynamic drawer initialized ({} vertices, {} indices)",
            self.config.max_vertices,
            self.config.max_indices
        );
        Ok(())
    }

    /// Whether the dynamic buffers are allocated
    pub const fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    /// Dynamic vertex buffer
    pub fn vertex_buffer(&self) -> Option<BufferHandle> {
        self.resources.map(|r| r.vertices)
    }

    /// Dynamic index buffer
    pub fn index_buffer(&self) -> Option<BufferHandle> {
        self.resources.map(|r| r.indices)
    }

    /// Texture and sampler bound for untextured geometry
    pub fn default_binding(&self) -> Option<(TextureHandle, SamplerHandle)> {
        self.resources.map(|r| (r.texture, r.sampler))
    }

    /// Free the dynamic buffers
    ///
    /// The texture and sampler belong to the resource manager and are left alone.
    pub fn release(&mut self, renderer: &mut dyn Renderer) {
        if let Some(resources) = self.resources.take() {
            renderer.release(resources.vertices.into());
            renderer.release(resources.indices.into());
            log::debug!("Dynamic drawer buffers released");
        }
    }
}

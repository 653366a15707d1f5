//! OpenGL-family backend
//!
//! An OpenGL context is created inside, and dies with, its native window.
//! Bring-up therefore shuts this renderer down as soon as the main window is
//! reported destroyed.

use crate::render::api::{
    BufferDesc, BufferHandle, ContextInitParameters, Renderer, RendererBackend, ResourceHandle, SamplerDesc,
    SamplerHandle, TextureDesc, TextureHandle,
};
use crate::render::RenderResult;

use super::common::BackendState;

/// Factory for [`OpenGlRenderer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGlBackend;

impl RendererBackend for OpenGlBackend {
    fn name(&self) -> &'static str {
        "OpenGL"
    }

    fn context_bound_to_window(&self) -> bool {
        true
    }

    fn create_renderer(&self) -> RenderResult<Box<dyn Renderer>> {
        Ok(Box::new(OpenGlRenderer::new()))
    }
}

/// OpenGL renderer
#[derive(Debug)]
pub struct OpenGlRenderer {
    state: BackendState,
    /// Swap interval applied to the main context: 1 with vsync, 0 without
    swap_interval: u32,
}

impl OpenGlRenderer {
    /// Create an uninitialized renderer
    pub fn new() -> Self {
        Self {
            state: BackendState::new("OpenGL"),
            swap_interval: 0,
        }
    }

    /// Swap interval of the main context
    pub const fn swap_interval(&self) -> u32 {
        self.swap_interval
    }
}

impl Default for OpenGlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for OpenGlRenderer {
    fn backend_name(&self) -> &'static str {
        self.state.name()
    }

    fn initialize(&mut self) -> RenderResult<()> {
        self.state.mark_initialized();
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    fn create_main_context(&mut self, params: &ContextInitParameters) -> RenderResult<()> {
        self.state.attach_context(params)?;
        self.swap_interval = u32::from(params.vsync);
        log::debug!("OpenGL swap interval set to {}", self.swap_interval);
        Ok(())
    }

    fn main_context(&self) -> Option<&ContextInitParameters> {
        self.state.context()
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> RenderResult<TextureHandle> {
        self.state.create_texture(desc)
    }

    fn create_sampler(&mut self, desc: &SamplerDesc) -> RenderResult<SamplerHandle> {
        self.state.create_sampler(desc)
    }

    fn create_buffer(&mut self, desc: &BufferDesc) -> RenderResult<BufferHandle> {
        self.state.create_buffer(desc)
    }

    fn release(&mut self, resource: ResourceHandle) {
        self.state.release(resource);
    }

    fn live_resource_count(&self) -> usize {
        self.state.live_resource_count()
    }

    fn shutdown(&mut self) {
        if self.state.shutdown() {
            self.swap_interval = 0;
        }
    }
}

//! Direct3D-family backend
//!
//! The device is created against a window but is not destroyed with it, so
//! this renderer is only torn down by regular shutdown.

use crate::render::api::{
    BufferDesc, BufferHandle, ContextInitParameters, Renderer, RendererBackend, ResourceHandle, SamplerDesc,
    SamplerHandle, TextureDesc, TextureHandle,
};
use crate::render::{RenderError, RenderResult};

use super::common::BackendState;

/// Factory for [`Direct3dRenderer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct3dBackend;

impl RendererBackend for Direct3dBackend {
    fn name(&self) -> &'static str {
        "Direct3D 9"
    }

    fn context_bound_to_window(&self) -> bool {
        false
    }

    fn create_renderer(&self) -> RenderResult<Box<dyn Renderer>> {
        Ok(Box::new(Direct3dRenderer::new()))
    }
}

/// Presentation interval of a Direct3D swap chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentInterval {
    /// Present immediately, may tear
    Immediate,
    /// Wait for vertical blank
    One,
}

/// Direct3D renderer
#[derive(Debug)]
pub struct Direct3dRenderer {
    state: BackendState,
    present_interval: Option<PresentInterval>,
}

impl Direct3dRenderer {
    /// Create an uninitialized renderer
    pub fn new() -> Self {
        Self {
            state: BackendState::new("Direct3D 9"),
            present_interval: None,
        }
    }

    /// Presentation interval of the main swap chain, if one exists
    pub const fn present_interval(&self) -> Option<PresentInterval> {
        self.present_interval
    }
}

impl Default for Direct3dRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for Direct3dRenderer {
    fn backend_name(&self) -> &'static str {
        self.state.name()
    }

    fn initialize(&mut self) -> RenderResult<()> {
        if !cfg!(target_os = "windows") {
            return Err(RenderError::InitializationFailed(
                "Direct3D is only available on Windows".to_string(),
            ));
        }
        self.state.mark_initialized();
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    fn create_main_context(&mut self, params: &ContextInitParameters) -> RenderResult<()> {
        self.state.attach_context(params)?;
        self.present_interval = Some(if params.vsync {
            PresentInterval::One
        } else {
            PresentInterval::Immediate
        });
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
            self.present_interval = None;
        }
    }
}

//! Backend abstraction traits for the rendering system
//!
//! [`Renderer`] is the contract every graphics backend implements;
//! [`RendererBackend`] is the factory that produces one. Exactly one factory is
//! compiled into a binary (see [`crate::render::backends`]), and bring-up only
//! ever talks to the renderer through this trait.

use crate::config::DisplaySettings;
use crate::render::window::NativeHandle;
use crate::render::RenderResult;

use super::resources::{BufferDesc, BufferHandle, ResourceHandle, SamplerDesc, SamplerHandle, TextureDesc, TextureHandle};

/// Parameters for creating the main rendering context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextInitParameters {
    /// Native handle of the window the context presents to
    pub window: NativeHandle,
    /// Backbuffer width in pixels
    pub display_width: u32,
    /// Backbuffer height in pixels
    pub display_height: u32,
    /// Exclusive fullscreen presentation
    pub fullscreen: bool,
    /// Synchronize presentation to the display refresh
    pub vsync: bool,
}

impl ContextInitParameters {
    /// Build context parameters for a freshly created window
    pub const fn new(window: NativeHandle, display: &DisplaySettings) -> Self {
        Self {
            window,
            display_width: display.width,
            display_height: display.height,
            fullscreen: display.fullscreen,
            vsync: display.vsync,
        }
    }
}

/// Main renderer trait
///
/// Draw submission and shader management live behind backend-specific APIs;
/// this trait only covers lifetime, the main context, and the shared resource
/// creation the resource layers need.
pub trait Renderer {
    /// Human-readable backend name for diagnostics
    fn backend_name(&self) -> &'static str;

    /// Bring up the graphics API (device, driver checks)
    fn initialize(&mut self) -> RenderResult<()>;

    /// Whether [`Renderer::initialize`] succeeded and no shutdown happened since
    fn is_initialized(&self) -> bool;

    /// Create the primary context bound to the application's window
    fn create_main_context(&mut self, params: &ContextInitParameters) -> RenderResult<()>;

    /// Parameters of the live main context, if any
    fn main_context(&self) -> Option<&ContextInitParameters>;

    /// Create a texture
    fn create_texture(&mut self, desc: &TextureDesc) -> RenderResult<TextureHandle>;

    /// Create a sampler
    fn create_sampler(&mut self, desc: &SamplerDesc) -> RenderResult<SamplerHandle>;

    /// Create a GPU buffer
    fn create_buffer(&mut self, desc: &BufferDesc) -> RenderResult<BufferHandle>;

    /// Release a resource created by this renderer
    ///
    /// Releasing an unknown or already released handle is a no-op.
    fn release(&mut self, resource: ResourceHandle);

    /// Number of resources created and not yet released
    fn live_resource_count(&self) -> usize;

    /// Tear down the main context and the graphics API
    ///
    /// Must be idempotent: the destroyed-window path may shut a renderer down
    /// before regular teardown does it again.
    fn shutdown(&mut self);
}

/// Factory for the compiled-in renderer
pub trait RendererBackend {
    /// Backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Whether the backend's rendering context cannot outlive its window
    ///
    /// When true, the renderer is shut down as soon as the main window is
    /// reported destroyed.
    fn context_bound_to_window(&self) -> bool;

    /// Instantiate the renderer
    fn create_renderer(&self) -> RenderResult<Box<dyn Renderer>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_parameters_copy_display_settings() {
        let display = DisplaySettings {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        };
        let params = ContextInitParameters::new(NativeHandle::from_raw(0xBEEF), &display);

        assert_eq!(params.window.as_raw(), 0xBEEF);
        assert_eq!((params.display_width, params.display_height), (1280, 720));
        assert!(!params.fullscreen);
        assert!(params.vsync);
    }
}

//! # Rendering System
//!
//! Everything bring-up needs to stand a renderer up and tear it down again,
//! behind a backend-agnostic interface.
//!
//! ## Architecture
//!
//! - **Window**: platform window manager and the windows it owns
//! - **Api**: the [`Renderer`] contract and the [`RendererBackend`] factory
//! - **Backends**: the OpenGL and Direct3D implementations, one compiled in
//! - **Resources**: default textures and samplers shared by all render layers
//! - **Systems**: higher render layers, currently the immediate-mode drawer
//! - **Registry**: [`RenderSystems`], the owner of every render-side singleton

use thiserror::Error;

// Public modules for application use
pub mod window;
pub mod api;

/// Graphics backend implementations
///
/// Exactly one backend is selected at build time through cargo features.
pub mod backends;

// Resources
pub mod resources;

// Systems
pub mod systems;

mod registry;

pub use api::{ContextInitParameters, Renderer, RendererBackend};
pub use registry::RenderSystems;
pub use resources::{DefaultSampler, DefaultTexture, RenderResourceManager};
pub use systems::dynamic::DynamicDrawer;

/// High-level rendering error types
///
/// Represents errors raised by the renderer and the resource layers built on
/// it, abstracted from the graphics API behind the selected backend.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Renderer initialization failed during setup
    ///
    /// Occurs when the graphics API cannot be brought up, typically due to
    /// missing drivers or an unsupported platform.
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (buffers, textures, samplers) cannot be
    /// created, typically because no context exists yet or the request is invalid.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

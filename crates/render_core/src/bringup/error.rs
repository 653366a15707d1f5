//! Bring-up error taxonomy

use thiserror::Error;

use crate::render::window::WindowError;
use crate::render::RenderError;

/// Why [`RendererInitialization::initialize`](super::RendererInitialization::initialize) failed
///
/// Every variant must be followed by
/// [`RendererInitialization::shutdown`](super::RendererInitialization::shutdown),
/// which cleans up whatever was left standing.
#[derive(Error, Debug)]
pub enum InitError {
    /// No window manager is installed in the registry
    ///
    /// Nothing was created. Usually means the application runs without a
    /// display and bring-up was attempted anyway.
    #[error("No window manager is installed")]
    NoWindowManager,

    /// The compiled-in backend could not instantiate a renderer
    #[error("Failed to create the renderer: {0}")]
    BackendCreateFailed(#[source] RenderError),

    /// The renderer could not bring up its graphics API; the renderer was destroyed
    #[error("Failed to initialize the renderer: {0}")]
    BackendInitFailed(#[source] RenderError),

    /// The platform refused the main window; the renderer was destroyed
    #[error("Failed to create the main window: {0}")]
    WindowCreateFailed(#[source] WindowError),

    /// The main rendering context could not be created
    #[error("Failed to create the main rendering context: {0}")]
    ContextCreateFailed(#[source] RenderError),

    /// The dynamic drawer could not allocate its buffers
    #[error("Failed to initialize the dynamic drawer: {0}")]
    DynamicDrawerInitFailed(#[source] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_source_is_preserved() {
        let error = InitError::ContextCreateFailed(RenderError::BackendError("no pixel format".to_string()));
        assert_eq!(
            error.to_string(),
            "Failed to create the main rendering context: Backend error: no pixel format"
        );
        assert!(error.source().is_some());
        assert!(InitError::NoWindowManager.source().is_none());
    }
}

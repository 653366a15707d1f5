//! Window management subsystem
//!
//! The window layer is consumed through two traits:
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     RendererInitialization      │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowManager   │ ← creates, destroys, pumps events
//!      └────────┬────────┘
//!               │ Owns
//!      ┌────────▼────────┐
//!      │ Window          │ ← native surface + destroyed notification
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ headless::*           │ ← in-memory platform (tools, tests)
//!   │ glfw_platform::*      │ ← native windows (`glfw-platform`)
//!   └───────────────────────┘
//! ```
//!
//! Window destruction is asynchronous: [`Window::destroy`] only requests it,
//! and the platform completes it during a later [`WindowManager::update`],
//! at which point the window's destroyed callback fires.

mod headless;

#[cfg(feature = "glfw-platform")]
mod glfw_platform;

pub use headless::{HeadlessWindowManager, UserInput};

#[cfg(feature = "glfw-platform")]
pub use glfw_platform::GlfwWindowManager;

use thiserror::Error;

slotmap::new_key_type! {
    /// Stable identity of a window owned by a [`WindowManager`]
    ///
    /// Ids are never reused, so a stale id simply stops resolving.
    pub struct WindowId;
}

/// Platform handle of a native window, passed to the renderer for context creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    /// Wrap a raw platform handle value
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The raw platform handle value
    pub const fn as_raw(self) -> usize {
        self.0
    }

    /// Whether the handle refers to no window at all
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Callback fired once, after the platform has actually destroyed a window
pub type DestroyedCallback = Box<dyn FnMut(WindowId)>;

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowParameters {
    /// Title bar text
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Create the window in exclusive fullscreen
    pub fullscreen: bool,
}

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The platform layer could not be initialized
    #[error("Window system initialization failed")]
    InitializationFailed,

    /// The platform refused to create the window
    #[error("Window creation failed: {0}")]
    CreationFailed(String),

    /// The manager has already been shut down
    #[error("Window manager is shut down")]
    ManagerShutDown,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// A native on-screen surface owned by a [`WindowManager`]
pub trait Window {
    /// Identity of this window within its manager
    fn id(&self) -> WindowId;

    /// Native handle for rendering context creation
    fn handle(&self) -> NativeHandle;

    /// Current client area size in pixels
    fn size(&self) -> (u32, u32);

    /// Whether the window was created fullscreen
    fn is_fullscreen(&self) -> bool;

    /// Request destruction
    ///
    /// The window stays alive until the manager's next [`WindowManager::update`]
    /// completes the destruction and fires the destroyed callback.
    fn destroy(&mut self);

    /// Install the callback fired after the window is actually destroyed
    ///
    /// Replaces any previously installed callback.
    fn set_on_destroyed(&mut self, callback: DestroyedCallback);
}

/// Creates and destroys windows and pumps platform events
pub trait WindowManager {
    /// Create a window
    fn create(&mut self, params: &WindowParameters) -> WindowResult<&mut dyn Window>;

    /// Look up a live window
    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn Window>;

    /// Number of live windows
    fn window_count(&self) -> usize;

    /// Pump platform events
    ///
    /// Completes pending window destructions and fires their callbacks on the
    /// calling thread.
    fn update(&mut self);

    /// Ask the application's event loop to stop
    fn request_quit(&mut self);

    /// Whether a quit was requested
    fn quit_requested(&self) -> bool;

    /// Destroy all remaining windows and release the platform layer
    fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_handle_null() {
        assert!(NativeHandle::from_raw(0).is_null());
        assert!(!NativeHandle::from_raw(0x1000).is_null());
        assert_eq!(NativeHandle::from_raw(42).as_raw(), 42);
    }
}

//! # Render Core
//!
//! Renderer bring-up and teardown for a single-window engine.
//!
//! The crate sequences the windowing layer, the compiled-in graphics backend,
//! and the resource layers that sit on top of it, and tears them down again in
//! strict reverse order. Teardown may be started by the application
//! ([`RendererInitialization::shutdown`]) or by the platform when the user
//! closes the main window.
//!
//! ## Features
//!
//! - **Build-time backend selection**: `backend-gl` (default) or `backend-d3d`
//! - **Explicit subsystem registry**: no ambient globals, see [`RenderSystems`]
//! - **Headless windowing**: deterministic window manager for tools and tests
//! - **Native windowing**: GLFW window manager behind `glfw-platform`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use render_core::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BringupConfig::default();
//!     render_core::foundation::logging::init(&config.logging);
//!
//!     let mut systems = RenderSystems::new();
//!     systems.install_window_manager(Box::new(HeadlessWindowManager::new()));
//!
//!     let mut bringup = RendererInitialization::new(&config.graphics);
//!     if let Err(e) = bringup.initialize(&mut systems, &config.graphics) {
//!         log::error!("Renderer bring-up failed: {}", e);
//!         bringup.shutdown(&mut systems);
//!         return Err(e.into());
//!     }
//!
//!     while !bringup.quit_requested(&systems) {
//!         bringup.pump_events(&mut systems);
//!         # break;
//!     }
//!
//!     bringup.shutdown(&mut systems);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

#[cfg(all(feature = "backend-gl", feature = "backend-d3d"))]
compile_error!("features `backend-gl` and `backend-d3d` are mutually exclusive; build with `--no-default-features` to pick one");

#[cfg(not(any(feature = "backend-gl", feature = "backend-d3d")))]
compile_error!("exactly one renderer backend feature (`backend-gl` or `backend-d3d`) must be enabled");

pub mod bringup;
pub mod config;
pub mod foundation;
pub mod render;

#[cfg(test)]
mod testing;

pub use bringup::{InitError, RendererInitialization, ShutdownSummary, TornDown, WindowWait};
pub use render::RenderSystems;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        bringup::{InitError, RendererInitialization, ShutdownSummary, WindowWait},
        config::{BringupConfig, Config, ConfigError, DisplaySettings, GraphicsConfig, LoggingConfig},
        render::{
            backends::SelectedBackend,
            window::{HeadlessWindowManager, Window, WindowId, WindowManager, WindowParameters},
            RenderError, RenderSystems, Renderer, RendererBackend,
        },
    };
}

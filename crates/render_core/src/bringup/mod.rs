//! # Renderer Bring-up
//!
//! [`RendererInitialization`] stands up the render stack in dependency order
//! and tears it down again in reverse:
//!
//! ```text
//! initialize:  renderer → main window → main context → resource manager → dynamic drawer
//! shutdown:    dynamic drawer → resource manager → renderer → main window → window manager
//! ```
//!
//! Teardown has two entry points. The application calls
//! [`RendererInitialization::shutdown`]; the platform may also destroy the main
//! window on its own (the user closed it), which is delivered as a destroyed
//! notification during [`RendererInitialization::pump_events`]. Both paths may
//! run in either order, and `shutdown` may be called any number of times.

mod error;
mod main_window;
mod summary;


pub use error::InitError;
pub use summary::{ShutdownSummary, TornDown, WindowWait};

use std::time::Instant;

use crate::config::{GraphicsConfig, ShutdownConfig};
use crate::render::api::{ContextInitParameters, RendererBackend};
use crate::render::backends::SelectedBackend;
use crate::render::window::{WindowId, WindowParameters};
use crate::render::{RenderError, RenderSystems};

use main_window::{DestroyedInbox, MainWindow};

/// Renderer bring-up and teardown orchestrator
///
/// Owns nothing but the identity of the main window; every subsystem lives in
/// the [`RenderSystems`] registry passed to each call.
pub struct RendererInitialization<B: RendererBackend = SelectedBackend> {
    backend: B,
    window_title: String,
    shutdown_config: ShutdownConfig,
    main_window: MainWindow,
    destroyed: DestroyedInbox,
}

impl RendererInitialization<SelectedBackend> {
    /// Create an orchestrator for the compiled-in backend
    pub fn new(config: &GraphicsConfig) -> Self {
        Self::with_backend(SelectedBackend::default(), config)
    }
}

impl<B: RendererBackend> RendererInitialization<B> {
    /// Create an orchestrator for an explicit backend factory
    ///
    /// The window title (the application identity) and the shutdown policy
    /// are taken from `config`.
    pub fn with_backend(backend: B, config: &GraphicsConfig) -> Self {
        Self {
            backend,
            window_title: config.window_title.clone(),
            shutdown_config: config.shutdown,
            main_window: MainWindow::Absent,
            destroyed: DestroyedInbox::default(),
        }
    }

    /// The backend factory
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Id of the main window while it is alive
    pub const fn main_window(&self) -> Option<WindowId> {
        self.main_window.live_id()
    }

    /// Bring the render stack up
    ///
    /// Display settings and dynamic drawer sizing are read from `config`.
    /// Whatever the outcome, [`RendererInitialization::shutdown`] must follow:
    /// only the renderer is cleaned up here on failure, and only when no
    /// window exists yet.
    ///
    /// # Errors
    ///
    /// See [`InitError`] for the step each variant belongs to.
    pub fn initialize(&mut self, systems: &mut RenderSystems, config: &GraphicsConfig) -> Result<(), InitError> {
        if !systems.has_window_manager() {
            log::info!("No window manager installed; skipping renderer bring-up");
            return Err(InitError::NoWindowManager);
        }

        self.destroyed.clear();
        log::info!("Bringing up the {} renderer", self.backend.name());

        let renderer = systems.create_renderer(&self.backend).map_err(|e| {
            log::error!("Failed to create the {} renderer: {}", self.backend.name(), e);
            InitError::BackendCreateFailed(e)
        })?;

        if let Err(e) = renderer.initialize() {
            log::error!("Failed to initialize the {} renderer: {}", self.backend.name(), e);
            systems.destroy_renderer();
            return Err(InitError::BackendInitFailed(e));
        }

        let display = config.display;
        let params = WindowParameters {
            title: self.window_title.clone(),
            width: display.width,
            height: display.height,
            fullscreen: display.fullscreen,
        };

        let Some(window_manager) = systems.window_manager_mut() else {
            systems.destroy_renderer();
            return Err(InitError::NoWindowManager);
        };
        let (window_id, handle) = match window_manager.create(&params) {
            Ok(window) => {
                // Register before anything else can destroy the window.
                window.set_on_destroyed(self.destroyed.callback());
                (window.id(), window.handle())
            }
            Err(e) => {
                log::error!("Failed to create the main window '{}': {}", params.title, e);
                systems.destroy_renderer();
                return Err(InitError::WindowCreateFailed(e));
            }
        };
        self.main_window.start(window_id);
        log::debug!("Main window {:?} created ({}x{})", window_id, display.width, display.height);

        let context = ContextInitParameters::new(handle, &display);
        let created = systems.renderer_mut().map_or_else(
            || Err(RenderError::InitializationFailed("renderer is missing".to_string())),
            |renderer| renderer.create_main_context(&context),
        );
        if let Err(e) = created {
            log::error!("Failed to create the main rendering context: {}", e);
            return Err(InitError::ContextCreateFailed(e));
        }

        systems.initialize_resource_manager();

        if let Err(e) = systems.initialize_dynamic_drawer(config.dynamic_drawer) {
            log::error!("Failed to initialize the dynamic drawer: {}", e);
            return Err(InitError::DynamicDrawerInitFailed(e));
        }

        log::info!("Renderer bring-up complete");
        Ok(())
    }

    /// Tear the render stack down in reverse dependency order
    ///
    /// Every step tolerates its subsystem being absent, so this is safe after
    /// a failed [`RendererInitialization::initialize`], after the platform
    /// destroyed the main window, and when called repeatedly.
    pub fn shutdown(&mut self, systems: &mut RenderSystems) -> ShutdownSummary {
        let mut summary = ShutdownSummary::empty();

        if systems.destroy_dynamic_drawer() {
            log::debug!("Dynamic drawer destroyed");
            summary.torn_down |= TornDown::DYNAMIC_DRAWER;
        }

        if systems.destroy_resource_manager() {
            log::debug!("Render resource manager destroyed");
            summary.torn_down |= TornDown::RESOURCE_MANAGER;
        }

        if let Some(renderer) = systems.renderer_mut() {
            renderer.shutdown();
        }
        if systems.destroy_renderer() {
            log::debug!("Renderer destroyed");
            summary.torn_down |= TornDown::RENDERER;
        }

        if systems.has_window_manager() {
            summary.window_wait = self.destroy_main_window(systems);
            if summary.window_wait != WindowWait::NotNeeded {
                summary.torn_down |= TornDown::MAIN_WINDOW;
            }

            if let Some(window_manager) = systems.window_manager_mut() {
                window_manager.shutdown();
            }
            // An abandoned window is force-destroyed by the manager's shutdown.
            self.dispatch_destroyed(systems);

            systems.destroy_window_manager();
            log::debug!("Window manager destroyed");
            summary.torn_down |= TornDown::WINDOW_MANAGER;

            // The window cannot outlive its manager.
            if let Some(id) = self.main_window.live_id() {
                log::warn!("Main window {:?} never reported its destruction; forgetting it", id);
                self.main_window.mark_destroyed(id);
            }
        }

        if !summary.is_noop() {
            log::info!("Renderer shutdown complete ({:?})", summary.torn_down);
        }
        summary
    }

    /// Pump platform events and handle main window destruction
    ///
    /// Call once per frame while running.
    pub fn pump_events(&mut self, systems: &mut RenderSystems) {
        if let Some(window_manager) = systems.window_manager_mut() {
            window_manager.update();
        }
        self.dispatch_destroyed(systems);
    }

    /// Whether the main loop should stop
    ///
    /// True once the main window is gone or anything asked the window manager to quit.
    pub fn quit_requested(&self, systems: &RenderSystems) -> bool {
        self.main_window.is_destroyed() || systems.window_manager().is_some_and(|wm| wm.quit_requested())
    }

    /// Handle the platform's notification that `window` was destroyed
    ///
    /// [`RendererInitialization::pump_events`] and
    /// [`RendererInitialization::shutdown`] deliver notifications through this
    /// on their own. Notifications for anything other than the live main
    /// window are logged and ignored.
    pub fn on_main_window_destroyed(&mut self, systems: &mut RenderSystems, window: WindowId) {
        if self.main_window.live_id() != Some(window) {
            log::error!(
                "Destroyed notification for window {:?}, but the main window is {:?}; ignoring",
                window,
                self.main_window
            );
            return;
        }

        if self.backend.context_bound_to_window() {
            if let Some(renderer) = systems.renderer_mut() {
                log::info!(
                    "Main window destroyed; shutting down the {} renderer with its context",
                    renderer.backend_name()
                );
                renderer.shutdown();
            }
        }

        self.main_window.mark_destroyed(window);
        log::info!("Main window destroyed");

        if let Some(window_manager) = systems.window_manager_mut() {
            window_manager.request_quit();
        }
    }

    fn dispatch_destroyed(&mut self, systems: &mut RenderSystems) {
        for window in self.destroyed.drain() {
            self.on_main_window_destroyed(systems, window);
        }
    }

    /// Request destruction of the main window and wait for the platform to confirm it
    fn destroy_main_window(&mut self, systems: &mut RenderSystems) -> WindowWait {
        // Anything the platform already reported settles the state first.
        self.dispatch_destroyed(systems);

        let Some(id) = self.main_window.live_id() else {
            return WindowWait::NotNeeded;
        };
        let Some(window_manager) = systems.window_manager_mut() else {
            return WindowWait::NotNeeded;
        };
        match window_manager.window_mut(id) {
            Some(window) => window.destroy(),
            None => {
                log::warn!("Main window {:?} vanished without a destroyed notification", id);
                self.main_window.mark_destroyed(id);
                return WindowWait::NotNeeded;
            }
        }
        self.main_window.request_destroy();

        let timeout = self.shutdown_config.window_destroy_timeout();
        let started = Instant::now();
        log::debug!("Waiting for the platform to destroy the main window (timeout: {:?})", timeout);

        loop {
            if let Some(window_manager) = systems.window_manager_mut() {
                window_manager.update();
            }
            self.dispatch_destroyed(systems);

            if !self.main_window.is_live() {
                log::debug!("Main window destruction confirmed after {:?}", started.elapsed());
                return WindowWait::Confirmed;
            }
            if let Some(limit) = timeout {
                if started.elapsed() >= limit {
                    log::error!(
                        "Main window {:?} was not destroyed within {:?}; abandoning it to the window manager",
                        id,
                        limit
                    );
                    return WindowWait::TimedOut;
                }
            }
            std::thread::yield_now();
        }
    }
}

impl<B: RendererBackend + std::fmt::Debug> std::fmt::Debug for RendererInitialization<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererInitialization")
            .field("backend", &self.backend)
            .field("window_title", &self.window_title)
            .field("main_window", &self.main_window)
            .finish_non_exhaustive()
    }
}

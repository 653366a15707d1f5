//! Render subsystem registry
//!
//! [`RenderSystems`] owns at most one instance of each render-side subsystem.
//! It is created by the application and handed to bring-up by `&mut`, so
//! ownership of every singleton is visible at the call site.

use crate::config::DynamicDrawerConfig;
use crate::render::api::{Renderer, RendererBackend};
use crate::render::resources::RenderResourceManager;
use crate::render::systems::dynamic::DynamicDrawer;
use crate::render::window::WindowManager;
use crate::render::{RenderError, RenderResult};

/// Owner of the window manager, renderer, and resource layers
#[derive(Default)]
pub struct RenderSystems {
    window_manager: Option<Box<dyn WindowManager>>,
    renderer: Option<Box<dyn Renderer>>,
    resource_manager: Option<RenderResourceManager>,
    dynamic_drawer: Option<DynamicDrawer>,
}

impl RenderSystems {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Window manager ----

    /// Install the platform window manager
    ///
    /// Returns `false` and drops `window_manager` if one is already installed.
    pub fn install_window_manager(&mut self, window_manager: Box<dyn WindowManager>) -> bool {
        if self.window_manager.is_some() {
            log::warn!("A window manager is already installed; ignoring the new one");
            return false;
        }
        self.window_manager = Some(window_manager);
        true
    }

    /// Whether a window manager is installed
    pub fn has_window_manager(&self) -> bool {
        self.window_manager.is_some()
    }

    /// The installed window manager
    pub fn window_manager(&self) -> Option<&(dyn WindowManager + 'static)> {
        self.window_manager.as_deref()
    }

    /// The installed window manager, mutably
    pub fn window_manager_mut(&mut self) -> Option<&mut (dyn WindowManager + 'static)> {
        self.window_manager.as_deref_mut()
    }

    /// Drop the window manager, returning whether one was installed
    ///
    /// Call [`WindowManager::shutdown`] first; dropping does not close windows.
    pub fn destroy_window_manager(&mut self) -> bool {
        self.window_manager.take().is_some()
    }

    // ---- Renderer ----

    /// Instantiate the renderer from `backend`
    ///
    /// Fails if a renderer already exists.
    pub fn create_renderer(&mut self, backend: &dyn RendererBackend) -> RenderResult<&mut (dyn Renderer + 'static)> {
        if let Some(existing) = &self.renderer {
            return Err(RenderError::BackendError(format!(
                "a {} renderer already exists",
                existing.backend_name()
            )));
        }
        let renderer = backend.create_renderer()?;
        log::debug!("{} renderer created", renderer.backend_name());
        Ok(self.renderer.insert(renderer).as_mut())
    }

    /// Whether a renderer exists
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// The renderer
    pub fn renderer(&self) -> Option<&(dyn Renderer + 'static)> {
        self.renderer.as_deref()
    }

    /// The renderer, mutably
    pub fn renderer_mut(&mut self) -> Option<&mut (dyn Renderer + 'static)> {
        self.renderer.as_deref_mut()
    }

    /// Drop the renderer, returning whether one existed
    ///
    /// Does not call [`Renderer::shutdown`].
    pub fn destroy_renderer(&mut self) -> bool {
        self.renderer.take().is_some()
    }

    // ---- Render resource manager ----

    /// The resource manager, if created
    pub const fn resource_manager(&self) -> Option<&RenderResourceManager> {
        self.resource_manager.as_ref()
    }

    /// Create the resource manager if needed and initialize it
    ///
    /// Without a renderer the manager is created but stays uninitialized.
    pub fn initialize_resource_manager(&mut self) {
        let manager = self.resource_manager.get_or_insert_with(RenderResourceManager::new);
        match self.renderer.as_deref_mut() {
            Some(renderer) => manager.initialize(renderer),
            None => log::error!("Cannot initialize the render resource manager without a renderer"),
        }
    }

    /// Destroy the resource manager, returning whether one existed
    ///
    /// Its resources are released through the renderer if one still exists.
    pub fn destroy_resource_manager(&mut self) -> bool {
        let Some(mut manager) = self.resource_manager.take() else {
            return false;
        };
        if let Some(renderer) = self.renderer.as_deref_mut() {
            manager.release(renderer);
        }
        true
    }

    // ---- Dynamic drawer ----

    /// The dynamic drawer, if created
    pub const fn dynamic_drawer(&self) -> Option<&DynamicDrawer> {
        self.dynamic_drawer.as_ref()
    }

    /// Create the dynamic drawer if needed and initialize it
    ///
    /// `config` only applies when the drawer does not exist yet.
    pub fn initialize_dynamic_drawer(&mut self, config: DynamicDrawerConfig) -> RenderResult<()> {
        let drawer = self.dynamic_drawer.get_or_insert_with(|| DynamicDrawer::new(config));
        let renderer = self.renderer.as_deref_mut().ok_or_else(|| {
            RenderError::InitializationFailed("dynamic drawer needs a renderer".to_string())
        })?;
        let shared = self.resource_manager.as_ref().ok_or_else(|| {
            RenderError::InitializationFailed("dynamic drawer needs the render resource manager".to_string())
        })?;
        drawer.initialize(renderer, shared)
    }

    /// Destroy the dynamic drawer, returning whether one existed
    ///
    /// Its buffers are released through the renderer if one still exists.
    pub fn destroy_dynamic_drawer(&mut self) -> bool {
        let Some(mut drawer) = self.dynamic_drawer.take() else {
            return false;
        };
        if let Some(renderer) = self.renderer.as_deref_mut() {
            drawer.release(renderer);
        }
        true
    }

    /// Whether no subsystem is present
    pub fn is_empty(&self) -> bool {
        self.window_manager.is_none()
            && self.renderer.is_none()
            && self.resource_manager.is_none()
            && self.dynamic_drawer.is_none()
    }
}

impl std::fmt::Debug for RenderSystems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSystems")
            .field("window_manager", &self.window_manager.is_some())
            .field("renderer", &self.renderer.as_ref().map(|r| r.backend_name()))
            .field("resource_manager", &self.resource_manager)
            .field("dynamic_drawer", &self.dynamic_drawer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::window::HeadlessWindowManager;
    use crate::testing::{journal, MockBackend, MockSettings};

    fn backend() -> MockBackend {
        MockBackend::new(journal(), MockSettings::default())
    }

    #[test]
    fn test_window_manager_is_installed_once() {
        let mut systems = RenderSystems::new();
        assert!(systems.is_empty());
        assert!(systems.install_window_manager(Box::new(HeadlessWindowManager::new())));
        assert!(!systems.install_window_manager(Box::new(HeadlessWindowManager::new())));
        assert!(systems.has_window_manager());

        assert!(systems.destroy_window_manager());
        assert!(!systems.destroy_window_manager());
        assert!(systems.is_empty());
    }

    #[test]
    fn test_second_renderer_is_refused() {
        let mut systems = RenderSystems::new();
        let backend = backend();
        systems.create_renderer(&backend).unwrap();
        assert!(systems.create_renderer(&backend).is_err());
        assert_eq!(backend.renderers_created(), 1);

        assert!(systems.destroy_renderer());
        assert!(!systems.destroy_renderer());
    }

    #[test]
    fn test_destroying_layers_releases_their_resources() {
        let mut systems = RenderSystems::new();
        systems.create_renderer(&backend()).unwrap().initialize().unwrap();
        crate::testing::attach_context(systems.renderer_mut().unwrap());

        systems.initialize_resource_manager();
        systems.initialize_dynamic_drawer(DynamicDrawerConfig::default()).unwrap();
        assert_eq!(systems.renderer().unwrap().live_resource_count(), 7);

        assert!(systems.destroy_dynamic_drawer());
        assert_eq!(systems.renderer().unwrap().live_resource_count(), 5);
        assert!(systems.destroy_resource_manager());
        assert_eq!(systems.renderer().unwrap().live_resource_count(), 0);
        assert!(!systems.destroy_resource_manager());
    }

    #[test]
    fn test_layers_without_renderer() {
        let mut systems = RenderSystems::new();
        systems.initialize_resource_manager();
        assert!(!systems.resource_manager().unwrap().is_initialized());
        assert!(systems.initialize_dynamic_drawer(DynamicDrawerConfig::default()).is_err());

        // Still destroyable with no renderer around.
        assert!(systems.destroy_dynamic_drawer());
        assert!(systems.destroy_resource_manager());
    }
}

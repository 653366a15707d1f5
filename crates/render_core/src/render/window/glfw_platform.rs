//! Window management using GLFW
//!
//! Native windows for desktop builds. A user close request (`should_close`) is
//! treated like an application destroy: both are completed on the next
//! [`WindowManager::update`], which then fires the destroyed callback.

use slotmap::SlotMap;

use super::{DestroyedCallback, NativeHandle, Window, WindowError, WindowId, WindowManager, WindowParameters, WindowResult};

/// GLFW window wrapper with proper resource management
struct GlfwWindow {
    id: WindowId,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    fullscreen: bool,
    destroy_requested: bool,
    on_destroyed: Option<DestroyedCallback>,
}

impl Window for GlfwWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn handle(&self) -> NativeHandle {
        NativeHandle::from_raw(self.window.window_ptr() as usize)
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn destroy(&mut self) {
        self.destroy_requested = true;
    }

    fn set_on_destroyed(&mut self, callback: DestroyedCallback) {
        self.on_destroyed = Some(callback);
    }
}

/// GLFW-backed window manager
pub struct GlfwWindowManager {
    glfw: glfw::Glfw,
    windows: SlotMap<WindowId, GlfwWindow>,
    quit_requested: bool,
    shut_down: bool,
}

impl GlfwWindowManager {
    /// Initialize GLFW
    pub fn new() -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;

        // OpenGL contexts live inside GLFW windows; other backends create their own.
        #[cfg(feature = "backend-gl")]
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        #[cfg(not(feature = "backend-gl"))]
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));

        log::info!("GLFW window manager initialized");

        Ok(Self {
            glfw,
            windows: SlotMap::with_key(),
            quit_requested: false,
            shut_down: false,
        })
    }

    fn destroy_now(&mut self, id: WindowId) {
        if let Some(mut window) = self.windows.remove(id) {
            let callback = window.on_destroyed.take();
            // Dropping the PWindow destroys the native window.
            drop(window);
            log::debug!("GLFW window destroyed");
            if let Some(mut callback) = callback {
                callback(id);
            }
        }
    }
}

impl WindowManager for GlfwWindowManager {
    fn create(&mut self, params: &WindowParameters) -> WindowResult<&mut dyn Window> {
        if self.shut_down {
            return Err(WindowError::ManagerShutDown);
        }

        let created = self.glfw.with_primary_monitor(|glfw, monitor| {
            let mode = match (params.fullscreen, monitor) {
                (true, Some(monitor)) => glfw::WindowMode::FullScreen(monitor),
                _ => glfw::WindowMode::Windowed,
            };
            glfw.create_window(params.width, params.height, &params.title, mode)
        });

        let (mut window, events) = created
            .ok_or_else(|| WindowError::CreationFailed(format!("GLFW refused window '{}'", params.title)))?;

        window.set_close_polling(true);
        window.set_size_polling(true);

        let id = self.windows.insert_with_key(|id| GlfwWindow {
            id,
            window,
            events,
            fullscreen: params.fullscreen,
            destroy_requested: false,
            on_destroyed: None,
        });

        log::info!("Created window '{}' ({}x{})", params.title, params.width, params.height);
        Ok(&mut self.windows[id])
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn Window> {
        self.windows.get_mut(id).map(|window| window as &mut dyn Window)
    }

    fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn update(&mut self) {
        self.glfw.poll_events();

        let mut closing = Vec::new();
        for (id, window) in &self.windows {
            for (_, event) in glfw::flush_messages(&window.events) {
                log::trace!("Window event: {:?}", event);
            }
            if window.destroy_requested || window.window.should_close() {
                closing.push(id);
            }
        }

        for id in closing {
            self.destroy_now(id);
        }
    }

    fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }

        let remaining: Vec<WindowId> = self.windows.keys().collect();
        for id in remaining {
            self.destroy_now(id);
        }

        self.shut_down = true;
        log::info!("GLFW window manager shut down");
    }
}

//! Headless window manager
//!
//! Windows exist only in memory but follow the same lifecycle as native
//! ones: destruction requested by the application, or a close requested by the
//! "user" through [`UserInput`], is only completed by the next
//! [`WindowManager::update`].

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use super::{DestroyedCallback, NativeHandle, Window, WindowError, WindowId, WindowManager, WindowParameters, WindowResult};

/// First synthetic native handle value; keeps handles away from null
const HANDLE_BASE: usize = 0x1000;

struct HeadlessWindow {
    id: WindowId,
    title: String,
    handle: NativeHandle,
    size: (u32, u32),
    fullscreen: bool,
    destroy_requested: bool,
    on_destroyed: Option<DestroyedCallback>,
}

impl Window for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn handle(&self) -> NativeHandle {
        self.handle
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn destroy(&mut self) {
        log::debug!("Destroy requested for headless window '{}'", self.title);
        self.destroy_requested = true;
    }

    fn set_on_destroyed(&mut self, callback: DestroyedCallback) {
        self.on_destroyed = Some(callback);
    }
}

/// Injects user actions into a window manager that is owned elsewhere
///
/// Clones share one queue. Queued actions are applied at the start of the
/// manager's next [`WindowManager::update`].
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    close_requests: Rc<RefCell<Vec<WindowId>>>,
}

impl UserInput {
    /// Simulate the user closing a window (title bar button, Alt+F4, ...)
    pub fn close_window(&self, id: WindowId) {
        self.close_requests.borrow_mut().push(id);
    }

    /// Take every queued close request
    pub(crate) fn take_close_requests(&self) -> Vec<WindowId> {
        std::mem::take(&mut *self.close_requests.borrow_mut())
    }
}

/// In-memory window manager
///
/// Deterministic stand-in for a native platform, used by tools, CI and tests.
#[derive(Default)]
pub struct HeadlessWindowManager {
    windows: SlotMap<WindowId, HeadlessWindow>,
    input: UserInput,
    next_handle: usize,
    quit_requested: bool,
    shut_down: bool,
    pump_count: u64,
}

impl HeadlessWindowManager {
    /// Create an empty window manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for simulating user actions once the manager has been handed over
    pub fn user_input(&self) -> UserInput {
        self.input.clone()
    }

    /// Whether a window is still alive
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(id)
    }

    /// Number of completed [`WindowManager::update`] calls
    pub const fn pump_count(&self) -> u64 {
        self.pump_count
    }

    /// Whether [`WindowManager::shutdown`] has run
    pub const fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn destroy_now(&mut self, id: WindowId) {
        if let Some(mut window) = self.windows.remove(id) {
            log::debug!("Headless window '{}' destroyed", window.title);
            let callback = window.on_destroyed.take();
            drop(window);
            if let Some(mut callback) = callback {
                callback(id);
            }
        }
    }
}

impl WindowManager for HeadlessWindowManager {
    fn create(&mut self, params: &WindowParameters) -> WindowResult<&mut dyn Window> {
        if self.shut_down {
            return Err(WindowError::ManagerShutDown);
        }
        if params.width == 0 || params.height == 0 {
            return Err(WindowError::CreationFailed(format!(
                "window size must be non-zero, got {}x{}",
                params.width, params.height
            )));
        }

        let handle = NativeHandle::from_raw(HANDLE_BASE + self.next_handle);
        self.next_handle += 1;

        let id = self.windows.insert_with_key(|id| HeadlessWindow {
            id,
            title: params.title.clone(),
            handle,
            size: (params.width, params.height),
            fullscreen: params.fullscreen,
            destroy_requested: false,
            on_destroyed: None,
        });

        log::debug!(
            "Created headless window '{}' ({}x{}, fullscreen: {})",
            params.title,
            params.width,
            params.height,
            params.fullscreen
        );

        Ok(&mut self.windows[id])
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn Window> {
        self.windows.get_mut(id).map(|window| window as &mut dyn Window)
    }

    fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn update(&mut self) {
        self.pump_count += 1;

        for id in self.input.take_close_requests() {
            match self.windows.get_mut(id) {
                Some(window) => {
                    log::info!("User closed window '{}'", window.title);
                    window.destroy_requested = true;
                }
                None => log::debug!("Ignoring close of unknown window {:?}", id),
            }
        }

        let closing: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|(_, window)| window.destroy_requested)
            .map(|(id, _)| id)
            .collect();

        for id in closing {
            self.destroy_now(id);
        }
    }

    fn request_quit(&mut self) {
        if !self.quit_requested {
            log::debug!("Quit requested");
        }
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
        if !remaining.is_empty() {
            log::warn!("Force-destroying {} window(s) at window manager shutdown", remaining.len());
        }
        for id in remaining {
            self.destroy_now(id);
        }

        self.shut_down = true;
        log::debug!("Headless window manager shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn params(width: u32, height: u32) -> WindowParameters {
        WindowParameters {
            title: "test".to_string(),
            width,
            height,
            fullscreen: false,
        }
    }

    #[test]
    fn test_destroy_completes_on_update() {
        let mut manager = HeadlessWindowManager::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let id = {
            let window = manager.create(&params(640, 480)).unwrap();
            let sink = Rc::clone(&fired);
            window.set_on_destroyed(Box::new(move |id| sink.borrow_mut().push(id)));
            window.destroy();
            window.id()
        };

        // Still alive until the platform pumps.
        assert!(manager.contains(id));
        assert!(fired.borrow().is_empty());

        manager.update();
        assert!(!manager.contains(id));
        assert_eq!(*fired.borrow(), vec![id]);
        assert!(manager.window_mut(id).is_none());
    }

    #[test]
    fn test_user_close_destroys_on_update() {
        let mut manager = HeadlessWindowManager::new();
        let input = manager.user_input();
        let id = manager.create(&params(640, 480)).unwrap().id();

        input.close_window(id);
        assert_eq!(manager.window_count(), 1);
        manager.update();
        assert_eq!(manager.window_count(), 0);

        // Closing a window that is already gone is ignored.
        input.close_window(id);
        manager.update();
        assert_eq!(manager.pump_count(), 2);
    }

    #[test]
    fn test_zero_size_is_refused() {
        let mut manager = HeadlessWindowManager::new();
        assert!(matches!(manager.create(&params(0, 480)), Err(WindowError::CreationFailed(_))));
    }

    #[test]
    fn test_handles_are_distinct_and_non_null() {
        let mut manager = HeadlessWindowManager::new();
        let a = manager.create(&params(10, 10)).unwrap().handle();
        let b = manager.create(&params(10, 10)).unwrap().handle();
        assert_ne!(a, b);
        assert!(!a.is_null() && !b.is_null());
    }

    #[test]
    fn test_shutdown_force_destroys_and_refuses_new_windows() {
        let mut manager = HeadlessWindowManager::new();
        let fired = Rc::new(RefCell::new(0));
        {
            let window = manager.create(&params(10, 10)).unwrap();
            let sink = Rc::clone(&fired);
            window.set_on_destroyed(Box::new(move |_| *sink.borrow_mut() += 1));
        }

        manager.shutdown();
        assert_eq!(manager.window_count(), 0);
        assert_eq!(*fired.borrow(), 1);
        assert!(manager.is_shut_down());
        assert!(matches!(manager.create(&params(10, 10)), Err(WindowError::ManagerShutDown)));
    }

    #[test]
    fn test_quit_flag() {
        let mut manager = HeadlessWindowManager::new();
        assert!(!manager.quit_requested());
        manager.request_quit();
        assert!(manager.quit_requested());
    }
}

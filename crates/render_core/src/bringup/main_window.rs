//! Main window tracking

use std::cell::RefCell;
use std::rc::Rc;

use crate::render::window::{DestroyedCallback, WindowId};

/// Lifecycle of the single main window
///
/// Transitions only move forward within one bring-up cycle:
/// `Absent → Running → (DestroyRequested →) Destroyed`. A new cycle may start
/// again from `Absent` or `Destroyed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MainWindow {
    #[default]
    Absent,
    Running(WindowId),
    DestroyRequested(WindowId),
    Destroyed(WindowId),
}

impl MainWindow {
    /// Record a freshly created main window, replacing any previous one
    pub(crate) fn start(&mut self, id: WindowId) {
        if let Some(previous) = self.live_id() {
            log::warn!("Main window {:?} replaced by {:?} while still alive", previous, id);
        }
        *self = Self::Running(id);
    }

    /// Id of the window while it is still alive on the platform
    pub(crate) const fn live_id(self) -> Option<WindowId> {
        match self {
            Self::Running(id) | Self::DestroyRequested(id) => Some(id),
            Self::Absent | Self::Destroyed(_) => None,
        }
    }

    pub(crate) const fn is_live(self) -> bool {
        self.live_id().is_some()
    }

    pub(crate) const fn is_destroyed(self) -> bool {
        matches!(self, Self::Destroyed(_))
    }

    /// `Running → DestroyRequested`; other states are left unchanged
    pub(crate) fn request_destroy(&mut self) {
        if let Self::Running(id) = *self {
            *self = Self::DestroyRequested(id);
        }
    }

    /// Mark the window destroyed if `id` is the live main window
    pub(crate) fn mark_destroyed(&mut self, id: WindowId) -> bool {
        if self.live_id() == Some(id) {
            *self = Self::Destroyed(id);
            true
        } else {
            false
        }
    }
}

/// Destroyed notifications delivered by the platform, awaiting dispatch
///
/// The window manager fires destroyed callbacks from inside its own update,
/// while it is mutably borrowed. Callbacks therefore only queue the id here,
/// and the orchestrator handles it once the update has returned.
#[derive(Debug, Clone, Default)]
pub(crate) struct DestroyedInbox(Rc<RefCell<Vec<WindowId>>>);

impl DestroyedInbox {
    pub(crate) fn callback(&self) -> DestroyedCallback {
        let inbox = Rc::clone(&self.0);
        Box::new(move |id| inbox.borrow_mut().push(id))
    }

    pub(crate) fn drain(&self) -> Vec<WindowId> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

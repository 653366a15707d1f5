//! What a shutdown actually did

use bitflags::bitflags;

bitflags! {
    /// Subsystems destroyed by one [`shutdown`](super::RendererInitialization::shutdown) call
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TornDown: u8 {
        /// The dynamic drawer was destroyed
        const DYNAMIC_DRAWER = 1 << 0;
        /// The render resource manager was destroyed
        const RESOURCE_MANAGER = 1 << 1;
        /// The renderer was shut down and destroyed
        const RENDERER = 1 << 2;
        /// Destruction of the main window was requested
        const MAIN_WINDOW = 1 << 3;
        /// The window manager was shut down and destroyed
        const WINDOW_MANAGER = 1 << 4;
    }
}

/// How waiting for the main window's destruction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowWait {
    /// No live main window, nothing to wait for
    NotNeeded,
    /// The platform confirmed the destruction
    Confirmed,
    /// The timeout expired; the window was left to the window manager's shutdown
    TimedOut,
}

/// Result of [`RendererInitialization::shutdown`](super::RendererInitialization::shutdown)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownSummary {
    /// What was torn down
    pub torn_down: TornDown,
    /// Outcome of the main window wait
    pub window_wait: WindowWait,
}

impl ShutdownSummary {
    pub(crate) const fn empty() -> Self {
        Self {
            torn_down: TornDown::empty(),
            window_wait: WindowWait::NotNeeded,
        }
    }

    /// Whether the call found nothing to tear down
    pub const fn is_noop(&self) -> bool {
        self.torn_down.is_empty()
    }
}

//! Graphics and bring-up configuration structures

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Config, ConfigError};

/// Display parameters for the main window and its rendering context
///
/// Read once per initialization cycle; changing the source config afterwards
/// has no effect until the next bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Start in exclusive fullscreen
    pub fullscreen: bool,
    /// Synchronize presentation to the display refresh
    pub vsync: bool,
}

impl DisplaySettings {
    /// Create display settings for a windowed display with vsync enabled
    pub const fn windowed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: false,
            vsync: true,
        }
    }

    /// Check that both dimensions are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::windowed(1280, 720)
    }
}

/// Teardown behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Upper bound on waiting for the platform to confirm main window
    /// destruction, in milliseconds. `0` waits forever.
    pub window_destroy_timeout_ms: u64,
}

impl ShutdownConfig {
    /// The wait bound, or `None` when unbounded
    pub const fn window_destroy_timeout(&self) -> Option<Duration> {
        if self.window_destroy_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.window_destroy_timeout_ms))
        }
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            window_destroy_timeout_ms: 5_000,
        }
    }
}

/// Sizing for the immediate-mode drawer's dynamic buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicDrawerConfig {
    /// Vertices the dynamic vertex buffer can hold per flush
    pub max_vertices: u32,
    /// Indices the dynamic index buffer can hold per flush
    pub max_indices: u32,
}

impl Default for DynamicDrawerConfig {
    fn default() -> Self {
        Self {
            max_vertices: 16 * 1024,
            max_indices: 24 * 1024,
        }
    }
}

/// # Graphics Configuration
///
/// The structured settings object renderer bring-up reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Main window title, the application identity shown by the platform
    pub window_title: String,
    /// Display parameters
    pub display: DisplaySettings,
    /// Teardown behavior
    pub shutdown: ShutdownConfig,
    /// Dynamic drawing buffer sizes
    pub dynamic_drawer: DynamicDrawerConfig,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            window_title: "Render Core".to_string(),
            display: DisplaySettings::default(),
            shutdown: ShutdownConfig::default(),
            dynamic_drawer: DynamicDrawerConfig::default(),
        }
    }
}

impl Config for GraphicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_title.trim().is_empty() {
            return Err(ConfigError::Invalid("window title must not be empty".to_string()));
        }
        if self.dynamic_drawer.max_vertices == 0 || self.dynamic_drawer.max_indices == 0 {
            return Err(ConfigError::Invalid("dynamic drawer buffers must be non-empty".to_string()));
        }
        self.display.validate()
    }
}

/// Logger configuration
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "render_core=debug").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit filter; falls back to `RUST_LOG`, then `info`
    pub filter: Option<String>,
}

impl Config for LoggingConfig {}

/// Everything a bring-up binary needs from its config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BringupConfig {
    /// Graphics settings
    pub graphics: GraphicsConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config for BringupConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.graphics.validate()
    }
}

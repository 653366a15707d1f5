//! Viewer demo application
//!
//! Brings the renderer up against a single window, pumps events until the
//! window is closed, and tears everything down again. Without the
//! `glfw-platform` feature the window is headless and the "user" closes it
//! after a couple of seconds.
//!
//! Usage: `viewer [config.toml | config.ron]`

use std::path::PathBuf;
use std::time::{Duration, Instant};

use render_core::prelude::*;
use render_core::render::window::UserInput;
use thiserror::Error;

/// Frame pacing of the demo loop
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Frames before the headless window is closed
const HEADLESS_FRAMES: u64 = 120;

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[cfg(feature = "glfw-platform")]
    #[error("Window system error: {0}")]
    Window(#[from] render_core::render::window::WindowError),

    #[error("Renderer bring-up failed: {0}")]
    Bringup(#[from] InitError),
}

struct ViewerApp {
    config: BringupConfig,
    systems: RenderSystems,
    bringup: RendererInitialization,
    /// Present when running headless
    input: Option<UserInput>,
}

impl ViewerApp {
    fn new(config: BringupConfig) -> Result<Self, AppError> {
        let mut systems = RenderSystems::new();
        let input = install_window_manager(&mut systems)?;
        let bringup = RendererInitialization::new(&config.graphics);

        Ok(Self {
            config,
            systems,
            bringup,
            input,
        })
    }

    fn run(&mut self) -> Result<(), AppError> {
        log::info!("Starting '{}' on {}", self.config.graphics.window_title, self.bringup.backend().name());

        if let Err(e) = self.bringup.initialize(&mut self.systems, &self.config.graphics) {
            let summary = self.bringup.shutdown(&mut self.systems);
            log::info!("Cleaned up after failed bring-up: {:?}", summary.torn_down);
            return Err(e.into());
        }

        let started = Instant::now();
        let mut frames: u64 = 0;
        while !self.bringup.quit_requested(&self.systems) {
            self.bringup.pump_events(&mut self.systems);
            frames += 1;

            if frames == HEADLESS_FRAMES {
                if let (Some(input), Some(window)) = (&self.input, self.bringup.main_window()) {
                    log::info!("Closing the main window after {} frames", frames);
                    input.close_window(window);
                }
            }

            std::thread::sleep(FRAME_TIME);
        }
        log::info!("Main loop finished after {} frames ({:?})", frames, started.elapsed());

        let summary = self.bringup.shutdown(&mut self.systems);
        log::info!(
            "Shutdown tore down {:?} (window wait: {:?})",
            summary.torn_down,
            summary.window_wait
        );
        Ok(())
    }
}

#[cfg(feature = "glfw-platform")]
fn install_window_manager(systems: &mut RenderSystems) -> Result<Option<UserInput>, AppError> {
    let window_manager = render_core::render::window::GlfwWindowManager::new()?;
    systems.install_window_manager(Box::new(window_manager));
    Ok(None)
}

#[cfg(not(feature = "glfw-platform"))]
fn install_window_manager(systems: &mut RenderSystems) -> Result<Option<UserInput>, AppError> {
    let window_manager = HeadlessWindowManager::new();
    let input = window_manager.user_input();
    systems.install_window_manager(Box::new(window_manager));
    Ok(Some(input))
}

fn load_config(path: Option<PathBuf>) -> Result<BringupConfig, ConfigError> {
    match path {
        Some(path) => BringupConfig::load_from_file(path),
        None => Ok(BringupConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match load_config(std::env::args_os().nth(1).map(PathBuf::from)) {
        Ok(config) => config,
        Err(e) => {
            render_core::foundation::logging::init(&LoggingConfig::default());
            log::error!("Failed to load configuration: {}", e);
            return Err(AppError::from(e).into());
        }
    };
    render_core::foundation::logging::init(&config.logging);

    let mut app = ViewerApp::new(config)?;
    match app.run() {
        Ok(()) => {
            log::info!("Viewer exited cleanly");
            Ok(())
        }
        Err(e) => {
            log::error!("Viewer failed: {}", e);
            Err(e.into())
        }
    }
}

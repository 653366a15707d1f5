//! Logging utilities and structured logging support

use std::sync::Once;

use crate::config::LoggingConfig;

pub use log::{debug, error, info, trace, warn};

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// The explicit filter in `config` wins, then `RUST_LOG`, then `info`.
/// Only the first call has any effect.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.as_deref().map(str::to_owned).or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        // Another logger may already be installed by the host application.
        if builder.try_init().is_err() {
            log::debug!("Logger already installed; keeping the existing one");
            return;
        }

        log::debug!("Logging initialized");
    });
}

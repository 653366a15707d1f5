//! Foundation module - Core utilities
//!
//! - Logging initialization

pub mod logging;

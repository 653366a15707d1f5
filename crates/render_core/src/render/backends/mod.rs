//! # Backend Module
//!
//! Concrete renderer implementations. Exactly one is compiled in, chosen by
//! cargo feature:
//!
//! - `backend-gl` (default): [`OpenGlBackend`], context bound to its window
//! - `backend-d3d`: [`Direct3dBackend`], context outlives its window
//!
//! [`SelectedBackend`] names whichever one was compiled.

pub(crate) mod common;

#[cfg(feature = "backend-gl")]
mod opengl;

#[cfg(feature = "backend-d3d")]
mod direct3d;

#[cfg(feature = "backend-gl")]
pub use opengl::{OpenGlBackend, OpenGlRenderer};

#[cfg(feature = "backend-d3d")]
pub use direct3d::{Direct3dBackend, Direct3dRenderer, PresentInterval};

/// The renderer factory compiled into this build
#[cfg(feature = "backend-gl")]
pub type SelectedBackend = OpenGlBackend;

/// The renderer factory compiled into this build
#[cfg(all(feature = "backend-d3d", not(feature = "backend-gl")))]
pub type SelectedBackend = Direct3dBackend;

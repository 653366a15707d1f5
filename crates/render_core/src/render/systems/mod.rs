//! Render systems built on top of the renderer and its shared resources

pub mod dynamic;

//! State shared by the concrete backends
//!
//! Both backends track the same lifecycle: initialized → main context →
//! resources → shutdown. Only their platform checks and presentation details
//! differ.

use std::collections::HashMap;

use crate::render::api::{
    BufferDesc, BufferHandle, ContextInitParameters, ResourceHandle, SamplerDesc, SamplerHandle, TextureDesc,
    TextureHandle,
};
use crate::render::{RenderError, RenderResult};

/// Live GPU resources by handle
#[derive(Debug, Default)]
pub(crate) struct ResourceLedger {
    next_id: u32,
    live: HashMap<ResourceHandle, &'static str>,
}

impl ResourceLedger {
    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn insert(&mut self, handle: ResourceHandle, label: &'static str) {
        self.live.insert(handle, label);
    }

    pub(crate) fn release(&mut self, handle: ResourceHandle) -> bool {
        self.live.remove(&handle).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }

    /// Drop every remaining resource, returning the labels that were still alive
    pub(crate) fn release_all(&mut self) -> Vec<&'static str> {
        let mut leaked: Vec<&'static str> = self.live.drain().map(|(_, label)| label).collect();
        leaked.sort_unstable();
        leaked
    }
}

/// Lifecycle bookkeeping common to every backend
#[derive(Debug)]
pub(crate) struct BackendState {
    name: &'static str,
    initialized: bool,
    context: Option<ContextInitParameters>,
    resources: ResourceLedger,
}

impl BackendState {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            initialized: false,
            context: None,
            resources: ResourceLedger::default(),
        }
    }

    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn mark_initialized(&mut self) {
        if !self.initialized {
            log::info!("{} renderer initialized", self.name);
        }
        self.initialized = true;
    }

    pub(crate) const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Validate and record the main context
    pub(crate) fn attach_context(&mut self, params: &ContextInitParameters) -> RenderResult<()> {
        if !self.initialized {
            return Err(RenderError::InitializationFailed(format!(
                "{} renderer must be initialized before creating a context",
                self.name
            )));
        }
        if self.context.is_some() {
            return Err(RenderError::BackendError(format!("{} main context already exists", self.name)));
        }
        if params.window.is_null() {
            return Err(RenderError::BackendError("cannot create a context for a null window".to_string()));
        }
        if params.display_width == 0 || params.display_height == 0 {
            return Err(RenderError::BackendError(format!(
                "unsupported backbuffer size {}x{}",
                params.display_width, params.display_height
            )));
        }

        self.context = Some(*params);
        log::info!(
            "{} main context created ({}x{}, fullscreen: {}, vsync: {})",
            self.name,
            params.display_width,
            params.display_height,
            params.fullscreen,
            params.vsync
        );
        Ok(())
    }

    pub(crate) const fn context(&self) -> Option<&ContextInitParameters> {
        self.context.as_ref()
    }

    fn require_context(&self, what: &str) -> RenderResult<()> {
        if self.context.is_none() {
            return Err(RenderError::ResourceCreationFailed(format!(
                "cannot create {} without a main context",
                what
            )));
        }
        Ok(())
    }

    pub(crate) fn create_texture(&mut self, desc: &TextureDesc) -> RenderResult<TextureHandle> {
        self.require_context("a texture")?;
        if desc.width == 0 || desc.height == 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "texture '{}' has zero size",
                desc.label
            )));
        }
        let handle = TextureHandle(self.resources.allocate());
        self.resources.insert(handle.into(), desc.label);
        log::trace!("Created texture '{}' as {:?}", desc.label, handle);
        Ok(handle)
    }

    pub(crate) fn create_sampler(&mut self, desc: &SamplerDesc) -> RenderResult<SamplerHandle> {
        self.require_context("a sampler")?;
        let handle = SamplerHandle(self.resources.allocate());
        self.resources.insert(handle.into(), desc.label);
        log::trace!("Created sampler '{}' as {:?}", desc.label, handle);
        Ok(handle)
    }

    pub(crate) fn create_buffer(&mut self, desc: &BufferDesc) -> RenderResult<BufferHandle> {
        self.require_context("a buffer")?;
        if desc.size == 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "buffer '{}' has zero size",
                desc.label
            )));
        }
        let handle = BufferHandle(self.resources.allocate());
        self.resources.insert(handle.into(), desc.label);
        log::trace!("Created {} byte buffer '{}' as {:?}", desc.size, desc.label, handle);
        Ok(handle)
    }

    pub(crate) fn release(&mut self, resource: ResourceHandle) {
        if !self.resources.release(resource) {
            log::trace!("Ignoring release of unknown resource {:?}", resource);
        }
    }

    pub(crate) fn live_resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Release everything and return to the uninitialized state
    ///
    /// Returns `false` if there was nothing to shut down.
    pub(crate) fn shutdown(&mut self) -> bool {
        if !self.initialized && self.context.is_none() {
            return false;
        }

        let leaked = self.resources.release_all();
        if !leaked.is_empty() {
            log::warn!("{} shutdown released {} leaked resource(s): {:?}", self.name, leaked.len(), leaked);
        }

        if self.context.take().is_some() {
            log::debug!("{} main context destroyed", self.name);
        }
        self.initialized = false;
        log::info!("{} renderer shut down", self.name);
        true
    }
}

//! Test doubles for bring-up
//!
//! A mock backend, renderer, and window manager that record every call into a
//! shared [`Journal`], with switches to make individual steps fail.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::render::api::{
    BufferDesc, BufferHandle, ContextInitParameters, Renderer, RendererBackend, ResourceHandle, SamplerDesc,
    SamplerHandle, TextureDesc, TextureHandle,
};
use crate::render::backends::common::BackendState;
use crate::render::window::{
    DestroyedCallback, NativeHandle, UserInput, Window, WindowError, WindowId, WindowManager, WindowParameters,
    WindowResult,
};
use crate::render::{RenderError, RenderResult};

/// One observable call on a mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CreateRenderer,
    RendererInitialize,
    CreateMainContext,
    CreateResource(&'static str),
    ReleaseResource(&'static str),
    RendererShutdown,
    RendererDropped,
    CreateWindow(String),
    SetOnDestroyed,
    DestroyWindow,
    WindowDestroyed,
    Update,
    RequestQuit,
    ManagerShutdown,
    ManagerDropped,
}

pub(crate) type Journal = Rc<RefCell<Vec<Call>>>;

pub(crate) fn journal() -> Journal {
    Rc::default()
}

fn record(journal: &Journal, call: Call) {
    journal.borrow_mut().push(call);
}

/// Snapshot of the journal without the per-frame `Update` noise
pub(crate) fn milestones(journal: &Journal) -> Vec<Call> {
    journal.borrow().iter().filter(|call| **call != Call::Update).cloned().collect()
}

/// Number of recorded occurrences of `call`
pub(crate) fn count(journal: &Journal, call: &Call) -> usize {
    journal.borrow().iter().filter(|recorded| *recorded == call).count()
}

/// Give `renderer` a main context suitable for resource creation
pub(crate) fn attach_context(renderer: &mut dyn Renderer) {
    renderer
        .create_main_context(&ContextInitParameters {
            window: NativeHandle::from_raw(0x1000),
            display_width: 640,
            display_height: 480,
            fullscreen: false,
            vsync: true,
        })
        .expect("test context");
}

/// Renderer fault injection and backend traits
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MockSettings {
    pub context_bound_to_window: bool,
    pub fail_create: bool,
    pub fail_initialize: bool,
    pub fail_context: bool,
    pub fail_textures: bool,
    pub fail_buffers: bool,
}

// ---- Renderer ----

pub(crate) struct MockBackend {
    journal: Journal,
    settings: MockSettings,
    created: Cell<usize>,
}

impl MockBackend {
    pub(crate) fn new(journal: Journal, settings: MockSettings) -> Self {
        Self {
            journal,
            settings,
            created: Cell::new(0),
        }
    }

    pub(crate) fn renderers_created(&self) -> usize {
        self.created.get()
    }
}

impl RendererBackend for MockBackend {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn context_bound_to_window(&self) -> bool {
        self.settings.context_bound_to_window
    }

    fn create_renderer(&self) -> RenderResult<Box<dyn Renderer>> {
        record(&self.journal, Call::CreateRenderer);
        if self.settings.fail_create {
            return Err(RenderError::BackendError("mock backend unavailable".to_string()));
        }
        self.created.set(self.created.get() + 1);
        Ok(Box::new(MockRenderer::new(Rc::clone(&self.journal), self.settings)))
    }
}

pub(crate) struct MockRenderer {
    journal: Journal,
    settings: MockSettings,
    state: BackendState,
    labels: HashMap<ResourceHandle, &'static str>,
    buffers: Vec<(&'static str, u64)>,
}

impl MockRenderer {
    pub(crate) fn new(journal: Journal, settings: MockSettings) -> Self {
        Self {
            journal,
            settings,
            state: BackendState::new("Mock"),
            labels: HashMap::new(),
            buffers: Vec::new(),
        }
    }

    pub(crate) fn attach_test_context(&mut self) {
        attach_context(self);
    }

    /// Label and size of every buffer created so far
    pub(crate) fn buffer_sizes(&self) -> Vec<(&'static str, u64)> {
        self.buffers.clone()
    }

    fn track(&mut self, handle: ResourceHandle, label: &'static str) {
        record(&self.journal, Call::CreateResource(label));
        self.labels.insert(handle, label);
    }
}

impl Renderer for MockRenderer {
    fn backend_name(&self) -> &'static str {
        self.state.name()
    }

    fn initialize(&mut self) -> RenderResult<()> {
        record(&self.journal, Call::RendererInitialize);
        if self.settings.fail_initialize {
            return Err(RenderError::InitializationFailed("mock driver missing".to_string()));
        }
        self.state.mark_initialized();
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    fn create_main_context(&mut self, params: &ContextInitParameters) -> RenderResult<()> {
        record(&self.journal, Call::CreateMainContext);
        if self.settings.fail_context {
            return Err(RenderError::BackendError("mock pixel format rejected".to_string()));
        }
        self.state.attach_context(params)
    }

    fn main_context(&self) -> Option<&ContextInitParameters> {
        self.state.context()
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> RenderResult<TextureHandle> {
        if self.settings.fail_textures {
            return Err(RenderError::ResourceCreationFailed(format!("mock refused texture '{}'", desc.label)));
        }
        let handle = self.state.create_texture(desc)?;
        self.track(handle.into(), desc.label);
        Ok(handle)
    }

    fn create_sampler(&mut self, desc: &SamplerDesc) -> RenderResult<SamplerHandle> {
        let handle = self.state.create_sampler(desc)?;
        self.track(handle.into(), desc.label);
        Ok(handle)
    }

    fn create_buffer(&mut self, desc: &BufferDesc) -> RenderResult<BufferHandle> {
        if self.settings.fail_buffers {
            return Err(RenderError::ResourceCreationFailed(format!("mock refused buffer '{}'", desc.label)));
        }
        let handle = self.state.create_buffer(desc)?;
        self.track(handle.into(), desc.label);
        self.buffers.push((desc.label, desc.size));
        Ok(handle)
    }

    fn release(&mut self, resource: ResourceHandle) {
        if let Some(label) = self.labels.remove(&resource) {
            record(&self.journal, Call::ReleaseResource(label));
        }
        self.state.release(resource);
    }

    fn live_resource_count(&self) -> usize {
        self.state.live_resource_count()
    }

    fn shutdown(&mut self) {
        record(&self.journal, Call::RendererShutdown);
        self.labels.clear();
        self.state.shutdown();
    }
}

impl Drop for MockRenderer {
    fn drop(&mut self) {
        record(&self.journal, Call::RendererDropped);
    }
}

// ---- Window manager ----

struct MockWindow {
    id: WindowId,
    journal: Journal,
    handle: NativeHandle,
    size: (u32, u32),
    fullscreen: bool,
    destroy_requested: bool,
    on_destroyed: Option<DestroyedCallback>,
}

impl Window for MockWindow {
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
        record(&self.journal, Call::DestroyWindow);
        self.destroy_requested = true;
    }

    fn set_on_destroyed(&mut self, callback: DestroyedCallback) {
        record(&self.journal, Call::SetOnDestroyed);
        self.on_destroyed = Some(callback);
    }
}

pub(crate) struct MockWindowManager {
    journal: Journal,
    windows: SlotMap<WindowId, MockWindow>,
    input: UserInput,
    fail_create: bool,
    ignore_destroy: bool,
    silent: bool,
    quit_requested: bool,
}

impl MockWindowManager {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            windows: SlotMap::with_key(),
            input: UserInput::default(),
            fail_create: false,
            ignore_destroy: false,
            silent: false,
            quit_requested: false,
        }
    }

    /// Refuse every window
    pub(crate) fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Never complete destruction requests during `update`
    pub(crate) fn ignoring_destroy(mut self) -> Self {
        self.ignore_destroy = true;
        self
    }

    /// Drop destroyed windows without firing their destroyed callbacks
    pub(crate) fn never_notifying(mut self) -> Self {
        self.silent = true;
        self
    }

    pub(crate) fn user_input(&self) -> UserInput {
        self.input.clone()
    }

    fn destroy_now(&mut self, id: WindowId) {
        if let Some(mut window) = self.windows.remove(id) {
            record(&self.journal, Call::WindowDestroyed);
            if self.silent {
                return;
            }
            if let Some(mut callback) = window.on_destroyed.take() {
                callback(id);
            }
        }
    }
}

impl WindowManager for MockWindowManager {
    fn create(&mut self, params: &WindowParameters) -> WindowResult<&mut dyn Window> {
        record(&self.journal, Call::CreateWindow(params.title.clone()));
        if self.fail_create {
            return Err(WindowError::CreationFailed("mock display unavailable".to_string()));
        }
        let journal = Rc::clone(&self.journal);
        let handle = NativeHandle::from_raw(0x1000 + self.windows.len());
        let id = self.windows.insert_with_key(|id| MockWindow {
            id,
            journal,
            handle,
            size: (params.width, params.height),
            fullscreen: params.fullscreen,
            destroy_requested: false,
            on_destroyed: None,
        });
        Ok(&mut self.windows[id])
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn Window> {
        self.windows.get_mut(id).map(|window| window as &mut dyn Window)
    }

    fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn update(&mut self) {
        record(&self.journal, Call::Update);

        for id in self.input.take_close_requests() {
            if let Some(window) = self.windows.get_mut(id) {
                window.destroy_requested = true;
            }
        }
        if self.ignore_destroy {
            return;
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
        record(&self.journal, Call::RequestQuit);
        self.quit_requested = true;
    }

    fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn shutdown(&mut self) {
        record(&self.journal, Call::ManagerShutdown);
        let remaining: Vec<WindowId> = self.windows.keys().collect();
        for id in remaining {
            self.destroy_now(id);
        }
    }
}

impl Drop for MockWindowManager {
    fn drop(&mut self) {
        record(&self.journal, Call::ManagerDropped);
    }
}

//! Render resource management
//!
//! [`RenderResourceManager`] owns the GPU-resident resources every other render
//! layer can rely on being present once bring-up finished: fallback textures
//! and the common samplers.

use std::collections::HashMap;

use crate::render::api::{
    FilterMode, Renderer, SamplerDesc, SamplerHandle, TextureDesc, TextureFormat, TextureHandle, WrapMode,
};

/// Built-in 1x1 textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultTexture {
    /// Opaque white, the neutral base color
    White,
    /// Opaque black
    Black,
    /// Tangent-space normal pointing straight out of the surface
    FlatNormal,
}

impl DefaultTexture {
    /// Every default texture, in creation order
    pub const ALL: [Self; 3] = [Self::White, Self::Black, Self::FlatNormal];

    fn desc(self) -> TextureDesc {
        let (label, format, clear_color) = match self {
            Self::White => ("default_white", TextureFormat::Rgba8UnormSrgb, [255, 255, 255, 255]),
            Self::Black => ("default_black", TextureFormat::Rgba8UnormSrgb, [0, 0, 0, 255]),
            Self::FlatNormal => ("default_normal", TextureFormat::Rgba8Unorm, [128, 128, 255, 255]),
        };
        TextureDesc {
            label,
            width: 1,
            height: 1,
            format,
            clear_color,
        }
    }
}

/// Built-in samplers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultSampler {
    /// Linear filtering, repeating
    LinearWrap,
    /// Nearest filtering, clamped (UI, pixel art)
    PointClamp,
}

impl DefaultSampler {
    /// Every default sampler, in creation order
    pub const ALL: [Self; 2] = [Self::LinearWrap, Self::PointClamp];

    const fn desc(self) -> SamplerDesc {
        match self {
            Self::LinearWrap => SamplerDesc {
                label: "linear_wrap",
                filter: FilterMode::Linear,
                wrap: WrapMode::Repeat,
            },
            Self::PointClamp => SamplerDesc {
                label: "point_clamp",
                filter: FilterMode::Nearest,
                wrap: WrapMode::ClampToEdge,
            },
        }
    }
}

/// Shared GPU resources
#[derive(Debug, Default)]
pub struct RenderResourceManager {
    initialized: bool,
    textures: HashMap<DefaultTexture, TextureHandle>,
    samplers: HashMap<DefaultSampler, SamplerHandle>,
}

impl RenderResourceManager {
    /// Create an empty, uninitialized manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the default resources
    ///
    /// Never fails as a whole: a resource the backend refuses is logged and
    /// left out, and lookups for it return `None`. Calling this again while
    /// initialized does nothing.
    pub fn initialize(&mut self, renderer: &mut dyn Renderer) {
        if self.initialized {
            log::debug!("Render resource manager already initialized");
            return;
        }

        for texture in DefaultTexture::ALL {
            match renderer.create_texture(&texture.desc()) {
                Ok(handle) => {
                    self.textures.insert(texture, handle);
                }
                Err(e) => log::warn!("Default texture {:?} unavailable: {}", texture, e),
            }
        }

        for sampler in DefaultSampler::ALL {
            match renderer.create_sampler(&sampler.desc()) {
                Ok(handle) => {
                    self.samplers.insert(sampler, handle);
                }
                Err(e) => log::warn!("Default sampler {:?} unavailable: {}", sampler, e),
            }
        }

        self.initialized = true;
        log::info!(
            "Render resource manager initialized ({} textures, {} samplers) on {}",
            self.textures.len(),
            self.samplers.len(),
            renderer.backend_name()
        );
    }

    /// Whether [`RenderResourceManager::initialize`] has run
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handle of a default texture
    pub fn texture(&self, texture: DefaultTexture) -> Option<TextureHandle> {
        self.textures.get(&texture).copied()
    }

    /// Handle of a default sampler
    pub fn sampler(&self, sampler: DefaultSampler) -> Option<SamplerHandle> {
        self.samplers.get(&sampler).copied()
    }

    /// Number of resources currently held
    pub fn resource_count(&self) -> usize {
        self.textures.len() + self.samplers.len()
    }

    /// Give every resource back to the renderer and return to the uninitialized state
    pub fn release(&mut self, renderer: &mut dyn Renderer) {
        for (_, handle) in self.textures.drain() {
            renderer.release(handle.into());
        }
        for (_, handle) in self.samplers.drain() {
            renderer.release(handle.into());
        }
        self.initialized = false;
    }
}

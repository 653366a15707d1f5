//! Resource descriptors and handles shared by all backends

use bitflags::bitflags;

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle for a GPU sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u32);

/// Handle for a GPU buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Any resource a renderer can release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceHandle {
    /// A texture
    Texture(TextureHandle),
    /// A sampler
    Sampler(SamplerHandle),
    /// A buffer
    Buffer(BufferHandle),
}

impl From<TextureHandle> for ResourceHandle {
    fn from(handle: TextureHandle) -> Self {
        Self::Texture(handle)
    }
}

impl From<SamplerHandle> for ResourceHandle {
    fn from(handle: SamplerHandle) -> Self {
        Self::Sampler(handle)
    }
}

impl From<BufferHandle> for ResourceHandle {
    fn from(handle: BufferHandle) -> Self {
        Self::Buffer(handle)
    }
}

/// Texel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, linear
    Rgba8Unorm,
    /// 8-bit RGBA, sRGB encoded
    Rgba8UnormSrgb,
}

/// Texture creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    /// Debug label
    pub label: &'static str,
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
    /// Texel format
    pub format: TextureFormat,
    /// Fill color for the texture's initial contents, RGBA
    pub clear_color: [u8; 4],
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Linear filtering
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Sampler creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerDesc {
    /// Debug label
    pub label: &'static str,
    /// Filtering mode
    pub filter: FilterMode,
    /// Wrapping mode
    pub wrap: WrapMode,
}

bitflags! {
    /// How a buffer will be bound
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Vertex input
        const VERTEX = 1 << 0;
        /// Index input
        const INDEX = 1 << 1;
        /// Rewritten every frame
        const DYNAMIC = 1 << 2;
    }
}

/// Buffer creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Debug label
    pub label: &'static str,
    /// Size in bytes
    pub size: u64,
    /// Binding usage
    pub usage: BufferUsage,
}

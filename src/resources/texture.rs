//! Tagged texture slots.
//!
//! [`TextureRegistry`] owns at most [`MAX_TEXTURES`] textures. Each texture is
//! registered under a string tag and receives the next free slot. The slot is
//! also the binding index of the texture in the shader (see
//! [`texture_slots_layout`]), so the order in which textures are loaded decides
//! which sampler a tag ends up in. Slots are never reassigned.

use std::path::Path;

use image::DynamicImage;

use crate::error::{Result, SceneError};

/// Number of texture slots. The scene shader declares exactly this many
/// texture bindings (`t_slot_0` .. `t_slot_15`) and the slot layout below is
/// built from the same constant.
pub const MAX_TEXTURES: usize = 16;

/// Binding index of the shared sampler, directly after the texture slots.
pub const SAMPLER_BINDING: u32 = MAX_TEXTURES as u32;

/// Sampler value pushed to the shader when a tag does not resolve.
pub const TEXTURE_NOT_FOUND: i32 = -1;

/// The GPU side of the registry: creating, binding and destroying textures.
pub trait TextureBackend {
    type Handle;

    /// Upload a decoded image (3 or 4 channels) as a mip-mapped 2D texture.
    fn upload(&mut self, image: &DynamicImage, label: &str) -> Result<Self::Handle>;

    /// Make `handle` available to the shader at binding `slot`.
    fn bind(&mut self, slot: usize, handle: &Self::Handle);

    fn release(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    entries: Vec<TextureEntry<B::Handle>>,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Vec::with_capacity(MAX_TEXTURES),
        }
    }

    /// Load the image at `path` into the next free slot under `tag`.
    ///
    /// On failure the error is logged and the registry is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<usize> {
        let path = path.as_ref();
        let result = self.try_load(path, tag);
        if let Err(e) = &result {
            log::error!("Could not load image {} as '{tag}': {e}", path.display());
        }
        result
    }

    fn try_load(&mut self, path: &Path, tag: &str) -> Result<usize> {
        self.ensure_capacity()?;
        let img = crate::resources::load_image(path)?;
        let slot = self.register_image(&img, tag)?;
        log::info!(
            "Successfully loaded image: {}, width: {}, height: {}, channels: {}, slot: {slot}",
            path.display(),
            img.width(),
            img.height(),
            img.color().channel_count()
        );
        Ok(slot)
    }

    /// Register an already decoded image. The image is uploaded as-is, no
    /// flipping happens here.
    pub fn register_image(&mut self, img: &DynamicImage, tag: &str) -> Result<usize> {
        self.ensure_capacity()?;
        crate::resources::check_channels(img)?;
        if self.find_slot(tag).is_some() {
            log::warn!("Texture tag '{tag}' is already registered; the earlier slot keeps shadowing it");
        }
        let handle = self.backend.upload(img, tag)?;
        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(slot)
    }

    /// Bind every texture to its own slot, in registration order.
    pub fn bind_all(&mut self) {
        for (slot, entry) in self.entries.iter().enumerate() {
            self.backend.bind(slot, &entry.handle);
        }
    }

    /// Slot of the first texture registered under `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    /// Handle of the first texture registered under `tag`.
    pub fn find_id(&self, tag: &str) -> Option<&B::Handle> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    /// Release every texture. The registry is empty afterwards.
    pub fn release_all(&mut self) {
        for entry in self.entries.drain(..) {
            self.backend.release(entry.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TEXTURES
    }

    pub fn entries(&self) -> &[TextureEntry<B::Handle>] {
        &self.entries
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn ensure_capacity(&self) -> Result<()> {
        if self.is_full() {
            Err(SceneError::CapacityExceeded {
                capacity: MAX_TEXTURES,
            })
        } else {
            Ok(())
        }
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Bind group layout with one 2D texture per slot plus the shared sampler.
pub fn texture_slots_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURES as u32)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .collect();
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: SAMPLER_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_slots_layout"),
    })
}

//! GPU textures and the wgpu texture-slot backend.
//!
//! This module provides [`Texture`], a wrapper around a WGPU texture and its
//! view, and [`GpuTextureBackend`], which backs a
//! [`TextureRegistry`](crate::resources::texture::TextureRegistry) with real
//! GPU textures and keeps the slot bind group in sync with the registry.

use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::{
    error::{Result, SceneError},
    resources::texture::{MAX_TEXTURES, SAMPLER_BINDING, TextureBackend, texture_slots_layout},
};

/// A GPU texture with its default view.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Colour textures are stored as 8-bit sRGB with alpha; RGB images get an
    /// opaque alpha channel on upload.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// A 1x1 texture of a single colour. Used to fill texture slots that have
    /// nothing registered so the slot bind group is always complete.
    pub fn create_solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        label: &str,
    ) -> Texture {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Texture { texture, view }
    }

    /// Upload a decoded image with a full mip chain.
    ///
    /// Mip levels are downsampled on the CPU and written level by level, wgpu
    /// has no built-in mipmap generation.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        label: Option<&str>,
    ) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        let max_dimension = device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
            return Err(SceneError::Upload(format!(
                "{}x{} does not fit a 2D texture (limit {max_dimension})",
                width, height
            )));
        }
        let rgba = img.to_rgba8();
        let mip_level_count = mip_level_count(width, height);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_level(queue, &texture, &rgba, 0);
        let mut previous = rgba;
        for level in 1..mip_level_count {
            let w = (previous.width() / 2).max(1);
            let h = (previous.height() / 2).max(1);
            let next = image::imageops::resize(&previous, w, h, FilterType::Triangle);
            write_level(queue, &texture, &next, level);
            previous = next;
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { texture, view })
    }
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

fn write_level(queue: &wgpu::Queue, texture: &wgpu::Texture, level: &RgbaImage, mip_level: u32) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level,
            origin: wgpu::Origin3d::ZERO,
        },
        level,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * level.width()),
            rows_per_image: Some(level.height()),
        },
        wgpu::Extent3d {
            width: level.width(),
            height: level.height(),
            depth_or_array_layers: 1,
        },
    );
}

/// Repeat wrapping with linear filtering, shared by every texture slot.
pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("texture_slot_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

/// [`TextureBackend`] that creates wgpu textures and exposes the bound slots
/// as one bind group (group 2 of the scene pipeline).
pub struct GpuTextureBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    placeholder: Texture,
    slots: Vec<Option<wgpu::TextureView>>,
    bind_group: wgpu::BindGroup,
}

impl GpuTextureBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = texture_slots_layout(device);
        let sampler = create_default_sampler(device);
        let placeholder = Texture::create_solid(device, queue, [255, 255, 255, 255], "empty texture slot");
        let slots = vec![None; MAX_TEXTURES];
        let bind_group = build_bind_group(device, &layout, &sampler, &placeholder, &slots);
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout,
            sampler,
            placeholder,
            slots,
            bind_group,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn bound_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn rebuild(&mut self) {
        self.bind_group = build_bind_group(
            &self.device,
            &self.layout,
            &self.sampler,
            &self.placeholder,
            &self.slots,
        );
    }
}

impl TextureBackend for GpuTextureBackend {
    type Handle = Texture;

    fn upload(&mut self, image: &DynamicImage, label: &str) -> Result<Texture> {
        Texture::from_image(&self.device, &self.queue, image, Some(label))
    }

    fn bind(&mut self, slot: usize, handle: &Texture) {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = Some(handle.view.clone());
                self.rebuild();
            }
            None => log::error!("Texture slot {slot} is out of range (max {MAX_TEXTURES})"),
        }
    }

    /// Destroys the texture. Every slot falls back to the placeholder since a
    /// bind group may not reference a destroyed texture; bind the remaining
    /// textures again if they are still needed.
    fn release(&mut self, handle: Texture) {
        if self.slots.iter().any(Option::is_some) {
            self.slots.iter_mut().for_each(|slot| *slot = None);
            self.rebuild();
        }
        handle.texture.destroy();
    }
}

fn build_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    placeholder: &Texture,
    slots: &[Option<wgpu::TextureView>],
) -> wgpu::BindGroup {
    let mut entries: Vec<wgpu::BindGroupEntry> = slots
        .iter()
        .enumerate()
        .map(|(binding, view)| wgpu::BindGroupEntry {
            binding: binding as u32,
            resource: wgpu::BindingResource::TextureView(view.as_ref().unwrap_or(&placeholder.view)),
        })
        .collect();
    entries.push(wgpu::BindGroupEntry {
        binding: SAMPLER_BINDING,
        resource: wgpu::BindingResource::Sampler(sampler),
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &entries,
        label: Some("texture_slots_bind_group"),
    })
}

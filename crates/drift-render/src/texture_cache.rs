//! GPU texture cache: decodes sprite images and keeps their textures alive

use crate::context::RenderError;
use drift_core::{Size, TextureId};
use std::collections::HashMap;
use std::path::Path;
use wgpu::util::DeviceExt;

/// A GPU-resident sprite texture with the bind group used to sample it
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub size: Size,
}

/// Decode an image file into RGBA8 pixels
pub fn decode_image(path: &Path) -> Result<image::RgbaImage, RenderError> {
    let img = image::open(path).map_err(|e| RenderError::ImageDecode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgba8())
}

/// Cache of GPU textures keyed by handle
pub struct TextureCache {
    textures: HashMap<TextureId, GpuTexture>,
    next_id: u32,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_id: 1,
        }
    }

    /// Load a sprite from an image file on disk and upload it.
    ///
    /// The decoded pixels are dropped once uploaded, whether or not the upload succeeds.
    pub fn load_file(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &Path,
    ) -> Result<(TextureId, Size), RenderError> {
        let rgba = decode_image(path)?;
        let (width, height) = rgba.dimensions();
        let name = path.display().to_string();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(&name),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &rgba,
        );
        drop(rgba);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Pixel art: sample texels as-is
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", name)),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", name)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let id = TextureId(self.next_id);
        self.next_id += 1;
        let size = Size::new(width, height);
        self.textures.insert(
            id,
            GpuTexture {
                texture,
                view,
                sampler,
                bind_group,
                size,
            },
        );
        tracing::debug!(path = %name, id = id.0, width, height, "texture uploaded");

        Ok((id, size))
    }

    /// Get a texture by handle, returning None if not loaded
    pub fn get(&self, id: TextureId) -> Option<&GpuTexture> {
        self.textures.get(&id)
    }

    /// Drop a texture. Returns false if it was not loaded.
    pub fn remove(&mut self, id: TextureId) -> bool {
        match self.textures.remove(&id) {
            Some(gpu) => {
                gpu.texture.destroy();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drop every texture, newest first
    pub fn clear(&mut self) {
        let mut ids: Vec<TextureId> = self.textures.keys().copied().collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        for id in ids {
            self.remove(id);
        }
    }
}

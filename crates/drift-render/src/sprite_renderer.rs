//! Draws a runtime `Frame` onto the window surface

use crate::context::{RenderContext, RenderError};
use crate::sprite_pipeline::{ScreenUniforms, SpritePipeline, SpriteUniforms, QUAD_VERTICES};
use crate::texture_cache::TextureCache;
use drift_core::{Color, Size, TextureId};
use drift_runtime::Frame;
use std::path::Path;
use wgpu::util::DeviceExt;

/// Owns the render context, the sprite pipeline and every loaded texture
pub struct SpriteRenderer {
    context: RenderContext,
    pipeline: SpritePipeline,
    textures: TextureCache,
    screen_buffer: wgpu::Buffer,
}

impl SpriteRenderer {
    pub fn new(context: RenderContext) -> Self {
        let pipeline = SpritePipeline::new(&context.device, context.format());

        let screen_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Screen Uniform Buffer"),
                contents: bytemuck::cast_slice(&[ScreenUniforms::new(context.extent())]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            context,
            pipeline,
            textures: TextureCache::new(),
            screen_buffer,
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    /// Decode and upload a sprite image
    pub fn load_texture(&mut self, path: &Path) -> Result<(TextureId, Size), RenderError> {
        self.textures.load_file(
            &self.context.device,
            &self.context.queue,
            &self.pipeline.texture_bind_group_layout,
            path,
        )
    }

    pub fn release_texture(&mut self, id: TextureId) {
        if !self.textures.remove(id) {
            tracing::warn!(id = id.0, "release of unknown texture");
        }
    }

    /// Clear to the frame's color and blit its sprites in order.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::SurfaceError(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.context.device;
        let queue = &self.context.queue;
        queue.write_buffer(
            &self.screen_buffer,
            0,
            bytemuck::cast_slice(&[ScreenUniforms::new(self.context.extent())]),
        );

        // Per-sprite uniforms must outlive the render pass
        let mut draws = Vec::with_capacity(frame.sprites.len());
        for sprite in &frame.sprites {
            let Some(texture) = self.textures.get(sprite.texture) else {
                tracing::warn!(id = sprite.texture.0, "skipping sprite with unknown texture");
                continue;
            };
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Uniform Buffer"),
                contents: bytemuck::cast_slice(&[SpriteUniforms::from(sprite.rect)]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Sprite Uniform Bind Group"),
                layout: &self.pipeline.uniform_bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.screen_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: buffer.as_entire_binding(),
                    },
                ],
            });
            draws.push((bind_group, &texture.bind_group));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Sprite Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(frame.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline.pipeline);
            for (uniforms, texture) in &draws {
                render_pass.set_bind_group(0, uniforms, &[]);
                render_pass.set_bind_group(1, *texture, &[]);
                render_pass.draw(0..QUAD_VERTICES, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Drop for SpriteRenderer {
    fn drop(&mut self) {
        // Textures go before the device that owns them
        self.textures.clear();
    }
}

fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_widens_channels() {
        let c = clear_color(Color::WHITE);
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 1.0, 1.0, 1.0));
    }
}

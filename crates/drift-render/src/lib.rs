//! Drift Render - wgpu-based sprite renderer
//!
//! Decodes sprite images with `image`, uploads them as textures and draws
//! a runtime `Frame` as textured screen-space rectangles.

mod context;
mod sprite_pipeline;
mod sprite_renderer;
mod texture_cache;

pub use context::{RenderContext, RenderError};
pub use sprite_pipeline::{ScreenUniforms, SpritePipeline, SpriteUniforms};
pub use sprite_renderer::SpriteRenderer;
pub use texture_cache::{decode_image, GpuTexture, TextureCache};

#[cfg(test)]
mod tests {
    #[test]
    fn sprite_shader_wgsl_parses() {
        let source = include_str!("sprite_shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("sprite_shader.wgsl failed to parse");
    }
}

//! CPU mirror of the pixel-space vertex shader.
//!
//! Kept step-for-step identical to `PIXEL_SPACE_VERTEX_SHADER` so the
//! transform can be checked without a GPU.

use super::vec2::Vec2;

/// Each intermediate value of the pixel -> clip conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSpaceTrace {
    pub zero_to_one: Vec2,
    pub zero_to_two: Vec2,
    pub clip_space: Vec2,
    /// `clip_space` with y flipped; what ends up in `gl_Position.xy`
    pub position: Vec2,
}

/// Y axis flip between framebuffer space (down) and clip space (up)
pub const FLIP_Y: Vec2 = Vec2::new(1.0, -1.0);

pub fn trace_pixel_to_clip(pixel: Vec2, resolution: Vec2) -> ClipSpaceTrace {
    let zero_to_one = pixel.div_elem(&resolution);
    let zero_to_two = zero_to_one * 2.0;
    let clip_space = zero_to_two - Vec2::ONE;
    let position = clip_space.mul_elem(&FLIP_Y);

    ClipSpaceTrace {
        zero_to_one,
        zero_to_two,
        clip_space,
        position,
    }
}

/// `((pixel / resolution) * 2 - 1) * (1, -1)`
pub fn pixel_to_clip(pixel: Vec2, resolution: Vec2) -> Vec2 {
    trace_pixel_to_clip(pixel, resolution).position
}

/// Inverse of `pixel_to_clip`, used to place clip-space geometry on a raster
pub fn clip_to_pixel(clip: Vec2, resolution: Vec2) -> Vec2 {
    let unflipped = clip.mul_elem(&FLIP_Y);
    (unflipped + Vec2::ONE).scale(0.5).mul_elem(&resolution)
}

pub mod vec2;
pub mod clip;

pub use vec2::{Vec2, points_from_flat};
pub use clip::{ClipSpaceTrace, pixel_to_clip, clip_to_pixel, trace_pixel_to_clip};

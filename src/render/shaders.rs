use std::fmt;

/// Programmable pipeline stage a shader source targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// GLSL source text tagged with its stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub text: &'static str,
}

impl ShaderSource {
    pub const fn vertex(text: &'static str) -> Self {
        Self { stage: ShaderStage::Vertex, text }
    }

    pub const fn fragment(text: &'static str) -> Self {
        Self { stage: ShaderStage::Fragment, text }
    }
}

/// Vertex input fed from the position buffer
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Backing-store size used by the pixel-space vertex shader
pub const RESOLUTION_UNIFORM: &str = "u_resolution";

/// Passes positions through untouched; missing z/w default to 0 and 1
pub const CLIP_SPACE_VERTEX_SHADER: &str = r#"
attribute vec4 a_position;

void main() {
    gl_Position = a_position;
}
"#;

/// Maps pixel coordinates (origin top-left) into clip space
pub const PIXEL_SPACE_VERTEX_SHADER: &str = r#"
attribute vec2 a_position;

uniform vec2 u_resolution;

void main() {
    // pixels -> 0..1
    vec2 zeroToOne = a_position.xy / u_resolution;

    // 0..1 -> 0..2
    vec2 zeroToTwo = zeroToOne * 2.0;

    // 0..2 -> -1..1
    vec2 clipSpace = zeroToTwo - 1.0;

    // framebuffer y grows downward, clip space y grows upward
    gl_Position = vec4(clipSpace * vec2(1, -1), 0, 1);
}
"#;

/// Flat pink fill
pub const SOLID_COLOR_FRAGMENT_SHADER: &str = r#"
precision mediump float;

void main() {
    gl_FragColor = vec4(1, 0, 0.5, 1);
}
"#;

/// Fill colour written by `SOLID_COLOR_FRAGMENT_SHADER`, as 8-bit RGBA
pub const SOLID_COLOR_RGBA: [u8; 4] = [255, 0, 128, 255];

pub const CLIP_SPACE_VERTEX: ShaderSource = ShaderSource::vertex(CLIP_SPACE_VERTEX_SHADER);
pub const PIXEL_SPACE_VERTEX: ShaderSource = ShaderSource::vertex(PIXEL_SPACE_VERTEX_SHADER);
pub const SOLID_COLOR_FRAGMENT: ShaderSource = ShaderSource::fragment(SOLID_COLOR_FRAGMENT_SHADER);

//! The capability set the render core needs from a graphics context.
//!
//! `WebGLContext` implements it over a browser WebGL context. Handles are
//! opaque associated types; deleting one consumes it so a released object
//! cannot be used again.

use super::shaders::ShaderStage;

/// Hint about how often uploaded buffer data changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    Static,
}

/// How `draw_arrays` assembles vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
}

impl Primitive {
    /// Vertices consumed per primitive
    pub fn vertices_per_primitive(&self) -> i32 {
        match self {
            Primitive::Triangles => 3,
        }
    }
}

/// Layout of one float attribute inside the bound array buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLayout {
    pub size: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

impl AttribLayout {
    /// `size` floats per vertex, no gaps between vertices
    pub const fn tightly_packed(size: i32) -> Self {
        Self {
            size,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

/// Opaque graphics API used by the shader, buffer and pass modules.
///
/// Every call is synchronous. Status queries report success explicitly;
/// none of these calls raise errors themselves.
pub trait GraphicsContext {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: &Self::Program);

    /// `None` when the program has no active attribute with that name
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>);
    /// Uploads into whatever is bound to the array buffer target
    fn array_buffer_data_f32(&self, data: &[f32], usage: BufferUsage);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn enable_vertex_attrib_array(&self, index: u32);
    /// Float attribute sourced from the bound array buffer
    fn vertex_attrib_pointer_f32(&self, index: u32, layout: &AttribLayout);
    fn uniform_2f(&self, location: &Self::UniformLocation, x: f32, y: f32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
}

pub mod backend;
pub mod buffer;
pub mod pass;
pub mod program;
pub mod shaders;
pub mod surface;
pub mod webgl;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::GraphicsContext;
pub use pass::{render_once, DrawSummary, DrawnPass, PreparedPass, Variant};
pub use program::{compile_shader, create_program, link_program, CompiledShader, LinkedProgram};
pub use surface::{resize_to_display, Surface};
pub use webgl::WebGLContext;

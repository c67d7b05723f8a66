//! Error types for shader setup and drawing.

use thiserror::Error;

use crate::render::shaders::ShaderStage;

/// Errors produced while preparing or drawing a pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The compiler rejected a shader source.
    #[error("shader compile error ({stage}):\n{log}")]
    ShaderCompile {
        stage: ShaderStage,
        /// The driver's info log.
        log: String,
    },

    /// The linker rejected a vertex/fragment pair.
    #[error("program link error:\n{log}")]
    ProgramLink { log: String },

    /// A shader of the wrong stage was handed to the linker.
    #[error("expected a {expected} shader, got a {found} shader")]
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },

    /// The context returned no handle for a new object.
    #[error("failed to allocate {0}")]
    ResourceAllocation(&'static str),

    #[error("attribute '{0}' not found in program")]
    AttributeNotFound(String),

    #[error("uniform '{0}' not found in program")]
    UniformNotFound(String),

    /// Vertex data is empty or not a whole number of vertices.
    #[error("malformed vertex data: {len} floats cannot be split into {components}-component vertices")]
    MalformedVertexData { len: usize, components: i32 },

    #[error("WebGL not supported")]
    ContextUnavailable,

    #[error("canvas not found: {0}")]
    CanvasNotFound(String),

    /// A JavaScript host call failed.
    #[error("host error: {0}")]
    Host(String),

    #[error("config error: {0}")]
    Config(String),
}

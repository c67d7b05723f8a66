//! Shader compilation and program linking.
//!
//! Both steps report failure as a typed error carrying the driver's log, and
//! release the rejected object before returning. A handle that exists is
//! always a valid one.

use crate::error::RenderError;
use super::backend::GraphicsContext;
use super::shaders::{ShaderSource, ShaderStage};

/// A shader that compiled successfully, still unlinked
pub struct CompiledShader<C: GraphicsContext> {
    handle: C::Shader,
    stage: ShaderStage,
}

impl<C: GraphicsContext> CompiledShader<C> {
    pub fn handle(&self) -> &C::Shader {
        &self.handle
    }

    pub fn release(self, ctx: &C) {
        ctx.delete_shader(self.handle);
    }
}

/// A linked program together with the shaders it was built from
pub struct LinkedProgram<C: GraphicsContext> {
    program: C::Program,
    vertex: CompiledShader<C>,
    fragment: CompiledShader<C>,
}

impl<C: GraphicsContext> LinkedProgram<C> {
    pub fn handle(&self) -> &C::Program {
        &self.program
    }

    /// Make this the active program for subsequent draws
    pub fn activate(&self, ctx: &C) {
        ctx.use_program(&self.program);
    }

    /// Delete the program and both constituent shaders
    pub fn release(self, ctx: &C) {
        ctx.delete_program(self.program);
        self.vertex.release(ctx);
        self.fragment.release(ctx);
    }
}

/// Compile a shader from source
pub fn compile_shader<C: GraphicsContext>(
    ctx: &C,
    source: &ShaderSource,
) -> Result<CompiledShader<C>, RenderError> {
    let shader = ctx
        .create_shader(source.stage)
        .ok_or(RenderError::ResourceAllocation("shader"))?;

    ctx.shader_source(&shader, source.text);
    ctx.compile_shader(&shader);

    if ctx.shader_compile_status(&shader) {
        log::debug!("compiled {} shader", source.stage);
        Ok(CompiledShader { handle: shader, stage: source.stage })
    } else {
        let info_log = ctx.shader_info_log(&shader);
        log::error!("{} shader failed to compile:\n{}", source.stage, info_log);
        ctx.delete_shader(shader);
        Err(RenderError::ShaderCompile { stage: source.stage, log: info_log })
    }
}

/// Link a vertex and a fragment shader into a program.
///
/// Takes ownership of both shaders. On any failure they are released along
/// with the program, so nothing is left behind.
pub fn link_program<C: GraphicsContext>(
    ctx: &C,
    vertex: CompiledShader<C>,
    fragment: CompiledShader<C>,
) -> Result<LinkedProgram<C>, RenderError> {
    let mismatch = if vertex.stage != ShaderStage::Vertex {
        Some(RenderError::StageMismatch { expected: ShaderStage::Vertex, found: vertex.stage })
    } else if fragment.stage != ShaderStage::Fragment {
        Some(RenderError::StageMismatch { expected: ShaderStage::Fragment, found: fragment.stage })
    } else {
        None
    };
    if let Some(err) = mismatch {
        vertex.release(ctx);
        fragment.release(ctx);
        return Err(err);
    }

    let program = match ctx.create_program() {
        Some(program) => program,
        None => {
            vertex.release(ctx);
            fragment.release(ctx);
            return Err(RenderError::ResourceAllocation("program"));
        }
    };

    ctx.attach_shader(&program, vertex.handle());
    ctx.attach_shader(&program, fragment.handle());
    ctx.link_program(&program);

    if ctx.program_link_status(&program) {
        log::debug!("linked program");
        Ok(LinkedProgram { program, vertex, fragment })
    } else {
        let info_log = ctx.program_info_log(&program);
        log::error!("program failed to link:\n{}", info_log);
        ctx.delete_program(program);
        vertex.release(ctx);
        fragment.release(ctx);
        Err(RenderError::ProgramLink { log: info_log })
    }
}

/// Compile both stages and link them
pub fn create_program<C: GraphicsContext>(
    ctx: &C,
    vertex_src: &ShaderSource,
    fragment_src: &ShaderSource,
) -> Result<LinkedProgram<C>, RenderError> {
    let vertex = compile_shader(ctx, vertex_src)?;
    let fragment = match compile_shader(ctx, fragment_src) {
        Ok(fragment) => fragment,
        Err(e) => {
            vertex.release(ctx);
            return Err(e);
        }
    };
    link_program(ctx, vertex, fragment)
}

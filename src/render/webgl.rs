use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader,
    WebGlUniformLocation,
};

use crate::error::RenderError;
use super::backend::{AttribLayout, BufferUsage, GraphicsContext, Primitive};
use super::shaders::ShaderStage;

/// Wrapper around a WebGL 1 context
pub struct WebGLContext {
    pub gl: WebGlRenderingContext,
}

impl WebGLContext {
    pub fn new(gl: WebGlRenderingContext) -> Self {
        Self { gl }
    }

    /// Get the `webgl` context of a canvas
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
        let gl = canvas
            .get_context("webgl")
            .map_err(|e| RenderError::Host(format!("{:?}", e)))?
            .ok_or(RenderError::ContextUnavailable)?
            .dyn_into::<WebGlRenderingContext>()
            .map_err(|_| RenderError::ContextUnavailable)?;
        Ok(Self::new(gl))
    }

    /// Read back the whole `width` x `height` framebuffer as RGBA, bottom row first
    pub fn read_pixels_rgba(&self, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        self.gl
            .read_pixels_with_opt_u8_array(
                0,
                0,
                width as i32,
                height as i32,
                WebGlRenderingContext::RGBA,
                WebGlRenderingContext::UNSIGNED_BYTE,
                Some(pixels.as_mut_slice()),
            )
            .map_err(|e| RenderError::Host(format!("readPixels failed: {:?}", e)))?;
        Ok(pixels)
    }
}

fn stage_constant(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => WebGlRenderingContext::VERTEX_SHADER,
        ShaderStage::Fragment => WebGlRenderingContext::FRAGMENT_SHADER,
    }
}

fn usage_constant(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => WebGlRenderingContext::STATIC_DRAW,
    }
}

fn primitive_constant(mode: Primitive) -> u32 {
    match mode {
        Primitive::Triangles => WebGlRenderingContext::TRIANGLES,
    }
}

impl GraphicsContext for WebGLContext {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type UniformLocation = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        self.gl.create_shader(stage_constant(stage))
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        self.gl.compile_shader(shader);
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        self.gl
            .get_shader_parameter(shader, WebGlRenderingContext::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> String {
        self.gl.get_shader_info_log(shader).unwrap_or_default()
    }

    fn delete_shader(&self, shader: WebGlShader) {
        self.gl.delete_shader(Some(&shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        self.gl.create_program()
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.gl.attach_shader(program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        self.gl.link_program(program);
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        self.gl
            .get_program_parameter(program, WebGlRenderingContext::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> String {
        self.gl.get_program_info_log(program).unwrap_or_default()
    }

    fn delete_program(&self, program: WebGlProgram) {
        self.gl.delete_program(Some(&program));
    }

    fn use_program(&self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> Option<u32> {
        // -1 when the attribute is missing or optimised out
        u32::try_from(self.gl.get_attrib_location(program, name)).ok()
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        self.gl.create_buffer()
    }

    fn bind_array_buffer(&self, buffer: Option<&WebGlBuffer>) {
        self.gl.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, buffer);
    }

    fn array_buffer_data_f32(&self, data: &[f32], usage: BufferUsage) {
        // Safety: the view is consumed by bufferData before any allocation
        // could move wasm memory
        unsafe {
            let array = js_sys::Float32Array::view(data);
            self.gl.buffer_data_with_array_buffer_view(
                WebGlRenderingContext::ARRAY_BUFFER,
                &array,
                usage_constant(usage),
            );
        }
    }

    fn delete_buffer(&self, buffer: WebGlBuffer) {
        self.gl.delete_buffer(Some(&buffer));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.gl.enable_vertex_attrib_array(index);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, layout: &AttribLayout) {
        self.gl.vertex_attrib_pointer_with_i32(
            index,
            layout.size,
            WebGlRenderingContext::FLOAT,
            layout.normalized,
            layout.stride,
            layout.offset,
        );
    }

    fn uniform_2f(&self, location: &WebGlUniformLocation, x: f32, y: f32) {
        self.gl.uniform2f(Some(location), x, y);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
    }

    fn clear_color_buffer(&self) {
        self.gl.clear(WebGlRenderingContext::COLOR_BUFFER_BIT);
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.gl.draw_arrays(primitive_constant(mode), first, count);
    }
}

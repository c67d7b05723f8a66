//! Scripted stand-ins for the graphics context and drawing surface.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::backend::{AttribLayout, BufferUsage, GraphicsContext, Primitive};
use super::shaders::ShaderStage;
use super::surface::Surface;

pub const SYNTAX_ERROR_LOG: &str = "ERROR: 0:2: 'main' : syntax error";
pub const LINK_ERROR_LOG: &str = "ERROR: missing main entry point";

/// Every context call, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData { data: Vec<f32>, usage: BufferUsage },
    DeleteBuffer(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer(u32, AttribLayout),
    Uniform2f(u32, f32, f32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DrawArrays(Primitive, i32, i32),
}

#[derive(Debug, PartialEq)]
pub struct MockShader(pub u32);

#[derive(Debug, PartialEq)]
pub struct MockProgram(pub u32);

#[derive(Debug, PartialEq)]
pub struct MockBuffer(pub u32);

#[derive(Debug, PartialEq)]
pub struct MockUniform(pub u32);

/// Records calls and simulates compile/link status.
///
/// A shader compiles unless its stage is listed in `reject_stage` or its
/// source contains `#error`. A program links when it has one compiled
/// shader of each stage and `reject_link` is unset. Attribute and uniform
/// lookups succeed when an attached source mentions the name.
#[derive(Default)]
pub struct RecordingContext {
    pub reject_stage: Option<ShaderStage>,
    pub reject_link: bool,
    pub refuse_allocation: bool,
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    live: RefCell<HashSet<u32>>,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
    shader_sources: RefCell<HashMap<u32, String>>,
    compiled: RefCell<HashSet<u32>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    linked: RefCell<HashSet<u32>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_stage(stage: ShaderStage) -> Self {
        Self { reject_stage: Some(stage), ..Self::default() }
    }

    pub fn rejecting_link() -> Self {
        Self { reject_link: true, ..Self::default() }
    }

    pub fn refusing_allocation() -> Self {
        Self { refuse_allocation: true, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Objects created and not yet deleted
    pub fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> Option<u32> {
        if self.refuse_allocation {
            return None;
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.live.borrow_mut().insert(id);
        Some(id)
    }

    fn release(&self, id: u32) {
        self.live.borrow_mut().remove(&id);
    }

    fn attached_sources_mention(&self, program: u32, name: &str) -> bool {
        let attached = self.attached.borrow();
        let sources = self.shader_sources.borrow();
        attached
            .get(&program)
            .map(|shaders| {
                shaders
                    .iter()
                    .filter_map(|id| sources.get(id))
                    .any(|src| src.contains(name))
            })
            .unwrap_or(false)
    }
}

impl GraphicsContext for RecordingContext {
    type Shader = MockShader;
    type Program = MockProgram;
    type Buffer = MockBuffer;
    type UniformLocation = MockUniform;

    fn create_shader(&self, stage: ShaderStage) -> Option<MockShader> {
        let id = self.allocate()?;
        self.shader_stages.borrow_mut().insert(id, stage);
        self.record(Call::CreateShader(stage, id));
        Some(MockShader(id))
    }

    fn shader_source(&self, shader: &MockShader, source: &str) {
        self.shader_sources.borrow_mut().insert(shader.0, source.to_string());
        self.record(Call::ShaderSource(shader.0));
    }

    fn compile_shader(&self, shader: &MockShader) {
        self.record(Call::CompileShader(shader.0));
        let stage = self.shader_stages.borrow().get(&shader.0).copied();
        let bad_source = self
            .shader_sources
            .borrow()
            .get(&shader.0)
            .map(|s| s.contains("#error"))
            .unwrap_or(true);
        if stage.is_some() && stage != self.reject_stage && !bad_source {
            self.compiled.borrow_mut().insert(shader.0);
        }
    }

    fn shader_compile_status(&self, shader: &MockShader) -> bool {
        self.compiled.borrow().contains(&shader.0)
    }

    fn shader_info_log(&self, shader: &MockShader) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            SYNTAX_ERROR_LOG.to_string()
        }
    }

    fn delete_shader(&self, shader: MockShader) {
        self.release(shader.0);
        self.record(Call::DeleteShader(shader.0));
    }

    fn create_program(&self) -> Option<MockProgram> {
        let id = self.allocate()?;
        self.record(Call::CreateProgram(id));
        Some(MockProgram(id))
    }

    fn attach_shader(&self, program: &MockProgram, shader: &MockShader) {
        self.attached.borrow_mut().entry(program.0).or_default().push(shader.0);
        self.record(Call::AttachShader { program: program.0, shader: shader.0 });
    }

    fn link_program(&self, program: &MockProgram) {
        self.record(Call::LinkProgram(program.0));
        let attached = self.attached.borrow();
        let stages = self.shader_stages.borrow();
        let compiled = self.compiled.borrow();
        let shaders = attached.get(&program.0).cloned().unwrap_or_default();
        let has = |stage: ShaderStage| {
            shaders
                .iter()
                .any(|id| stages.get(id) == Some(&stage) && compiled.contains(id))
        };
        if !self.reject_link && has(ShaderStage::Vertex) && has(ShaderStage::Fragment) {
            self.linked.borrow_mut().insert(program.0);
        }
    }

    fn program_link_status(&self, program: &MockProgram) -> bool {
        self.linked.borrow().contains(&program.0)
    }

    fn program_info_log(&self, program: &MockProgram) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            LINK_ERROR_LOG.to_string()
        }
    }

    fn delete_program(&self, program: MockProgram) {
        self.release(program.0);
        self.record(Call::DeleteProgram(program.0));
    }

    fn use_program(&self, program: &MockProgram) {
        self.record(Call::UseProgram(program.0));
    }

    fn attrib_location(&self, program: &MockProgram, name: &str) -> Option<u32> {
        self.attached_sources_mention(program.0, name).then_some(0)
    }

    fn uniform_location(&self, program: &MockProgram, name: &str) -> Option<MockUniform> {
        self.attached_sources_mention(program.0, name)
            .then(|| MockUniform(program.0 * 100 + 1))
    }

    fn create_buffer(&self) -> Option<MockBuffer> {
        let id = self.allocate()?;
        self.record(Call::CreateBuffer(id));
        Some(MockBuffer(id))
    }

    fn bind_array_buffer(&self, buffer: Option<&MockBuffer>) {
        self.record(Call::BindArrayBuffer(buffer.map(|b| b.0)));
    }

    fn array_buffer_data_f32(&self, data: &[f32], usage: BufferUsage) {
        self.record(Call::BufferData { data: data.to_vec(), usage });
    }

    fn delete_buffer(&self, buffer: MockBuffer) {
        self.release(buffer.0);
        self.record(Call::DeleteBuffer(buffer.0));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, layout: &AttribLayout) {
        self.record(Call::VertexAttribPointer(index, *layout));
    }

    fn uniform_2f(&self, location: &MockUniform, x: f32, y: f32) {
        self.record(Call::Uniform2f(location.0, x, y));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }
}

/// Surface with settable layout size that counts backing-store writes
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub display: (u32, u32),
    pub backing: (u32, u32),
    pub backing_writes: usize,
}

impl FakeSurface {
    pub fn new(display: (u32, u32), backing: (u32, u32)) -> Self {
        Self { display, backing, backing_writes: 0 }
    }
}

impl Surface for FakeSurface {
    fn display_size(&self) -> (u32, u32) {
        self.display
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        self.backing_writes += 1;
    }
}

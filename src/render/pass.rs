//! The single setup-and-draw sequence.
//!
//! `PreparedPass::prepare` does all one-time work: compile, link, look up
//! shader inputs, upload vertices. `PreparedPass::draw` consumes it, issues
//! exactly one draw call, and returns the `DrawnPass` that owns the GPU
//! objects until `release`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::RenderError;
use crate::math::Vec2;
use super::backend::{GraphicsContext, Primitive};
use super::buffer::VertexBuffer;
use super::program::{create_program, LinkedProgram};
use super::shaders::{
    ShaderSource, CLIP_SPACE_VERTEX, PIXEL_SPACE_VERTEX, POSITION_ATTRIBUTE, RESOLUTION_UNIFORM,
    SOLID_COLOR_FRAGMENT,
};
use super::surface::{resize_to_display, Surface};

/// One triangle given directly in clip space
pub const CLIP_SPACE_TRIANGLE: [f32; 6] = [
    0.0, 0.0,
    0.0, 0.75,
    0.7, 0.0,
];

/// Two triangles covering the pixel rectangle (10, 20)..(80, 30)
pub const PIXEL_SPACE_RECTANGLE: [f32; 12] = [
    10.0, 20.0,
    80.0, 20.0,
    10.0, 30.0,
    10.0, 30.0,
    80.0, 20.0,
    80.0, 30.0,
];

/// Floats read per vertex by both vertex shaders
pub const POSITION_COMPONENTS: i32 = 2;

/// Transparent black
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Which demo geometry and vertex shader to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Positions are already clip-space coordinates
    #[default]
    ClipSpace,
    /// Positions are pixels, converted with `u_resolution`
    PixelSpace,
}

impl Variant {
    pub fn vertex_source(&self) -> &'static ShaderSource {
        match self {
            Variant::ClipSpace => &CLIP_SPACE_VERTEX,
            Variant::PixelSpace => &PIXEL_SPACE_VERTEX,
        }
    }

    pub fn positions(&self) -> &'static [f32] {
        match self {
            Variant::ClipSpace => &CLIP_SPACE_TRIANGLE,
            Variant::PixelSpace => &PIXEL_SPACE_RECTANGLE,
        }
    }

    pub fn uses_resolution(&self) -> bool {
        matches!(self, Variant::PixelSpace)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::ClipSpace => "clip-space",
            Variant::PixelSpace => "pixel-space",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clip-space" => Ok(Variant::ClipSpace),
            "pixel-space" => Ok(Variant::PixelSpace),
            other => Err(RenderError::Config(format!(
                "unknown variant '{}', expected 'clip-space' or 'pixel-space'",
                other
            ))),
        }
    }
}

/// What the single draw did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSummary {
    pub variant: Variant,
    /// Backing-store size the frame was drawn at
    pub resolution: Vec2,
    /// Whether the backing store had to be reallocated first
    pub resized: bool,
    pub primitive: Primitive,
    pub vertex_count: i32,
}

impl DrawSummary {
    pub fn primitive_count(&self) -> i32 {
        self.vertex_count / self.primitive.vertices_per_primitive()
    }
}

/// Program linked, inputs located, vertices uploaded; nothing drawn yet
pub struct PreparedPass<C: GraphicsContext> {
    variant: Variant,
    program: LinkedProgram<C>,
    position_location: u32,
    resolution_location: Option<C::UniformLocation>,
    buffer: VertexBuffer<C>,
}

impl<C: GraphicsContext> PreparedPass<C> {
    pub fn prepare(ctx: &C, variant: Variant) -> Result<Self, RenderError> {
        let program = create_program(ctx, variant.vertex_source(), &SOLID_COLOR_FRAGMENT)?;

        let position_location = match ctx.attrib_location(program.handle(), POSITION_ATTRIBUTE) {
            Some(location) => location,
            None => {
                program.release(ctx);
                return Err(RenderError::AttributeNotFound(POSITION_ATTRIBUTE.to_string()));
            }
        };

        let resolution_location = if variant.uses_resolution() {
            match ctx.uniform_location(program.handle(), RESOLUTION_UNIFORM) {
                Some(location) => Some(location),
                None => {
                    program.release(ctx);
                    return Err(RenderError::UniformNotFound(RESOLUTION_UNIFORM.to_string()));
                }
            }
        } else {
            None
        };

        let buffer = match VertexBuffer::upload_static(ctx, variant.positions(), POSITION_COMPONENTS) {
            Ok(buffer) => buffer,
            Err(e) => {
                program.release(ctx);
                return Err(e);
            }
        };

        log::info!("prepared {} pass", variant);

        Ok(Self {
            variant,
            program,
            position_location,
            resolution_location,
            buffer,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Resize, clear and issue the one draw call
    pub fn draw<S: Surface + ?Sized>(self, ctx: &C, surface: &mut S) -> DrawnPass<C> {
        let resized = resize_to_display(surface);
        let (width, height) = surface.backing_size();
        if width == 0 || height == 0 {
            log::warn!("drawing to an empty {}x{} surface", width, height);
        }

        ctx.viewport(0, 0, width as i32, height as i32);

        let [r, g, b, a] = CLEAR_COLOR;
        ctx.clear_color(r, g, b, a);
        ctx.clear_color_buffer();

        self.program.activate(ctx);
        self.buffer.bind_to_attribute(ctx, self.position_location);

        let resolution = Vec2::new(width as f32, height as f32);
        if let Some(location) = &self.resolution_location {
            ctx.uniform_2f(location, resolution.x, resolution.y);
        }

        let primitive = Primitive::Triangles;
        let vertex_count = self.buffer.vertex_count();
        ctx.draw_arrays(primitive, 0, vertex_count);

        let summary = DrawSummary {
            variant: self.variant,
            resolution,
            resized,
            primitive,
            vertex_count,
        };
        log::info!(
            "drew {} triangle(s) at {}x{}",
            summary.primitive_count(),
            width,
            height
        );

        DrawnPass {
            program: self.program,
            buffer: self.buffer,
            summary,
        }
    }

    /// Release without drawing
    pub fn release(self, ctx: &C) {
        self.program.release(ctx);
        self.buffer.release(ctx);
    }
}

/// Outcome of the draw; keeps the program and buffer alive until shutdown
pub struct DrawnPass<C: GraphicsContext> {
    program: LinkedProgram<C>,
    buffer: VertexBuffer<C>,
    summary: DrawSummary,
}

impl<C: GraphicsContext> DrawnPass<C> {
    pub fn summary(&self) -> &DrawSummary {
        &self.summary
    }

    pub fn release(self, ctx: &C) {
        self.program.release(ctx);
        self.buffer.release(ctx);
        log::debug!("released {} pass", self.summary.variant);
    }
}

/// Prepare and draw in one go
pub fn render_once<C, S>(ctx: &C, surface: &mut S, variant: Variant) -> Result<DrawnPass<C>, RenderError>
where
    C: GraphicsContext,
    S: Surface + ?Sized,
{
    Ok(PreparedPass::prepare(ctx, variant)?.draw(ctx, surface))
}

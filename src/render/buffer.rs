use crate::error::RenderError;
use super::backend::{AttribLayout, BufferUsage, GraphicsContext};

/// Float vertex data uploaded once with a static usage hint
pub struct VertexBuffer<C: GraphicsContext> {
    handle: C::Buffer,
    layout: AttribLayout,
    vertex_count: i32,
}

impl<C: GraphicsContext> VertexBuffer<C> {
    /// Upload `data` as tightly packed vertices of `components` floats each
    pub fn upload_static(ctx: &C, data: &[f32], components: i32) -> Result<Self, RenderError> {
        let vertex_count = vertex_count(data.len(), components)?;

        let buffer = ctx
            .create_buffer()
            .ok_or(RenderError::ResourceAllocation("vertex buffer"))?;
        ctx.bind_array_buffer(Some(&buffer));
        ctx.array_buffer_data_f32(data, BufferUsage::Static);

        log::debug!("uploaded {} vertices ({} floats)", vertex_count, data.len());

        Ok(Self {
            handle: buffer,
            layout: AttribLayout::tightly_packed(components),
            vertex_count,
        })
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Bind and describe this buffer as the source of attribute `location`
    pub fn bind_to_attribute(&self, ctx: &C, location: u32) {
        ctx.enable_vertex_attrib_array(location);
        ctx.bind_array_buffer(Some(&self.handle));
        ctx.vertex_attrib_pointer_f32(location, &self.layout);
    }

    pub fn release(self, ctx: &C) {
        ctx.delete_buffer(self.handle);
    }
}

fn vertex_count(len: usize, components: i32) -> Result<i32, RenderError> {
    let malformed = RenderError::MalformedVertexData { len, components };
    if !(1..=4).contains(&components) || len == 0 {
        return Err(malformed);
    }
    let per_vertex = components as usize;
    if len % per_vertex != 0 {
        return Err(malformed);
    }
    i32::try_from(len / per_vertex).map_err(|_| malformed)
}

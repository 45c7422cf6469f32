use reexplore_shader::vertex::{VertexDescriptor, VertexFormat};

/// Maps a mesh vertex format to its wgpu equivalent.
pub fn wgpu_format(format: VertexFormat) -> wgpu::VertexFormat {
    match format {
        VertexFormat::Float2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float4 => wgpu::VertexFormat::Float32x4,
        VertexFormat::UShort4 => wgpu::VertexFormat::Uint16x4,
    }
}

/// Owned vertex buffer layouts for a pipeline.
///
/// `wgpu::VertexBufferLayout` borrows its attribute list; this keeps the lists
/// alive and hands out layouts in vertex-buffer slot order.
#[derive(Debug, Clone)]
pub struct VertexBuffers {
    buffers: Vec<(u64, Vec<wgpu::VertexAttribute>)>,
}

impl VertexBuffers {
    /// Builds one wgpu vertex buffer per descriptor layout.
    ///
    /// `shader_location` is the attribute's slot number. Descriptor buffers are
    /// assumed dense from 0, which holds for the mesh layout.
    pub fn from_descriptor(desc: &VertexDescriptor) -> Self {
        let mut layouts = desc.layouts.clone();
        layouts.sort_by_key(|l| l.buffer);

        let buffers = layouts
            .iter()
            .map(|layout| {
                let attrs = desc
                    .attributes_in(layout.buffer)
                    .into_iter()
                    .map(|a| wgpu::VertexAttribute {
                        format: wgpu_format(a.format),
                        offset: u64::from(a.offset),
                        shader_location: a.attribute.index(),
                    })
                    .collect();
                (u64::from(layout.stride), attrs)
            })
            .collect();

        Self { buffers }
    }

    pub fn mesh() -> Self {
        Self::from_descriptor(&reexplore_shader::default_vertex_descriptor())
    }

    pub fn layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.buffers
            .iter()
            .map(|(stride, attrs)| wgpu::VertexBufferLayout {
                array_stride: *stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: attrs,
            })
            .collect()
    }
}

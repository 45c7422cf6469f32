//! Vertex stream layout keyed by [`Attribute`] slots.

use crate::bindings::{Attribute, BufferIndex};

/// Per-vertex element formats used by model meshes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexFormat {
    Float2,
    Float3,
    Float4,
    UShort4,
}

impl VertexFormat {
    /// Bytes read by the vertex fetch.
    pub const fn size(self) -> u32 {
        match self {
            Self::Float2 => 8,
            Self::Float3 => 12,
            Self::Float4 => 16,
            Self::UShort4 => 8,
        }
    }

    /// Bytes the attribute advances the interleaved offset by.
    ///
    /// `float3` occupies a full 16-byte `simd` slot.
    pub const fn stride(self) -> u32 {
        match self {
            Self::Float3 => 16,
            other => other.size(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttributeDesc {
    pub attribute: Attribute,
    pub format: VertexFormat,
    /// Byte offset inside a vertex of `buffer`.
    pub offset: u32,
    /// Vertex buffer slot the attribute is fetched from.
    pub buffer: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexLayoutDesc {
    pub buffer: u32,
    pub stride: u32,
}

/// Attributes and per-buffer strides of a mesh's vertex streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexDescriptor {
    pub attributes: Vec<VertexAttributeDesc>,
    pub layouts: Vec<VertexLayoutDesc>,
}

impl VertexDescriptor {
    pub fn attribute(&self, attribute: Attribute) -> Option<&VertexAttributeDesc> {
        self.attributes.iter().find(|a| a.attribute == attribute)
    }

    pub fn layout(&self, buffer: u32) -> Option<&VertexLayoutDesc> {
        self.layouts.iter().find(|l| l.buffer == buffer)
    }

    /// Attributes fetched from `buffer`, in attribute-slot order.
    pub fn attributes_in(&self, buffer: u32) -> Vec<VertexAttributeDesc> {
        let mut attrs: Vec<_> =
            self.attributes.iter().copied().filter(|a| a.buffer == buffer).collect();
        attrs.sort_by_key(|a| a.attribute);
        attrs
    }
}

/// Layout of model meshes.
///
/// Buffer `BufferIndex::Vertices` interleaves position, normal, UV, color,
/// joints and weights. Tangents and bitangents are generated separately and
/// live alone in vertex buffers 1 and 2.
pub fn default_vertex_descriptor() -> VertexDescriptor {
    let interleaved = BufferIndex::Vertices.index();
    let mut attributes = Vec::with_capacity(Attribute::ALL.len());
    let mut offset = 0;

    for (attribute, format) in [
        (Attribute::Position, VertexFormat::Float3),
        (Attribute::Normal, VertexFormat::Float3),
        (Attribute::UV, VertexFormat::Float2),
        (Attribute::Color, VertexFormat::Float3),
        (Attribute::Joints, VertexFormat::UShort4),
        (Attribute::Weights, VertexFormat::Float4),
    ] {
        attributes.push(VertexAttributeDesc { attribute, format, offset, buffer: interleaved });
        offset += format.stride();
    }

    attributes.push(VertexAttributeDesc {
        attribute: Attribute::Tangent,
        format: VertexFormat::Float3,
        offset: 0,
        buffer: 1,
    });
    attributes.push(VertexAttributeDesc {
        attribute: Attribute::Bitangent,
        format: VertexFormat::Float3,
        offset: 0,
        buffer: 2,
    });
    attributes.sort_by_key(|a| a.attribute);

    let side_stride = VertexFormat::Float3.stride();
    VertexDescriptor {
        attributes,
        layouts: vec![
            VertexLayoutDesc { buffer: interleaved, stride: offset },
            VertexLayoutDesc { buffer: 1, stride: side_stride },
            VertexLayoutDesc { buffer: 2, stride: side_stride },
        ],
    }
}

//! wgpu pipeline inputs derived from the shared slot tables.
//!
//! Vertex `shader_location`s come from `Attribute`, bind group bindings from
//! `BufferIndex` and `TextureSlot`.

pub mod bindings;
mod vertex;

pub use bindings::{
    frame_layout_entries, model_layout_entries, skybox_layout_entries, terrain_layout_entries,
    LayoutEntries,
};
pub use vertex::{wgpu_format, VertexBuffers};

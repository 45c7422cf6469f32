//! Host/GPU interchange schema for the Reexplore Metal shaders.
//!
//! Every record here is read verbatim by shader code, so its field order,
//! types and padding must match the Metal declaration byte for byte. Padding
//! the Metal compiler inserts implicitly is a named field on the host side,
//! which keeps every record `bytemuck::Pod`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`simd`] | `Float2`, `Float3`, `Float4`, `Float3x3`, `Float4x4` |
//! | [`uniforms`] | `Uniforms`, `FragmentUniforms`, `Instances`, `ModelParams` |
//! | [`light`] | `Light`, `LightType`, `LightSet` |
//! | [`material`] | `Material` |
//! | [`bindings`] | `Attribute`, `TextureSlot`, `BufferIndex` |
//! | [`vertex`] | mesh vertex stream layout |
//! | [`layout`] | `GpuRecord`, Metal layout computation and verification |
//! | [`msl`] | Metal header emitter |
//! | [`error`] | `SchemaError` |
//!
//! # Quick start
//!
//! ```rust
//! use reexplore_shader::{BufferIndex, GpuRecord, Light, LightType, Uniforms};
//!
//! let light = Light::default_light();
//! assert_eq!(light.light_type, LightType::SUNLIGHT);
//! assert_eq!(light.to_bytes().len(), 128);
//!
//! Uniforms::verify_layout().unwrap();
//! assert_eq!(BufferIndex::Uniforms.index(), 11);
//! ```

pub mod bindings;
pub mod error;
pub mod layout;
pub mod light;
pub mod material;
pub mod msl;
pub mod simd;
pub mod uniforms;
pub mod vertex;

pub use bindings::{Attribute, BufferIndex, TextureSlot};
pub use error::SchemaError;
pub use layout::{verify_all, GpuRecord, MslType, StructLayout};
pub use light::{Light, LightSet, LightType, MAX_LIGHTS};
pub use material::Material;
pub use simd::{Float2, Float3, Float3x3, Float4, Float4x4};
pub use uniforms::{FragmentUniforms, Instances, ModelParams, Uniforms};
pub use vertex::{default_vertex_descriptor, VertexDescriptor, VertexFormat};

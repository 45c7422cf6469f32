//! Reexplore engine crate.
//!
//! wgpu-side plumbing for the shared shader records of `reexplore-shader`:
//! vertex layouts, bind group layouts and upload buffers.

pub mod logging;
pub mod pipeline;
pub mod upload;

pub use reexplore_shader as shader;

//! Scene data: meshes, materials, GPU buffer wrappers and the depth texture.
//!
//! - `model` contains the CPU mesh (interleaved vertex floats + indices) and material
//! - `buffer` wraps vertex/index buffers and their attribute layout
//! - `texture` holds the depth texture

pub mod buffer;
pub mod model;
pub mod texture;

//! Shader programs.
//!
//! - `basic` is the lit program of the primary mesh and the shared pipeline builder
//! - `light` is the flat-coloured light indicator program
//! - `uniform` holds the host-side uniform blocks and per-draw slots

pub mod basic;
pub mod light;
pub mod uniform;

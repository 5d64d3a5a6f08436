//! stereo-view
//!
//! Renders a lit OBJ mesh twice, side by side, from two mirrored eye
//! directions, together with a small indicator mesh marking the light. The
//! indicator is moved with the keyboard and the loop runs at a fixed rate.
//!
//! High-level modules
//! - `config`: the scene constants (window, camera, light, pacing, assets)
//! - `input`: keyboard state, key to intent mapping and intent application
//! - `scene`: model matrices, eye views and projection
//! - `frame`: the fixed-rate render loop and the surface it draws through
//! - `render`: viewports and draw call descriptions
//! - `renderer`: the wgpu surface the loop draws through at runtime
//! - `context`: window, device, queue and swapchain
//! - `data_structures`: vertex/index buffers, attribute layouts, meshes
//! - `pipelines`: the mesh and light shader programs
//! - `resources`: OBJ/MTL loading
//! - `flow`: the winit application driving it all
//! - `logging`: logger setup

pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod frame;
pub mod input;
pub mod logging;
pub mod pipelines;
pub mod render;
pub mod renderer;
pub mod resources;
pub mod scene;

pub use config::SceneConfig;
pub use flow::run;

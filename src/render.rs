//! Draw-call vocabulary shared by the render loop and its surfaces.
//!
//! The render loop never talks to wgpu directly. It describes each frame as
//! a sequence of viewport changes and [`DrawCall`]s and hands them to a
//! [`FrameSurface`](crate::frame::FrameSurface), which records and executes
//! them.
//!
//! # Key types
//!
//! - [`Viewport`] is a pixel rectangle of the presentation surface
//! - [`Program`] selects which shader program and buffers a draw uses
//! - [`DrawCall`] is one indexed draw with the matrices it needs
//!

use cgmath::Matrix4;

/// A rectangular region of the surface, in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Split a surface into a left and a right half.
    ///
    /// Both halves are `width / 2` wide; with an odd width the last column is
    /// left untouched.
    pub fn split(width: u32, height: u32) -> (Self, Self) {
        let half = width / 2;
        let left = Self {
            x: 0,
            y: 0,
            width: half,
            height,
        };
        let right = Self {
            x: half,
            y: 0,
            width: half,
            height,
        };
        (left, right)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The shader program and geometry a draw call binds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Program {
    /// Lit primary mesh.
    Mesh,
    /// Flat-coloured light indicator.
    Light,
}

/// One indexed triangle-list draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub program: Program,
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// Number of indices to draw, starting at the first index.
    pub index_count: u32,
}

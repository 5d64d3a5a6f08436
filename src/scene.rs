//! Mutable scene state and the camera maths derived from [`SceneConfig`].

use cgmath::{Matrix4, Vector3};

use crate::config::{CameraConfig, LightCoupling, SceneConfig};

/// cgmath produces OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Per-frame transform state of the two drawables and the shading light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneState {
    /// Model matrix of the primary mesh, shared by both eyes.
    pub mesh_model: Matrix4<f32>,
    /// Model matrix of the light indicator.
    pub light_model: Matrix4<f32>,
    /// Position of the light used to shade the primary mesh.
    pub light_position: Vector3<f32>,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            mesh_model: Matrix4::from_angle_y(config.mesh_rotation),
            light_model: Matrix4::from_translation(config.light.position),
            light_position: config.light.position,
        }
    }

    /// Move the light indicator by `delta` in its local frame. With
    /// [`LightCoupling::Mirrored`] the shading light follows.
    pub fn translate_light(&mut self, delta: Vector3<f32>, coupling: LightCoupling) {
        self.light_model = self.light_model * Matrix4::from_translation(delta);
        if coupling == LightCoupling::Mirrored {
            self.light_position += delta;
        }
    }
}

/// View matrices of the left and right eye.
pub fn eye_views(camera: &CameraConfig) -> (Matrix4<f32>, Matrix4<f32>) {
    let left = Matrix4::look_at_rh(camera.position, camera.left_target(), camera.up);
    let right = Matrix4::look_at_rh(camera.position, camera.right_target(), camera.up);
    (left, right)
}

/// Perspective projection for a surface of `width` x `height` pixels, already
/// corrected for wgpu clip space.
///
/// The aspect ratio is the one of the whole surface, not of a single eye.
pub fn projection(camera: &CameraConfig, width: u32, height: u32) -> Matrix4<f32> {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    OPENGL_TO_WGPU_MATRIX * cgmath::perspective(camera.fovy, aspect, camera.znear, camera.zfar)
}

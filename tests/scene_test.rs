use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3, Vector4};
use stereo_view::{
    SceneConfig,
    config::{CameraConfig, LightCoupling},
    render::Viewport,
    scene::{self, OPENGL_TO_WGPU_MATRIX, SceneState},
};

use crate::common::approx;
mod common;

#[test]
fn split_halves_the_surface() {
    let (left, right) = Viewport::split(800, 600);
    assert_eq!(left, Viewport { x: 0, y: 0, width: 400, height: 600 });
    assert_eq!(right, Viewport { x: 400, y: 0, width: 400, height: 600 });
}

#[test]
fn split_of_an_odd_width_drops_the_last_column() {
    let (left, right) = Viewport::split(801, 600);
    assert_eq!(left.width, 400);
    assert_eq!(right.x, 400);
    assert_eq!(right.width, 400);
    assert!(!left.is_empty());
}

#[test]
fn split_of_a_single_column_is_empty() {
    let (left, right) = Viewport::split(1, 600);
    assert!(left.is_empty());
    assert!(right.is_empty());
}

#[test]
fn eye_targets_mirror_across_x() {
    let camera = CameraConfig::default();
    assert_eq!(camera.left_target(), Point3::new(-1.0, 0.0, 0.0));
    assert_eq!(camera.right_target(), Point3::new(1.0, 0.0, 0.0));
}

#[test]
fn eye_views_look_from_the_camera() {
    let camera = CameraConfig::default();
    let (left, right) = scene::eye_views(&camera);

    // The camera sits at the view-space origin of both eyes.
    let eye = camera.position;
    let origin = Vector4::new(eye.x, eye.y, eye.z, 1.0);
    for view in [left, right] {
        let p = view * origin;
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, 0.0));
    }

    // Each eye's target lies straight ahead on its own view axis.
    let target = camera.left_target();
    let p = left * Vector4::new(target.x, target.y, target.z, 1.0);
    assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && p.z < 0.0);
}

#[test]
fn projection_uses_the_whole_surface_aspect() {
    let camera = CameraConfig::default();
    let projection = scene::projection(&camera, 800, 600);
    let expected = OPENGL_TO_WGPU_MATRIX
        * cgmath::perspective(Deg(45.0), 800.0 / 600.0, 0.1, 100.0);
    assert_eq!(projection, expected);
}

#[test]
fn projection_maps_depth_into_wgpu_range() {
    let camera = CameraConfig::default();
    let projection = scene::projection(&camera, 800, 600);

    let near = projection * Vector4::new(0.0, 0.0, -camera.znear, 1.0);
    let far = projection * Vector4::new(0.0, 0.0, -camera.zfar, 1.0);
    assert!(approx(near.z / near.w, 0.0));
    assert!(approx(far.z / far.w, 1.0));
}

#[test]
fn projection_survives_a_zero_height() {
    let camera = CameraConfig::default();
    let projection = scene::projection(&camera, 800, 0);
    assert!(projection.x.x.is_finite());
}

#[test]
fn initial_state_follows_the_config() {
    let config = SceneConfig::default();
    let state = SceneState::new(&config);

    assert_eq!(state.mesh_model, Matrix4::from_angle_y(Deg(1.0)));
    assert_eq!(
        state.light_model,
        Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0))
    );
    assert_eq!(state.light_position, Vector3::new(10.0, 0.0, 0.0));
}

#[test]
fn translations_accumulate() {
    let config = SceneConfig::default();
    let mut state = SceneState::new(&config);

    state.translate_light(Vector3::new(1.0, 0.0, 0.0), LightCoupling::Mirrored);
    state.translate_light(Vector3::new(0.0, 2.0, 0.0), LightCoupling::Mirrored);

    assert_eq!(
        state.light_model,
        Matrix4::from_translation(Vector3::new(11.0, 2.0, 0.0))
    );
    assert_eq!(state.light_position, Vector3::new(11.0, 2.0, 0.0));
    assert_ne!(state.light_model, Matrix4::identity());
}

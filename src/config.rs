//! Scene configuration.
//!
//! Everything the demo used to keep as process-wide constants (window, camera,
//! light, projection, pacing, movement and asset names) lives in a single
//! [`SceneConfig`] that is handed to the render loop by reference.

use std::path::PathBuf;

use cgmath::{Deg, Point3, Vector3};

/// Whether moving the light indicator also moves the light used for shading.
///
/// The indicator and the shading light were always moved together. Keep
/// `Mirrored` unless the shading light should stay put.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LightCoupling {
    #[default]
    Mirrored,
    IndicatorOnly,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "PROJECT1".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Fixed stereo camera: one eye position and a look target that is mirrored
/// across the YZ plane for the left eye.
#[derive(Debug, Copy, Clone)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    /// Target of the right eye. The left eye looks at the same point with `x` negated.
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraConfig {
    pub fn left_target(&self) -> Point3<f32> {
        Point3::new(-self.target.x, self.target.y, self.target.z)
    }

    pub fn right_target(&self) -> Point3<f32> {
        self.target
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 10.0, 50.0),
            target: Point3::new(1.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct LightConfig {
    pub color: [f32; 3],
    pub position: Vector3<f32>,
    pub coupling: LightCoupling,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            position: Vector3::new(10.0, 0.0, 0.0),
            coupling: LightCoupling::Mirrored,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct MovementConfig {
    /// World units travelled per second while a movement key is held.
    ///
    /// 30 units/s at the 30 FPS target is one unit per frame.
    pub units_per_second: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            units_per_second: 30.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub movement: MovementConfig,
    pub target_fps: f64,
    /// Rotation of the primary mesh about +Y.
    pub mesh_rotation: Deg<f32>,
    pub clear_colour: wgpu::Color,
    /// Directory all model paths are resolved against.
    pub asset_root: PathBuf,
    pub primary_model: String,
    pub light_model: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            movement: MovementConfig::default(),
            target_fps: 30.0,
            mesh_rotation: Deg(1.0),
            clear_colour: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            },
            asset_root: PathBuf::from("assets"),
            primary_model: "models/gem.obj".to_string(),
            light_model: "models/cube.obj".to_string(),
        }
    }
}

//! The fixed-rate render loop.
//!
//! [`RenderLoop::frame`] runs one iteration against any [`FrameSurface`]:
//!
//! 1. map held keys to intents and apply them to the scene
//! 2. clear colour and depth
//! 3. left viewport, left eye, draw the primary mesh
//! 4. right viewport, mirrored eye, same model matrix, draw the primary mesh
//! 5. draw the light indicator
//! 6. present
//! 7. wait out the rest of the frame budget, unless the frame overran
//! 8. process pending events
//!
//! The winit application in [`crate::flow`] drives it with a wgpu surface;
//! tests drive it with a recording fake.

use cgmath::Vector3;
use instant::{Duration, Instant};

use crate::{
    config::SceneConfig,
    data_structures::model::Mesh,
    input::{KeyboardState, apply_intents, map_keys},
    render::{DrawCall, Program, Viewport},
    scene::{self, SceneState},
};

/// Everything the render loop needs from a window and its GPU surface.
pub trait FrameSurface {
    /// Monotonic clock used to measure frame time.
    fn now(&self) -> Instant;

    /// Drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    fn close_requested(&self) -> bool;

    fn request_close(&mut self);

    fn keyboard(&self) -> &KeyboardState;

    /// Position of the light used to shade the primary mesh this frame.
    fn set_light_position(&mut self, position: Vector3<f32>);

    fn clear(&mut self, colour: wgpu::Color);

    /// Make `viewport` the target region of all following draws.
    fn set_viewport(&mut self, viewport: Viewport);

    fn draw(&mut self, draw: &DrawCall);

    /// Present everything recorded since the last present.
    fn present(&mut self) -> anyhow::Result<()>;

    /// Block until `timeout` elapsed or an event arrives, whichever is first.
    fn wait_events_timeout(&mut self, timeout: Duration);

    fn poll_events(&mut self);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Closing,
}

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    pub frame_index: u64,
}

/// Produces clamped frame deltas.
///
/// The first tick reports the nominal frame time since there is no previous
/// frame to measure against.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    nominal: Duration,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new(nominal: Duration) -> Self {
        Self::with_clamps(nominal, Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(nominal: Duration, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            nominal,
            dt_min,
            dt_max,
        }
    }

    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.nominal,
        };
        let dt = dt.clamp(self.dt_min, self.dt_max);
        self.last = Some(now);

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

/// Keeps the loop at a fixed frame rate.
#[derive(Debug, Copy, Clone)]
pub struct FramePacer {
    budget: Duration,
    slack: Duration,
}

impl FramePacer {
    /// Wake-up slack taken off every wait so the next frame starts on time.
    pub const DEFAULT_SLACK: Duration = Duration::from_millis(1);

    pub fn new(target_fps: f64) -> Self {
        Self::with_slack(target_fps, Self::DEFAULT_SLACK)
    }

    pub fn with_slack(target_fps: f64, slack: Duration) -> Self {
        let fps = if target_fps.is_finite() && target_fps > 0.0 {
            target_fps
        } else {
            log::warn!("Invalid target fps {target_fps}, falling back to 30");
            30.0
        };
        Self {
            budget: Duration::from_secs_f64(1.0 / fps),
            slack,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left to wait after a frame that took `elapsed`.
    ///
    /// `None` when the frame used up its budget (never a negative sleep).
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.budget {
            return None;
        }
        (self.budget - elapsed)
            .checked_sub(self.slack)
            .filter(|wait| !wait.is_zero())
    }
}

/// Index counts of the two meshes the loop draws.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndexCounts {
    pub mesh: u32,
    pub light: u32,
}

impl IndexCounts {
    pub fn of(mesh: &Mesh, light: &Mesh) -> Self {
        Self {
            mesh: mesh.index_count(),
            light: light.index_count(),
        }
    }
}

#[derive(Debug)]
pub struct RenderLoop {
    state: SceneState,
    clock: FrameClock,
    pacer: FramePacer,
    counts: IndexCounts,
    status: LoopStatus,
}

impl RenderLoop {
    pub fn new(config: &SceneConfig, counts: IndexCounts) -> Self {
        let pacer = FramePacer::new(config.target_fps);
        Self {
            state: SceneState::new(config),
            clock: FrameClock::new(pacer.budget()),
            pacer,
            counts,
            status: LoopStatus::Running,
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Run one iteration. Returns [`LoopStatus::Closing`] without rendering
    /// once the surface reports a close request.
    pub fn frame<S: FrameSurface>(
        &mut self,
        config: &SceneConfig,
        surface: &mut S,
    ) -> anyhow::Result<LoopStatus> {
        if self.status == LoopStatus::Closing || surface.close_requested() {
            self.status = LoopStatus::Closing;
            return Ok(self.status);
        }

        let start = surface.now();
        let time = self.clock.tick(start);

        let intents = map_keys(surface.keyboard());
        let step = config.movement.units_per_second * time.dt;
        if apply_intents(&intents, &mut self.state, step, config.light.coupling) {
            log::info!("Close requested from keyboard");
            surface.request_close();
        }
        surface.set_light_position(self.state.light_position);

        let (width, height) = surface.size();
        if width > 0 && height > 0 {
            self.draw(config, surface, width, height);
            surface.present()?;
        } else {
            log::debug!("Skipping frame {} on a zero-sized surface", time.frame_index);
        }

        let elapsed = surface.now().saturating_duration_since(start);
        match self.pacer.remaining(elapsed) {
            Some(wait) => surface.wait_events_timeout(wait),
            None => log::trace!(
                "Frame {} overran its budget ({:?} > {:?})",
                time.frame_index,
                elapsed,
                self.pacer.budget()
            ),
        }

        surface.poll_events();
        Ok(self.status)
    }

    fn draw<S: FrameSurface>(&self, config: &SceneConfig, surface: &mut S, width: u32, height: u32) {
        surface.clear(config.clear_colour);

        let (left, right) = Viewport::split(width, height);
        let (left_view, right_view) = scene::eye_views(&config.camera);
        let projection = scene::projection(&config.camera, width, height);

        surface.set_viewport(left);
        surface.draw(&DrawCall {
            program: Program::Mesh,
            model: self.state.mesh_model,
            view: left_view,
            projection,
            index_count: self.counts.mesh,
        });

        surface.set_viewport(right);
        surface.draw(&DrawCall {
            program: Program::Mesh,
            model: self.state.mesh_model,
            view: right_view,
            projection,
            index_count: self.counts.mesh,
        });

        // The indicator shares the right eye's viewport and view.
        surface.draw(&DrawCall {
            program: Program::Light,
            model: self.state.light_model,
            view: right_view,
            projection,
            index_count: self.counts.light,
        });
    }

    /// Drive frames until the surface asks to close. Returns the number of
    /// frames rendered.
    pub fn run<S: FrameSurface>(
        &mut self,
        config: &SceneConfig,
        surface: &mut S,
    ) -> anyhow::Result<u64> {
        let mut frames = 0;
        while self.frame(config, surface)? == LoopStatus::Running {
            frames += 1;
        }
        Ok(frames)
    }
}

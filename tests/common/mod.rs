#![allow(dead_code)]

use std::cell::Cell;

use cgmath::Vector3;
use instant::{Duration, Instant};
use stereo_view::{
    frame::FrameSurface,
    input::KeyboardState,
    render::{DrawCall, Viewport},
};

pub const EPSILON: f32 = 1e-4;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LightPosition(Vector3<f32>),
    Clear(wgpu::Color),
    SetViewport(Viewport),
    Draw(DrawCall),
    Present,
    Wait(Duration),
    Poll,
}

/// Records every surface call and runs on a fake clock.
///
/// The clock only moves when the loop presents (by `frame_cost`) or waits
/// (by the requested timeout), so frame timing is fully deterministic.
pub struct FakeSurface {
    pub calls: Vec<Call>,
    pub keyboard: KeyboardState,
    pub size: (u32, u32),
    pub close: bool,
    pub frame_cost: Duration,
    /// Raise the close flag once this many frames were presented.
    pub close_after_presents: Option<usize>,
    clock: Cell<Instant>,
    presents: usize,
}

impl FakeSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            keyboard: KeyboardState::new(),
            size: (width, height),
            close: false,
            frame_cost: Duration::from_millis(5),
            close_after_presents: None,
            clock: Cell::new(Instant::now()),
            presents: 0,
        }
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(draw) => Some(*draw),
                _ => None,
            })
            .collect()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Wait(wait) => Some(*wait),
                _ => None,
            })
            .collect()
    }

    /// Each draw paired with the viewport active when it was issued.
    pub fn draws_with_viewport(&self) -> Vec<(Option<Viewport>, DrawCall)> {
        let mut viewport = None;
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                Call::SetViewport(v) => viewport = Some(*v),
                Call::Draw(draw) => out.push((viewport, *draw)),
                _ => (),
            }
        }
        out
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    fn advance(&self, by: Duration) {
        self.clock.set(self.clock.get() + by);
    }
}

impl FrameSurface for FakeSurface {
    fn now(&self) -> Instant {
        self.clock.get()
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn close_requested(&self) -> bool {
        self.close
    }

    fn request_close(&mut self) {
        self.close = true;
    }

    fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    fn set_light_position(&mut self, position: Vector3<f32>) {
        self.calls.push(Call::LightPosition(position));
    }

    fn clear(&mut self, colour: wgpu::Color) {
        self.calls.push(Call::Clear(colour));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(Call::SetViewport(viewport));
    }

    fn draw(&mut self, draw: &DrawCall) {
        self.calls.push(Call::Draw(*draw));
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::Present);
        self.advance(self.frame_cost);
        self.presents += 1;
        if self.close_after_presents == Some(self.presents) {
            self.close = true;
        }
        Ok(())
    }

    fn wait_events_timeout(&mut self, timeout: Duration) {
        self.calls.push(Call::Wait(timeout));
        self.advance(timeout);
    }

    fn poll_events(&mut self) {
        self.calls.push(Call::Poll);
    }
}

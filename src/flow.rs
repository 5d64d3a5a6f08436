//! Application event loop.
//!
//! [`run`] opens the window, loads both models and hands every redraw to
//! [`RenderLoop::frame`]. Frame pacing maps onto winit's control flow: the
//! wait a frame asks for becomes [`ControlFlow::WaitUntil`], which returns
//! early on any incoming event, and an overrun frame switches to
//! [`ControlFlow::Poll`] so the next frame starts straight away.
//!
//! # Lifecycle
//!
//! 1. `resumed`: create the window, the GPU context and upload both meshes
//! 2. `new_events`: a timeout or a woken wait requests the next redraw
//! 3. `window_event`: keyboard, close and resize events update the surface;
//!    `RedrawRequested` runs one frame
//! 4. `about_to_wait`: schedule the wake-up for the next frame
//! 5. `exiting`: GPU resources are dropped with the surface

use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::SceneConfig,
    context::Context,
    frame::{IndexCounts, LoopStatus, RenderLoop},
    renderer::GpuSurface,
    resources::load_model_obj,
};

struct AppState {
    surface: GpuSurface,
    render_loop: RenderLoop,
}

pub struct App {
    config: SceneConfig,
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            config,
            async_runtime,
            state: None,
            error: None,
        })
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let config = &self.config;
        let window_attributes = Window::default_attributes()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let init_future = async move {
            let ctx = Context::new(window).await?;
            let models = futures::future::try_join(
                load_model_obj(&config.asset_root, &config.primary_model),
                load_model_obj(&config.asset_root, &config.light_model),
            )
            .await?;
            anyhow::Ok((ctx, models))
        };
        let (ctx, (primary, indicator)) = self.async_runtime.block_on(init_future)?;

        let counts = IndexCounts::of(&primary.mesh, &indicator.mesh);
        let surface = GpuSurface::new(ctx, config, &primary, &indicator)?;
        Ok(AppState {
            surface,
            render_loop: RenderLoop::new(config, counts),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                log::info!("Rendering...");
                state.surface.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e.context("initialization failed")),
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        let Some(state) = &self.state else {
            return;
        };
        // Either the frame wait ran out or an event ended it early.
        if let StartCause::ResumeTimeReached { .. }
        | StartCause::WaitCancelled { .. }
        | StartCause::Poll = cause
        {
            state.surface.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        state.surface.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => state.surface.request_redraw(),
            WindowEvent::RedrawRequested => {
                match state.render_loop.frame(&self.config, &mut state.surface) {
                    Ok(LoopStatus::Running) => (),
                    Ok(LoopStatus::Closing) => event_loop.exit(),
                    Err(e) => self.fail(event_loop, e.context("unable to render")),
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };
        match state.surface.take_wait_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Poll),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Terminating...");
        self.state = None;
    }
}

/// Open the window and render `config`'s scene until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    log::info!("Initialization...");
    let event_loop = EventLoop::new().context("failed to create the event loop")?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

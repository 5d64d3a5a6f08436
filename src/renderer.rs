//! The wgpu implementation of [`FrameSurface`].
//!
//! Viewport changes and draw calls are recorded as the render loop issues
//! them and turned into a single render pass on [`FrameSurface::present`].

use std::iter;

use anyhow::{Result, ensure};
use cgmath::Vector3;
use instant::{Duration, Instant};
use winit::event::WindowEvent;

use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::{
        buffer::{AttributeLayout, IndexBuffer, VertexArray, VertexBuffer},
        model::{Mesh, Model, ModelVertex},
    },
    frame::FrameSurface,
    input::KeyboardState,
    pipelines::{
        basic::MeshProgram,
        light::LightProgram,
        uniform::{DrawSlots, DrawUniform, LightingUniform},
    },
    render::{DrawCall, Program, Viewport},
};

/// Vertex array and index buffer of one uploaded mesh.
#[derive(Debug)]
pub struct MeshBuffers {
    pub vertex_array: VertexArray,
    pub index_buffer: IndexBuffer,
}

impl MeshBuffers {
    pub fn new(device: &wgpu::Device, mesh: &Mesh, layouts: &[AttributeLayout]) -> Result<Self> {
        let vertex_buffer = VertexBuffer::new(device, &mesh.name, mesh.vertex_data())?;
        let mut vertex_array = VertexArray::new(vertex_buffer);
        for layout in layouts {
            vertex_array.add_buffer(*layout)?;
        }
        let index_buffer = IndexBuffer::new(device, &mesh.name, mesh.index_data())?;
        Ok(Self {
            vertex_array,
            index_buffer,
        })
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.vertex_array.bind(pass);
        self.index_buffer.bind(pass);
    }
}

#[derive(Debug)]
pub struct GpuSurface {
    ctx: Context,
    keyboard: KeyboardState,
    close_requested: bool,
    wait_deadline: Option<Instant>,
    draw_slots: DrawSlots,
    mesh_program: MeshProgram,
    light_program: LightProgram,
    mesh: MeshBuffers,
    light: MeshBuffers,
    clear_colour: wgpu::Color,
    viewport: Viewport,
    recorded: Vec<(Viewport, DrawCall)>,
}

impl GpuSurface {
    pub fn new(ctx: Context, config: &SceneConfig, primary: &Model, indicator: &Model) -> Result<Self> {
        let mesh = MeshBuffers::new(&ctx.device, &primary.mesh, &ModelVertex::LAYOUT)?;
        let light = MeshBuffers::new(&ctx.device, &indicator.mesh, &ModelVertex::POSITION_LAYOUT)?;

        let draw_slots = DrawSlots::new(&ctx.device, DrawSlots::DEFAULT_CAPACITY);
        let camera = config.camera.position;
        let mesh_program = MeshProgram::new(
            &ctx.device,
            &ctx.config,
            &draw_slots.bind_group_layout,
            mesh.vertex_array.layout(),
            &primary.material,
            LightingUniform::new(
                config.light.position,
                config.light.color,
                [camera.x, camera.y, camera.z],
            ),
        );
        let light_program = LightProgram::new(
            &ctx.device,
            &ctx.config,
            &draw_slots.bind_group_layout,
            light.vertex_array.layout(),
            config.light.color,
        );

        let viewport = Viewport::full(ctx.config.width, ctx.config.height);
        Ok(Self {
            ctx,
            keyboard: KeyboardState::new(),
            close_requested: false,
            wait_deadline: None,
            draw_slots,
            mesh_program,
            light_program,
            mesh,
            light,
            clear_colour: config.clear_colour,
            viewport,
            recorded: Vec::new(),
        })
    }

    pub fn request_redraw(&self) {
        self.ctx.window.request_redraw();
    }

    /// Feed a window event into the keyboard state, close flag and surface size.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        self.keyboard.handle_window_event(event);
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::Resized(size) => self.ctx.resize(size.width, size.height),
            _ => (),
        }
    }

    /// Deadline set by the last frame's wait, if it asked for one.
    pub fn take_wait_deadline(&mut self) -> Option<Instant> {
        self.wait_deadline.take()
    }

    fn buffers(&self, program: Program) -> (&wgpu::RenderPipeline, &wgpu::BindGroup, &MeshBuffers) {
        match program {
            Program::Mesh => (
                &self.mesh_program.render_pipeline,
                &self.mesh_program.bind_group,
                &self.mesh,
            ),
            Program::Light => (
                &self.light_program.render_pipeline,
                &self.light_program.bind_group,
                &self.light,
            ),
        }
    }

    fn encode(&self, view: &wgpu::TextureView, draws: &[(Viewport, DrawCall)]) -> Result<wgpu::CommandBuffer> {
        let mut offsets = Vec::with_capacity(draws.len());
        for (slot, (_, draw)) in draws.iter().enumerate() {
            let (_, _, buffers) = self.buffers(draw.program);
            ensure!(
                draw.index_count <= buffers.index_buffer.index_count(),
                "draw of {} indices exceeds the {} uploaded for {:?}",
                draw.index_count,
                buffers.index_buffer.index_count(),
                draw.program
            );
            let uniform = DrawUniform::new(draw.model, draw.view, draw.projection);
            offsets.push(self.draw_slots.write(&self.ctx.queue, slot as u32, &uniform)?);
        }

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for ((viewport, draw), offset) in draws.iter().zip(offsets) {
                if viewport.is_empty() {
                    continue;
                }
                let (pipeline, bind_group, buffers) = self.buffers(draw.program);
                render_pass.set_viewport(
                    viewport.x as f32,
                    viewport.y as f32,
                    viewport.width as f32,
                    viewport.height as f32,
                    0.0,
                    1.0,
                );
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.draw_slots.bind_group, &[offset]);
                render_pass.set_bind_group(1, bind_group, &[]);
                buffers.bind(&mut render_pass);
                render_pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }
        Ok(encoder.finish())
    }
}

impl FrameSurface for GpuSurface {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn size(&self) -> (u32, u32) {
        // Viewports must stay inside the configured surface, which may lag
        // behind the window until the resize event arrives.
        match self.ctx.size() {
            (0, _) | (_, 0) => (0, 0),
            _ => (self.ctx.config.width, self.ctx.config.height),
        }
    }

    fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    fn set_light_position(&mut self, position: Vector3<f32>) {
        self.mesh_program
            .set_light_position(&self.ctx.queue, position);
    }

    fn clear(&mut self, colour: wgpu::Color) {
        self.clear_colour = colour;
        self.recorded.clear();
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn draw(&mut self, draw: &DrawCall) {
        self.recorded.push((self.viewport, *draw));
    }

    fn present(&mut self) -> Result<()> {
        let draws = std::mem::take(&mut self.recorded);
        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.ctx.reconfigure();
                return Ok(());
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let commands = self.encode(&view, &draws)?;
        self.ctx.queue.submit(iter::once(commands));
        self.ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn wait_events_timeout(&mut self, timeout: Duration) {
        // winit does the actual waiting once control returns to the event loop.
        self.wait_deadline = Some(Instant::now() + timeout);
    }

    fn poll_events(&mut self) {
        // Pending events are delivered by winit between frames.
    }
}

use crate::{
    data_structures::{buffer::VertexLayout, texture},
    pipelines::uniform::{ColorUniform, mk_buffer, uniform_entry},
};

/// Flat-coloured program for the light indicator.
#[derive(Debug)]
pub struct LightProgram {
    pub render_pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    #[allow(unused)]
    color_buffer: wgpu::Buffer,
}

impl LightProgram {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        draw_bind_group_layout: &wgpu::BindGroupLayout,
        vertex_layout: &VertexLayout,
        color: [f32; 3],
    ) -> Self {
        let bind_group_layout = mk_bind_group_layout(device);
        let color_buffer = mk_buffer(device, "Light Color Buffer", ColorUniform::new(color));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_buffer.as_entire_binding(),
            }],
            label: Some("light_bind_group"),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Light Pipeline Layout"),
            bind_group_layouts: &[draw_bind_group_layout, &bind_group_layout],
            immediate_size: 0,
        });
        let shader = wgpu::ShaderModuleDescriptor {
            label: Some("Light Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("light.wgsl").into()),
        };
        let render_pipeline = crate::pipelines::basic::mk_render_pipeline(
            device,
            &layout,
            config.format,
            Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            Some(texture::Texture::DEPTH_FORMAT),
            &[vertex_layout.buffer_layout()],
            shader,
        );

        Self {
            render_pipeline,
            bind_group,
            color_buffer,
        }
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        label: Some("light_bind_group_layout"),
    })
}

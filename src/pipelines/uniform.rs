//! Host-side uniform blocks.
//!
//! Field names follow the uniform names the shaders use. Every draw call gets
//! its own slot in one dynamic-offset buffer, because both eyes draw the same
//! mesh with different matrices inside a single render pass.

use std::num::NonZeroU64;

use anyhow::ensure;
use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::model::Material;

/// Per-draw matrices.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl DrawUniform {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model: model.into(),
            view: view.into(),
            projection: projection.into(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub light_position: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub light_color: [f32; 3],
    _padding2: u32,
    pub view_pos: [f32; 3],
    _padding3: u32,
}

impl LightingUniform {
    pub fn new(light_position: Vector3<f32>, light_color: [f32; 3], view_pos: [f32; 3]) -> Self {
        Self {
            light_position: light_position.into(),
            _padding: 0,
            light_color,
            _padding2: 0,
            view_pos,
            _padding3: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 3],
    _padding: u32,
    pub diffuse: [f32; 3],
    _padding2: u32,
    pub specular: [f32; 3],
    // packs into the vec3's trailing slot
    pub shininess: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(m: &Material) -> Self {
        Self {
            ambient: m.ambient,
            _padding: 0,
            diffuse: m.diffuse,
            _padding2: 0,
            specular: m.specular,
            shininess: m.shininess,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorUniform {
    pub color: [f32; 3],
    _padding: u32,
}

impl ColorUniform {
    pub fn new(color: [f32; 3]) -> Self {
        Self { color, _padding: 0 }
    }
}

pub fn mk_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, uniform: T) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Round `size` up to the next multiple of `alignment`.
pub fn align_to(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// A ring of [`DrawUniform`] slots addressed with dynamic offsets.
#[derive(Debug)]
pub struct DrawSlots {
    buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: u32,
}

impl DrawSlots {
    /// Three draws per frame fit with room to spare.
    pub const DEFAULT_CAPACITY: u32 = 8;

    pub fn new(device: &wgpu::Device, capacity: u32) -> Self {
        let size = std::mem::size_of::<DrawUniform>() as u64;
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_to(size, alignment);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniform Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(size),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(size),
                }),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            stride,
            capacity,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Upload `uniform` into `slot` and return the dynamic offset to bind it with.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        slot: u32,
        uniform: &DrawUniform,
    ) -> anyhow::Result<u32> {
        ensure!(
            slot < self.capacity,
            "draw {} exceeds the {} uniform slots available per frame",
            slot,
            self.capacity
        );
        let offset = slot as u64 * self.stride;
        queue.write_buffer(&self.buffer, offset, bytemuck::cast_slice(&[*uniform]));
        Ok(offset as u32)
    }
}

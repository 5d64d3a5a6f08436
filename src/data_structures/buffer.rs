//! Thin wrappers binding raw vertex/index data to GPU buffers.
//!
//! Buffers are uploaded once at construction and never resized. Binding
//! attaches them to a render pass; the binding ends with the pass.

use anyhow::{Result, bail, ensure};
use wgpu::util::DeviceExt;

const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// Describes where one shader input lives in an interleaved float buffer.
/// `stride` and `offset` are counted in floats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeLayout {
    pub slot: u32,
    pub components: u32,
    pub stride: u32,
    pub offset: u32,
}

impl AttributeLayout {
    pub fn format(&self) -> Result<wgpu::VertexFormat> {
        Ok(match self.components {
            1 => wgpu::VertexFormat::Float32,
            2 => wgpu::VertexFormat::Float32x2,
            3 => wgpu::VertexFormat::Float32x3,
            4 => wgpu::VertexFormat::Float32x4,
            n => bail!("attribute at slot {} has {} components, expected 1 to 4", self.slot, n),
        })
    }

    pub fn to_attribute(&self) -> Result<wgpu::VertexAttribute> {
        let format = self.format()?;
        ensure!(
            self.offset + self.components <= self.stride,
            "attribute at slot {} (offset {}, {} components) does not fit in a stride of {}",
            self.slot,
            self.offset,
            self.components,
            self.stride
        );
        Ok(wgpu::VertexAttribute {
            format,
            offset: (self.offset * FLOAT_SIZE) as wgpu::BufferAddress,
            shader_location: self.slot,
        })
    }
}

/// Collected attribute layouts of one interleaved buffer.
#[derive(Debug, Clone, Default)]
pub struct VertexLayout {
    stride: Option<u32>,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(layouts: &[AttributeLayout]) -> Result<Self> {
        let mut layout = Self::new();
        for attribute in layouts {
            layout.add(*attribute)?;
        }
        Ok(layout)
    }

    pub fn add(&mut self, layout: AttributeLayout) -> Result<()> {
        let attribute = layout.to_attribute()?;
        match self.stride {
            Some(stride) => ensure!(
                stride == layout.stride,
                "attribute at slot {} has stride {}, buffer uses {}",
                layout.slot,
                layout.stride,
                stride
            ),
            None => self.stride = Some(layout.stride),
        }
        ensure!(
            self.attributes
                .iter()
                .all(|a| a.shader_location != layout.slot),
            "slot {} is already in use",
            layout.slot
        );
        self.attributes.push(attribute);
        Ok(())
    }

    /// Stride in floats, once an attribute has been added.
    pub fn stride(&self) -> Option<u32> {
        self.stride
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: (self.stride.unwrap_or(0) * FLOAT_SIZE) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

#[derive(Debug)]
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    floats: usize,
}

impl VertexBuffer {
    pub fn new(device: &wgpu::Device, label: &str, data: &[f32]) -> Result<Self> {
        ensure!(!data.is_empty(), "{label}: vertex data is empty");
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Ok(Self {
            buffer,
            floats: data.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.floats
    }

    pub fn is_empty(&self) -> bool {
        self.floats == 0
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>, slot: u32) {
        pass.set_vertex_buffer(slot, self.buffer.slice(..));
    }
}

#[derive(Debug)]
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl IndexBuffer {
    pub fn new(device: &wgpu::Device, label: &str, data: &[u32]) -> Result<Self> {
        ensure!(!data.is_empty(), "{label}: index data is empty");
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::INDEX,
        });
        Ok(Self {
            buffer,
            count: data.len() as u32,
        })
    }

    pub fn index_count(&self) -> u32 {
        self.count
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_index_buffer(self.buffer.slice(..), wgpu::IndexFormat::Uint32);
    }
}

/// A vertex buffer together with the layout its shader reads it with.
#[derive(Debug)]
pub struct VertexArray {
    vertex_buffer: VertexBuffer,
    layout: VertexLayout,
}

impl VertexArray {
    pub fn new(vertex_buffer: VertexBuffer) -> Self {
        Self {
            vertex_buffer,
            layout: VertexLayout::new(),
        }
    }

    pub fn add_buffer(&mut self, layout: AttributeLayout) -> Result<&mut Self> {
        self.layout.add(layout)?;
        if let Some(stride) = self.layout.stride() {
            ensure!(
                self.vertex_buffer.len() % stride as usize == 0,
                "vertex buffer of {} floats is not a whole number of {}-float vertices",
                self.vertex_buffer.len(),
                stride
            );
        }
        Ok(self)
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.vertex_buffer.bind(pass, 0);
    }
}

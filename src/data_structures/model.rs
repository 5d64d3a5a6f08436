//! CPU-side mesh and material data.
//!
//! A [`Mesh`] is what the OBJ loader produces and what the GPU buffer
//! wrappers upload: interleaved vertex floats plus triangle indices.

use crate::data_structures::buffer::AttributeLayout;

/// One vertex as laid out in a [`Mesh`]: position, texture coordinates, normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl ModelVertex {
    pub const FLOATS: u32 = 8;

    /// Attribute layouts of the interleaved format, in floats.
    pub const LAYOUT: [AttributeLayout; 3] = [
        AttributeLayout {
            slot: 0,
            components: 3,
            stride: Self::FLOATS,
            offset: 0,
        },
        AttributeLayout {
            slot: 1,
            components: 2,
            stride: Self::FLOATS,
            offset: 3,
        },
        AttributeLayout {
            slot: 2,
            components: 3,
            stride: Self::FLOATS,
            offset: 5,
        },
    ];

    /// Only the position, for programs that ignore the rest of the vertex.
    pub const POSITION_LAYOUT: [AttributeLayout; 1] = [Self::LAYOUT[0]];
}

/// Triangle mesh with interleaved [`ModelVertex`] floats. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, vertices: Vec<ModelVertex>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            vertices: bytemuck::cast_slice(&vertices).to_vec(),
            indices,
        }
    }

    pub fn vertex_data(&self) -> &[f32] {
        &self.vertices
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / ModelVertex::FLOATS as usize
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex(&self, index: usize) -> Option<ModelVertex> {
        let floats = ModelVertex::FLOATS as usize;
        let chunk = self.vertices.get(index * floats..(index + 1) * floats)?;
        Some(bytemuck::pod_read_unaligned(bytemuck::cast_slice(chunk)))
    }

    /// Append `other`, re-basing its indices past this mesh's vertices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Phong material parameters from an MTL file.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub dissolve: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.8, 0.8, 0.8],
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
            dissolve: 1.0,
        }
    }
}

impl From<&tobj::Material> for Material {
    fn from(m: &tobj::Material) -> Self {
        let fallback = Material::default();
        Self {
            name: m.name.clone(),
            ambient: m.ambient.unwrap_or(fallback.ambient),
            diffuse: m.diffuse.unwrap_or(fallback.diffuse),
            specular: m.specular.unwrap_or(fallback.specular),
            shininess: m.shininess.unwrap_or(fallback.shininess),
            dissolve: m.dissolve.unwrap_or(fallback.dissolve),
        }
    }
}

/// A loaded model: one mesh and the material it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub mesh: Mesh,
    pub material: Material,
}

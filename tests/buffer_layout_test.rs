use stereo_view::{
    data_structures::{
        buffer::{AttributeLayout, VertexLayout},
        model::{Material, Mesh, ModelVertex},
    },
    pipelines::uniform::{
        ColorUniform, DrawUniform, LightingUniform, MaterialUniform, align_to,
    },
};

fn attribute(slot: u32, components: u32, stride: u32, offset: u32) -> AttributeLayout {
    AttributeLayout {
        slot,
        components,
        stride,
        offset,
    }
}

#[test]
fn interleaved_model_vertex_layout() {
    let layout = VertexLayout::from_attributes(&ModelVertex::LAYOUT).unwrap();

    assert_eq!(layout.stride(), Some(8));
    let offsets: Vec<_> = layout.attributes().iter().map(|a| a.offset).collect();
    assert_eq!(offsets, vec![0, 12, 20]);
    let formats: Vec<_> = layout.attributes().iter().map(|a| a.format).collect();
    assert_eq!(
        formats,
        vec![
            wgpu::VertexFormat::Float32x3,
            wgpu::VertexFormat::Float32x2,
            wgpu::VertexFormat::Float32x3,
        ]
    );
    assert_eq!(layout.buffer_layout().array_stride, 32);
}

#[test]
fn position_only_layout_keeps_the_full_stride() {
    let layout = VertexLayout::from_attributes(&ModelVertex::POSITION_LAYOUT).unwrap();
    assert_eq!(layout.attributes().len(), 1);
    assert_eq!(layout.buffer_layout().array_stride, 32);
}

#[test]
fn rejects_unsupported_component_counts() {
    assert!(attribute(0, 0, 8, 0).to_attribute().is_err());
    assert!(attribute(0, 5, 8, 0).to_attribute().is_err());
    assert_eq!(
        attribute(0, 1, 8, 0).format().unwrap(),
        wgpu::VertexFormat::Float32
    );
    assert_eq!(
        attribute(0, 4, 8, 0).format().unwrap(),
        wgpu::VertexFormat::Float32x4
    );
}

#[test]
fn rejects_attributes_past_the_stride() {
    assert!(attribute(0, 3, 8, 6).to_attribute().is_err());
    assert!(attribute(0, 3, 8, 5).to_attribute().is_ok());
}

#[test]
fn rejects_mixed_strides() {
    let mut layout = VertexLayout::new();
    layout.add(attribute(0, 3, 8, 0)).unwrap();
    assert!(layout.add(attribute(1, 2, 6, 3)).is_err());
}

#[test]
fn rejects_duplicate_slots() {
    let mut layout = VertexLayout::new();
    layout.add(attribute(0, 3, 8, 0)).unwrap();
    assert!(layout.add(attribute(0, 2, 8, 3)).is_err());
    assert_eq!(layout.attributes().len(), 1);
}

#[test]
fn mesh_stores_interleaved_floats() {
    let vertices = vec![
        ModelVertex {
            position: [1.0, 2.0, 3.0],
            tex_coords: [0.5, 0.25],
            normal: [0.0, 1.0, 0.0],
        },
        ModelVertex::default(),
        ModelVertex::default(),
    ];
    let mesh = Mesh::new("tri", vertices.clone(), vec![0, 1, 2]);

    assert_eq!(mesh.vertex_data().len(), 24);
    assert_eq!(&mesh.vertex_data()[..8], &[1.0, 2.0, 3.0, 0.5, 0.25, 0.0, 1.0, 0.0]);
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.index_count(), 3);
    assert_eq!(mesh.vertex(0), Some(vertices[0]));
    assert_eq!(mesh.vertex(3), None);
}

#[test]
fn appended_indices_are_rebased() {
    let mut a = Mesh::new("a", vec![ModelVertex::default(); 3], vec![0, 1, 2]);
    let b = Mesh::new("b", vec![ModelVertex::default(); 4], vec![0, 1, 2, 2, 3, 0]);

    a.append(&b);

    assert_eq!(a.vertex_count(), 7);
    assert_eq!(a.index_data(), &[0, 1, 2, 3, 4, 5, 5, 6, 3]);
}

#[test]
fn uniform_blocks_match_shader_layouts() {
    assert_eq!(std::mem::size_of::<DrawUniform>(), 192);
    assert_eq!(std::mem::size_of::<LightingUniform>(), 48);
    assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    assert_eq!(std::mem::size_of::<ColorUniform>(), 16);
}

#[test]
fn material_uniform_carries_the_material() {
    let material = Material {
        shininess: 64.0,
        ..Material::default()
    };
    let uniform = MaterialUniform::from(&material);
    assert_eq!(uniform.diffuse, material.diffuse);
    assert_eq!(uniform.shininess, 64.0);
}

#[test]
fn draw_slots_are_aligned() {
    assert_eq!(align_to(192, 256), 256);
    assert_eq!(align_to(256, 256), 256);
    assert_eq!(align_to(257, 256), 512);
}

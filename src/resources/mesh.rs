use anyhow::{Result, ensure};

use crate::data_structures::model::{Mesh, ModelVertex};

/// Convert one tobj model (loaded with `single_index`) into an interleaved mesh.
///
/// Missing texture coordinates and normals default to zero. A present V is
/// flipped because OBJ puts the texture origin at the bottom left.
pub fn to_mesh(m: &tobj::Model) -> Mesh {
    let vertices = (0..m.mesh.positions.len() / 3)
        .map(|i| ModelVertex {
            position: [
                m.mesh.positions[i * 3],
                m.mesh.positions[i * 3 + 1],
                m.mesh.positions[i * 3 + 2],
            ],
            tex_coords: [
                m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| 1.0 - *f),
            ],
            normal: [
                m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ],
        })
        .collect::<Vec<_>>();

    Mesh::new(m.name.clone(), vertices, m.mesh.indices.clone())
}

/// Merge every object of an OBJ file into a single drawable mesh.
pub fn merge_models(file_name: &str, models: &[tobj::Model]) -> Result<Mesh> {
    let mut merged = Mesh::new(file_name, Vec::new(), Vec::new());
    for model in models {
        merged.append(&to_mesh(model));
    }
    ensure!(
        merged.index_count() > 0,
        "{file_name} contains no triangles"
    );
    ensure!(
        merged.index_count() % 3 == 0,
        "{file_name} has {} indices, which is not a triangle list",
        merged.index_count()
    );
    if models.len() > 1 {
        log::debug!("Merged {} objects of {}", models.len(), file_name);
    }
    Ok(merged)
}

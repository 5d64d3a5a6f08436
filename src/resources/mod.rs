use std::{
    future::Future,
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::data_structures::model::{Material, Model};

/**
 * This module contains all logic for loading meshes and materials from asset files.
 */
pub mod mesh;

pub async fn load_string(asset_root: &Path, file_name: &str) -> anyhow::Result<String> {
    let path = asset_root.join(file_name);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read asset {}", path.display()))
}

/// Load an OBJ file (and the MTL it references) from `asset_root`.
///
/// MTL paths are resolved relative to the directory of the OBJ file. A missing
/// MTL file is not fatal: the model then uses the default material.
pub async fn load_model_obj(asset_root: &Path, file_name: &str) -> anyhow::Result<Model> {
    let obj_text = load_string(asset_root, file_name).await?;
    let obj_dir: PathBuf = asset_root.join(
        Path::new(file_name)
            .parent()
            .unwrap_or_else(|| Path::new("")),
    );

    parse_obj(file_name, obj_text, |mtl_name| {
        let path = obj_dir.join(mtl_name);
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(mtl_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mtl_text))),
                Err(e) => {
                    log::warn!("Material file {} could not be read: {}", path.display(), e);
                    Err(tobj::LoadError::OpenFileFailed)
                }
            }
        }
    })
    .await
}

/// Parse OBJ text into a single mesh and its material.
///
/// `load_mtl` is called with every `mtllib` name the OBJ references.
pub async fn parse_obj<F, Fut>(file_name: &str, obj_text: String, load_mtl: F) -> anyhow::Result<Model>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = tobj::MTLLoadResult>,
{
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        load_mtl,
    )
    .await
    .with_context(|| format!("failed to parse {file_name}"))?;

    let materials = obj_materials.unwrap_or_else(|e| {
        log::warn!("Materials of {file_name} could not be loaded: {e}");
        Vec::new()
    });

    let mesh = mesh::merge_models(file_name, &models)?;
    let material = models
        .iter()
        .find_map(|m| m.mesh.material_id)
        .and_then(|id| materials.get(id))
        .map(Material::from)
        .unwrap_or_else(|| {
            log::debug!("{file_name} references no material, using the default");
            Material::default()
        });

    log::info!(
        "Loaded {}: {} vertices, {} indices, material {:?}",
        file_name,
        mesh.vertex_count(),
        mesh.index_count(),
        material.name
    );
    Ok(Model { mesh, material })
}

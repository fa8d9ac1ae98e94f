//! # Import Pipeline
//!
//! ```text
//! .vox ──► decode ──► Scene ──► resolve ──► PositionedTree
//!                       │
//!                       ├──► build_mesh (per model) ──► ImportedModel
//!                       ├──► palette strip
//!                       └──► material instances / voxel data
//! ```
//!
//! Decoding and resolution always run, so a broken file fails the import
//! whatever the configuration says. The `build_*` toggles only decide which
//! results are kept in the [`ImportOutput`].

use std::path::Path;

use lunavox_core::{GridSize, MaterialClass, MaterialTable, Palette, VoxelGrid, PALETTE_SIZE};
use lunavox_format::{
    decode_bytes, decode_file, model_label, DecodeWarning, ModelInstance, PositionedTree, Scene,
};
use lunavox_mesh::{build_mesh, ModelMesh};
use tracing::{debug, info};

use crate::config::ImportConfig;
use crate::error::{ImportError, ImportResult};

/// One meshed model.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedModel {
    /// Index in the scene's model list.
    pub index: usize,
    /// Display name, `vox_model #<index>`.
    pub name: String,
    /// Declared grid size.
    pub size: GridSize,
    /// Stored voxels.
    pub voxel_count: usize,
    /// Per-material batches.
    pub mesh: ModelMesh,
    /// Template bound to each batch, in batch order.
    pub material_slots: Vec<String>,
}

/// A host material created from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialInstance {
    /// Class the material renders.
    pub class: MaterialClass,
    /// Instance name, derived from the asset name.
    pub name: String,
    /// Template the instance is created from.
    pub template: String,
}

/// Raw voxel data kept alongside the generated assets.
#[derive(Debug, Clone)]
pub struct VoxelData {
    /// Decoded grids in file order.
    pub models: Vec<VoxelGrid>,
    /// Scene palette.
    pub palette: Palette,
    /// Material dictionaries and classes.
    pub materials: MaterialTable,
}

impl VoxelData {
    /// Class of every palette slot.
    #[must_use]
    pub fn classes(&self) -> &[MaterialClass; PALETTE_SIZE] {
        self.materials.classes()
    }
}

/// Everything an import produced.
#[derive(Debug, Clone)]
pub struct ImportOutput {
    /// Asset name.
    pub name: String,
    /// File format version.
    pub version: u32,
    /// Meshed models; empty unless geometry is built.
    pub models: Vec<ImportedModel>,
    /// Resolved hierarchy, if geometry is built.
    pub hierarchy: Option<PositionedTree>,
    /// Placed model instances, if geometry is built.
    pub instances: Vec<ModelInstance>,
    /// 256x1 RGBA palette strip.
    pub palette_texture: Option<Vec<u8>>,
    /// One instance per material class.
    pub material_instances: Vec<MaterialInstance>,
    /// Grids, palette and material table.
    pub voxel_data: Option<VoxelData>,
    /// Decode warnings.
    pub warnings: Vec<DecodeWarning>,
}

impl ImportOutput {
    /// Imported model at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::ModelNotFound`] if there is no such model.
    pub fn model(&self, index: usize) -> ImportResult<&ImportedModel> {
        self.models.get(index).ok_or(ImportError::ModelNotFound {
            index,
            count: self.models.len(),
        })
    }
}

/// Builds import output from a decoded scene.
///
/// # Errors
///
/// Returns [`ImportError::Scene`] if the node hierarchy does not resolve.
pub fn import(scene: Scene, name: &str, config: &ImportConfig) -> ImportResult<ImportOutput> {
    let tree = scene.resolve()?;

    let (models, hierarchy, instances) = if config.build_geometry {
        let models = mesh_models(&scene, config);
        let instances = tree.instances();
        (models, Some(tree), instances)
    } else {
        (Vec::new(), None, Vec::new())
    };

    let palette_texture = config
        .build_palette_texture
        .then(|| scene.palette.texture_bytes().to_vec());

    let material_instances = if config.build_material_instances {
        MaterialClass::ALL
            .iter()
            .map(|&class| MaterialInstance {
                class,
                name: format!("{name} {}", class.template_name()),
                template: config.templates.for_class(class).to_owned(),
            })
            .collect()
    } else {
        Vec::new()
    };

    info!(
        asset = name,
        models = scene.models.len(),
        voxels = scene.voxel_count(),
        instances = instances.len(),
        warnings = scene.warnings.len(),
        "imported"
    );

    let Scene {
        version,
        models: grids,
        palette,
        materials,
        warnings,
        ..
    } = scene;

    let voxel_data = config.build_voxel_data.then(|| VoxelData {
        models: grids,
        palette,
        materials,
    });

    Ok(ImportOutput {
        name: name.to_owned(),
        version,
        models,
        hierarchy,
        instances,
        palette_texture,
        material_instances,
        voxel_data,
        warnings,
    })
}

fn mesh_models(scene: &Scene, config: &ImportConfig) -> Vec<ImportedModel> {
    scene
        .models
        .iter()
        .enumerate()
        .map(|(index, grid)| {
            let mesh = build_mesh(grid, |color| scene.material_of(color));
            let material_slots = mesh
                .materials()
                .map(|class| config.templates.for_class(class).to_owned())
                .collect();
            debug!(
                model = index,
                batches = mesh.batches.len(),
                triangles = mesh.triangle_count(),
                "meshed"
            );
            ImportedModel {
                index,
                name: model_label(index),
                size: grid.size(),
                voxel_count: grid.voxel_count(),
                mesh,
                material_slots,
            }
        })
        .collect()
}

/// Decodes and imports an in-memory `.vox` file.
///
/// # Errors
///
/// Returns [`ImportError::Decode`] or [`ImportError::Scene`].
pub fn import_bytes(data: &[u8], name: &str, config: &ImportConfig) -> ImportResult<ImportOutput> {
    import(decode_bytes(data)?, name, config)
}

/// Decodes and imports a `.vox` file; the asset is named after the file stem.
///
/// # Errors
///
/// Returns [`ImportError::Decode`] or [`ImportError::Scene`].
pub fn import_file(path: impl AsRef<Path>, config: &ImportConfig) -> ImportResult<ImportOutput> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map_or_else(|| "vox".to_owned(), |s| s.to_string_lossy().into_owned());
    import(decode_file(path)?, &name, config)
}

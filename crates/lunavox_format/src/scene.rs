//! Decoded scene.

use lunavox_core::{AttributeDict, MaterialClass, MaterialTable, Palette, VoxelGrid};

use crate::error::{DecodeWarning, SceneResult};
use crate::node::SceneNode;
use crate::resolve::{resolve, PositionedTree};

/// Id of the scene root by convention.
pub const ROOT_NODE: usize = 0;

/// A `rCAM` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    /// Camera id.
    pub id: i32,
    /// Camera settings (`_mode`, `_focus`, `_angle`, ...).
    pub attributes: AttributeDict,
}

/// Everything decoded from one `.vox` stream.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// File format version, not validated.
    pub version: u32,
    /// Model count announced by a `PACK` chunk, if present.
    pub declared_model_count: Option<u32>,
    /// Sum of the voxel counts declared by all decoded `XYZI` chunks.
    pub total_voxels_read: u64,
    /// Models in file order.
    pub models: Vec<VoxelGrid>,
    /// Color table; the stock palette unless the file has an `RGBA` chunk.
    pub palette: Palette,
    /// Whether the palette came from the file.
    pub has_custom_palette: bool,
    /// Material dictionaries and classes per palette index.
    pub materials: MaterialTable,
    /// Flat node list, indexed by node id.
    pub nodes: Vec<SceneNode>,
    /// `rOBJ` render settings in file order.
    pub render_objects: Vec<AttributeDict>,
    /// `rCAM` cameras in file order.
    pub cameras: Vec<Camera>,
    /// Recoverable problems met while decoding.
    pub warnings: Vec<DecodeWarning>,
}

impl Scene {
    /// Model at `index`, if decoded.
    #[inline]
    #[must_use]
    pub fn model(&self, index: usize) -> Option<&VoxelGrid> {
        self.models.get(index)
    }

    /// Material class of palette index `color`.
    #[inline]
    #[must_use]
    pub fn material_of(&self, color: u8) -> MaterialClass {
        self.materials.class_of(color)
    }

    /// Voxels stored across all models.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.models.iter().map(VoxelGrid::voxel_count).sum()
    }

    /// Resolves the node list into a positioned tree from [`ROOT_NODE`].
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve(&self) -> SceneResult<PositionedTree> {
        resolve(&self.nodes, ROOT_NODE, self.models.len())
    }
}

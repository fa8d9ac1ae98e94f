//! Scene node model.
//!
//! The scene hierarchy is stored as a flat list. Nodes reference their
//! children by list position, never by pointer, so the list can be walked
//! in any order and cycles are detectable instead of unrepresentable.

use lunavox_core::AttributeDict;

use crate::chunk::ChunkTag;
use crate::error::VoxResult;
use crate::reader::ByteCursor;

/// One model reference held by a shape node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeModel {
    /// Index into the scene's model list.
    pub model: usize,
    /// Per-reference attributes (animation frame data, unused).
    pub attributes: AttributeDict,
}

/// Variant payload of a scene node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Positions its single child.
    Transform {
        /// Child node id.
        child: usize,
        /// Layer the subtree belongs to (-1 for none).
        layer: i32,
        /// Number of pose frames declared in the file.
        frame_count: usize,
        /// First pose frame (`_t`, `_r`, ...); empty if there were no frames.
        pose: AttributeDict,
    },
    /// Holds an ordered list of children.
    Group {
        /// Child node ids in file order.
        children: Vec<usize>,
    },
    /// Leaf referencing voxel models.
    Shape {
        /// Model references in file order.
        models: Vec<ShapeModel>,
    },
    /// Layer metadata; never a structural parent.
    Layer,
}

impl NodeKind {
    /// Label used when the node has no `_name` attribute.
    #[must_use]
    pub const fn default_label(&self) -> &'static str {
        match self {
            Self::Transform { .. } => "Transform",
            Self::Group { .. } => "Group",
            Self::Shape { .. } => "Shape",
            Self::Layer => "Layer",
        }
    }
}

/// A decoded `nTRN`, `nGRP`, `nSHP` or `LAYR` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    /// Position in the node list.
    pub id: usize,
    /// Id written in the payload.
    pub declared_id: i32,
    /// Node attributes (`_name`, `_hidden`, ...).
    pub attributes: AttributeDict,
    /// Variant data.
    pub kind: NodeKind,
}

impl SceneNode {
    /// Display label: the `_name` attribute or the variant name, suffixed with the id.
    #[must_use]
    pub fn label(&self) -> String {
        let name = self
            .attributes
            .name()
            .unwrap_or_else(|| self.kind.default_label());
        format!("{name} #{}", self.id)
    }

    /// Child node ids in traversal order.
    #[must_use]
    pub fn children(&self) -> &[usize] {
        match &self.kind {
            NodeKind::Transform { child, .. } => std::slice::from_ref(child),
            NodeKind::Group { children } => children,
            NodeKind::Shape { .. } | NodeKind::Layer => &[],
        }
    }

    /// Returns true for nodes whose id shares the scene graph numbering.
    ///
    /// Layers are numbered separately by the editor.
    #[must_use]
    pub const fn is_graph_node(&self) -> bool {
        !matches!(self.kind, NodeKind::Layer)
    }
}

/// Decodes a node chunk payload; `id` is the node's list position.
pub(crate) fn read_node(
    tag: ChunkTag,
    cursor: &mut ByteCursor<'_>,
    id: usize,
) -> VoxResult<Option<SceneNode>> {
    let declared_id = cursor.read_i32()?;
    let attributes = cursor.read_dict()?;
    let kind = match tag {
        ChunkTag::TRANSFORM => read_transform(cursor)?,
        ChunkTag::GROUP => read_group(cursor)?,
        ChunkTag::SHAPE => read_shape(cursor)?,
        ChunkTag::LAYER => {
            let _reserved = cursor.read_i32()?;
            NodeKind::Layer
        }
        _ => return Ok(None),
    };
    Ok(Some(SceneNode {
        id,
        declared_id,
        attributes,
        kind,
    }))
}

fn read_transform(cursor: &mut ByteCursor<'_>) -> VoxResult<NodeKind> {
    let child = cursor.read_u32()? as usize;
    let _reserved = cursor.read_i32()?;
    let layer = cursor.read_i32()?;
    let frame_count = cursor.read_u32()? as usize;

    // Only the first frame is kept; the rest are read to validate the payload.
    let mut pose = None;
    for _ in 0..frame_count {
        let frame = cursor.read_dict()?;
        pose.get_or_insert(frame);
    }

    Ok(NodeKind::Transform {
        child,
        layer,
        frame_count,
        pose: pose.unwrap_or_default(),
    })
}

fn read_group(cursor: &mut ByteCursor<'_>) -> VoxResult<NodeKind> {
    let count = cursor.read_len()?;
    let mut children = Vec::with_capacity(cursor.capacity_for(count, 4));
    for _ in 0..count {
        children.push(cursor.read_u32()? as usize);
    }
    Ok(NodeKind::Group { children })
}

fn read_shape(cursor: &mut ByteCursor<'_>) -> VoxResult<NodeKind> {
    let count = cursor.read_len()?;
    // Model id plus an empty dict is 8 bytes.
    let mut models = Vec::with_capacity(cursor.capacity_for(count, 8));
    for _ in 0..count {
        let model = cursor.read_u32()? as usize;
        let attributes = cursor.read_dict()?;
        models.push(ShapeModel { model, attributes });
    }
    Ok(NodeKind::Shape { models })
}

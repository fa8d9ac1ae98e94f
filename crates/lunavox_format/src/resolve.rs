//! Scene graph resolution.
//!
//! Turns the flat node list into an owned tree of positioned nodes, starting
//! at the root id. Translations accumulate down the tree; rotations are kept
//! as raw values and never applied.

use lunavox_core::{AttributeDict, VoxelPos};
use tracing::warn;

use crate::error::{SceneError, SceneResult};
use crate::node::{NodeKind, SceneNode};

/// Deepest node chain the resolver follows.
pub const MAX_HIERARCHY_DEPTH: usize = 128;

/// Most positioned nodes, model leaves included, one resolution may create.
///
/// Shared subtrees are instantiated once per path, so a short chain of nodes
/// listing the same child twice grows the tree exponentially.
pub const MAX_RESOLVED_NODES: usize = 1 << 18;

/// Pose attribute holding the translation, in file axis order X Z Y.
pub const TRANSLATION_KEY: &str = "_t";

/// Pose attribute holding the packed rotation byte.
pub const ROTATION_KEY: &str = "_r";

/// What a resolved node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionedKind {
    /// A transform node.
    Transform {
        /// Raw `_r` rotation byte, not applied to any offset.
        rotation: Option<u8>,
    },
    /// A group node.
    Group,
    /// A shape node; its children are model leaves.
    Shape,
    /// A layer placeholder.
    Layer,
    /// One voxel model instance.
    Model {
        /// Index into the scene's model list.
        index: usize,
    },
}

/// A node of the resolved hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedNode {
    /// Source node id; `None` for model leaves.
    pub node_id: Option<usize>,
    /// Display label, unique per source node.
    pub label: String,
    /// Offset relative to the parent.
    pub local_offset: VoxelPos,
    /// Sum of all local offsets from the root down to this node.
    pub world_offset: VoxelPos,
    /// Variant.
    pub kind: PositionedKind,
    /// Children in traversal order.
    pub children: Vec<PositionedNode>,
}

impl PositionedNode {
    fn visit<'a>(&'a self, out: &mut Vec<&'a PositionedNode>) {
        out.push(self);
        for child in &self.children {
            child.visit(out);
        }
    }
}

/// A model placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInstance {
    /// Index into the scene's model list.
    pub model: usize,
    /// Accumulated translation of the instance.
    pub world_offset: VoxelPos,
}

/// Resolved scene hierarchy. Empty when the file declared no nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionedTree {
    /// Root node, if any.
    pub root: Option<PositionedNode>,
}

impl PositionedTree {
    /// All nodes in depth-first pre-order.
    #[must_use]
    pub fn nodes(&self) -> Vec<&PositionedNode> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.visit(&mut out);
        }
        out
    }

    /// Model instances in traversal order.
    #[must_use]
    pub fn instances(&self) -> Vec<ModelInstance> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node.kind {
                PositionedKind::Model { index } => Some(ModelInstance {
                    model: index,
                    world_offset: node.world_offset,
                }),
                _ => None,
            })
            .collect()
    }
}

/// Resolves `nodes` into a positioned tree rooted at `root`.
///
/// `model_count` is the number of decoded models; shape references at or past
/// it are reported as [`SceneError::DanglingModel`].
///
/// # Errors
///
/// Returns a [`SceneError`] for a missing root, a dangling child or model
/// reference, a cycle, a chain deeper than [`MAX_HIERARCHY_DEPTH`], or a tree
/// larger than [`MAX_RESOLVED_NODES`].
pub fn resolve(nodes: &[SceneNode], root: usize, model_count: usize) -> SceneResult<PositionedTree> {
    if nodes.is_empty() {
        return Ok(PositionedTree::default());
    }
    if root >= nodes.len() {
        return Err(SceneError::MissingRoot { node: root });
    }
    let mut resolver = Resolver {
        nodes,
        model_count,
        path: Vec::new(),
        created: 0,
    };
    let root = resolver.visit(root, VoxelPos::default())?;
    Ok(PositionedTree { root: Some(root) })
}

struct Resolver<'a> {
    nodes: &'a [SceneNode],
    model_count: usize,
    /// Ancestors of the node being visited.
    path: Vec<usize>,
    created: usize,
}

impl Resolver<'_> {
    fn count_node(&mut self) -> SceneResult<()> {
        self.created += 1;
        if self.created > MAX_RESOLVED_NODES {
            return Err(SceneError::TooManyNodes {
                max: MAX_RESOLVED_NODES,
            });
        }
        Ok(())
    }

    fn visit(&mut self, id: usize, parent_world: VoxelPos) -> SceneResult<PositionedNode> {
        if self.path.contains(&id) {
            return Err(SceneError::CyclicHierarchy { node: id });
        }
        if self.path.len() >= MAX_HIERARCHY_DEPTH {
            return Err(SceneError::HierarchyTooDeep {
                node: id,
                max: MAX_HIERARCHY_DEPTH,
            });
        }
        self.count_node()?;
        let nodes = self.nodes;
        let node = &nodes[id];

        let (kind, local_offset) = match &node.kind {
            NodeKind::Transform { pose, .. } => (
                PositionedKind::Transform {
                    rotation: rotation(pose),
                },
                translation(node, pose),
            ),
            NodeKind::Group { .. } => (PositionedKind::Group, VoxelPos::default()),
            NodeKind::Shape { .. } => (PositionedKind::Shape, VoxelPos::default()),
            NodeKind::Layer => (PositionedKind::Layer, VoxelPos::default()),
        };
        let world_offset = parent_world + local_offset;

        let mut children = Vec::new();
        self.path.push(id);
        for &child in node.children() {
            if child >= nodes.len() {
                return Err(SceneError::DanglingNode { parent: id, child });
            }
            children.push(self.visit(child, world_offset)?);
        }
        self.path.pop();

        if let NodeKind::Shape { models } = &node.kind {
            for shape_model in models {
                if shape_model.model >= self.model_count {
                    return Err(SceneError::DanglingModel {
                        node: id,
                        model: shape_model.model,
                    });
                }
                self.count_node()?;
                children.push(PositionedNode {
                    node_id: None,
                    label: model_label(shape_model.model),
                    local_offset: VoxelPos::default(),
                    world_offset,
                    kind: PositionedKind::Model {
                        index: shape_model.model,
                    },
                    children: Vec::new(),
                });
            }
        }

        Ok(PositionedNode {
            node_id: Some(id),
            label: node.label(),
            local_offset,
            world_offset,
            kind,
            children,
        })
    }
}

/// Label given to model `index` in resolved trees and import output.
#[must_use]
pub fn model_label(index: usize) -> String {
    format!("vox_model #{index}")
}

/// Parses `_t` ("x z y") into a position, swapping the last two axes.
///
/// A missing or malformed value yields no offset.
fn translation(node: &SceneNode, pose: &AttributeDict) -> VoxelPos {
    let Some(raw) = pose.get(TRANSLATION_KEY) else {
        return VoxelPos::default();
    };
    match parse_translation(raw) {
        Some(pos) => pos,
        None => {
            warn!(node = node.id, value = raw, "ignoring malformed translation");
            VoxelPos::default()
        }
    }
}

fn parse_translation(raw: &str) -> Option<VoxelPos> {
    let mut parts = raw.split_whitespace().map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(VoxelPos::new(x, y, z))
}

fn rotation(pose: &AttributeDict) -> Option<u8> {
    pose.get(ROTATION_KEY)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ShapeModel;

    fn node(id: usize, kind: NodeKind) -> SceneNode {
        SceneNode {
            id,
            declared_id: id as i32,
            attributes: AttributeDict::new(),
            kind,
        }
    }

    fn transform(id: usize, child: usize, t: &str) -> SceneNode {
        node(
            id,
            NodeKind::Transform {
                child,
                layer: -1,
                frame_count: 1,
                pose: AttributeDict::from_pairs([(TRANSLATION_KEY, t)]),
            },
        )
    }

    fn shape(id: usize, model: usize) -> SceneNode {
        node(
            id,
            NodeKind::Shape {
                models: vec![ShapeModel {
                    model,
                    attributes: AttributeDict::new(),
                }],
            },
        )
    }

    #[test]
    fn test_translation_axis_swap() {
        assert_eq!(parse_translation("1 2 3"), Some(VoxelPos::new(1, 3, 2)));
        assert_eq!(parse_translation(" -4  0 7 "), Some(VoxelPos::new(-4, 7, 0)));
        assert_eq!(parse_translation("1 2"), None);
        assert_eq!(parse_translation("1 2 x"), None);
        assert_eq!(parse_translation("1 2 3 4"), None);
    }

    #[test]
    fn test_empty_node_list() {
        assert_eq!(resolve(&[], 0, 0).unwrap(), PositionedTree::default());
    }

    #[test]
    fn test_offsets_accumulate() {
        // T0 -> G1 -> [T2 -> S3(model 0), T4 -> S5(model 1)]
        let nodes = vec![
            transform(0, 1, "0 0 0"),
            node(1, NodeKind::Group { children: vec![2, 4] }),
            transform(2, 3, "1 2 3"),
            shape(3, 0),
            transform(4, 5, "-5 0 10"),
            shape(5, 1),
        ];
        let tree = resolve(&nodes, 0, 2).unwrap();
        let instances = tree.instances();
        assert_eq!(
            instances,
            vec![
                ModelInstance { model: 0, world_offset: VoxelPos::new(1, 3, 2) },
                ModelInstance { model: 1, world_offset: VoxelPos::new(-5, 10, 0) },
            ]
        );

        let labels: Vec<_> = tree.nodes().iter().map(|n| n.label.clone()).collect();
        assert_eq!(labels[0], "Transform #0");
        assert!(labels.contains(&"vox_model #1".to_string()));
    }

    #[test]
    fn test_nested_transforms_stack() {
        let nodes = vec![
            transform(0, 1, "1 1 1"),
            transform(1, 2, "2 0 0"),
            shape(2, 0),
        ];
        let tree = resolve(&nodes, 0, 1).unwrap();
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.local_offset, VoxelPos::new(1, 1, 1));
        assert_eq!(root.children[0].local_offset, VoxelPos::new(2, 0, 0));
        assert_eq!(tree.instances()[0].world_offset, VoxelPos::new(3, 1, 1));
    }

    #[test]
    fn test_rotation_is_kept_raw() {
        let mut t = transform(0, 1, "0 0 0");
        if let NodeKind::Transform { pose, .. } = &mut t.kind {
            *pose = AttributeDict::from_pairs([(ROTATION_KEY, "20")]);
        }
        let tree = resolve(&[t, shape(1, 0)], 0, 1).unwrap();
        let root = tree.root.unwrap();
        assert_eq!(root.kind, PositionedKind::Transform { rotation: Some(20) });
        assert_eq!(root.world_offset, VoxelPos::default());
    }

    #[test]
    fn test_dangling_references() {
        let nodes = vec![transform(0, 7, "0 0 0")];
        assert_eq!(
            resolve(&nodes, 0, 0),
            Err(SceneError::DanglingNode { parent: 0, child: 7 })
        );

        let nodes = vec![transform(0, 1, "0 0 0"), shape(1, 3)];
        assert_eq!(
            resolve(&nodes, 0, 2),
            Err(SceneError::DanglingModel { node: 1, model: 3 })
        );

        assert_eq!(
            resolve(&nodes, 5, 4),
            Err(SceneError::MissingRoot { node: 5 })
        );
    }

    #[test]
    fn test_cycle_is_detected() {
        let nodes = vec![
            transform(0, 1, "0 0 0"),
            node(1, NodeKind::Group { children: vec![0] }),
        ];
        assert_eq!(resolve(&nodes, 0, 0), Err(SceneError::CyclicHierarchy { node: 0 }));
    }

    #[test]
    fn test_shared_subtree_is_not_a_cycle() {
        let nodes = vec![
            node(0, NodeKind::Group { children: vec![1, 1] }),
            shape(1, 0),
        ];
        let tree = resolve(&nodes, 0, 1).unwrap();
        assert_eq!(tree.instances().len(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let count = MAX_HIERARCHY_DEPTH + 2;
        let mut nodes: Vec<_> = (0..count - 1).map(|i| transform(i, i + 1, "0 0 0")).collect();
        nodes.push(shape(count - 1, 0));
        assert!(matches!(
            resolve(&nodes, 0, 1),
            Err(SceneError::HierarchyTooDeep { .. })
        ));
    }

    #[test]
    fn test_doubling_shared_subtrees_hit_node_limit() {
        // Each group lists the next one twice: 2^24 paths to the shape.
        let levels = 24;
        let mut nodes: Vec<_> = (0..levels)
            .map(|i| node(i, NodeKind::Group { children: vec![i + 1, i + 1] }))
            .collect();
        nodes.push(shape(levels, 0));
        assert_eq!(
            resolve(&nodes, 0, 1),
            Err(SceneError::TooManyNodes { max: MAX_RESOLVED_NODES })
        );
    }

    #[test]
    fn test_layer_child_is_placeholder() {
        let nodes = vec![
            node(0, NodeKind::Group { children: vec![1] }),
            node(1, NodeKind::Layer),
        ];
        let root = resolve(&nodes, 0, 0).unwrap().root.unwrap();
        let layer = &root.children[0];
        assert_eq!(layer.kind, PositionedKind::Layer);
        assert!(layer.children.is_empty());
    }
}

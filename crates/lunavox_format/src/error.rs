//! # Decode Error Types
//!
//! Fatal errors abort the whole decode. Anything the decoder can recover from
//! is a [`DecodeWarning`] collected on the scene instead.

use std::io;

use thiserror::Error;

use crate::chunk::ChunkTag;

/// Errors that abort decoding a `.vox` stream.
#[derive(Error, Debug)]
pub enum VoxError {
    /// The stream does not start with `"VOX "`.
    #[error("invalid signature: expected 'VOX ', found {found:?}")]
    InvalidSignature {
        /// The four bytes actually read.
        found: [u8; 4],
    },

    /// The first chunk after the version is not `MAIN`.
    #[error("expected MAIN chunk, found '{found}'")]
    MissingMainChunk {
        /// Tag of the chunk found instead.
        found: ChunkTag,
    },

    /// A `SIZE` chunk declares an extent outside `1..=256`.
    #[error("invalid model size {x}x{y}x{z}")]
    InvalidModelSize {
        /// Declared X extent.
        x: i32,
        /// Declared Y extent (file's third value).
        y: i32,
        /// Declared Z extent (file's second value).
        z: i32,
    },

    /// A known chunk's payload needs more bytes than its declared content size.
    #[error("chunk '{tag}' at offset {offset} overruns its declared {declared} content bytes")]
    ChunkOverrun {
        /// Tag of the malformed chunk.
        tag: ChunkTag,
        /// Offset of the chunk header.
        offset: u64,
        /// Declared content size.
        declared: u32,
    },

    /// A nested chunk extends past the children area of its parent.
    #[error("chunk '{tag}' at offset {offset} ends at {end}, past its parent's end at {parent_end}")]
    ChildOverrun {
        /// Tag of the nested chunk.
        tag: ChunkTag,
        /// Offset of the chunk header.
        offset: u64,
        /// End of the chunk's content and children.
        end: u64,
        /// End of the parent's children area.
        parent_end: u64,
    },

    /// A count or string length field is negative.
    #[error("negative length {length} in chunk '{tag}' at offset {offset}")]
    InvalidLength {
        /// Tag of the malformed chunk.
        tag: ChunkTag,
        /// Offset of the chunk header.
        offset: u64,
        /// The length as read.
        length: i32,
    },

    /// Chunks nest deeper than the decoder follows.
    #[error("chunk nesting deeper than {max} levels at offset {offset}")]
    NestingTooDeep {
        /// Offset of the chunk that crossed the limit.
        offset: u64,
        /// The nesting limit.
        max: usize,
    },

    /// The stream ends before a chunk does.
    #[error("file truncated at offset {offset}: {needed} more bytes expected")]
    Truncated {
        /// Offset where data ran out.
        offset: u64,
        /// Bytes the decoder still needed.
        needed: u64,
    },

    /// Underlying I/O failure other than running out of data.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl VoxError {
    /// Converts a read failure, turning end-of-stream into [`VoxError::Truncated`].
    pub(crate) fn from_read(err: io::Error, offset: u64, needed: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated { offset, needed }
        } else {
            Self::Io(err)
        }
    }
}

/// Result type for decoding.
pub type VoxResult<T> = Result<T, VoxError>;

/// Recoverable inconsistencies found while decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A chunk tag the decoder does not know; its bytes were skipped.
    #[error("skipped unknown chunk '{tag}' at offset {offset} ({skipped} bytes)")]
    UnknownChunk {
        /// The unknown tag.
        tag: ChunkTag,
        /// Offset of the chunk header.
        offset: u64,
        /// Content plus children bytes skipped.
        skipped: u64,
    },

    /// An `XYZI` chunk without a `SIZE` chunk before it; the chunk was skipped.
    #[error("XYZI chunk at offset {offset} has no preceding SIZE chunk")]
    ChunkOrder {
        /// Offset of the `XYZI` chunk header.
        offset: u64,
    },

    /// A node's embedded id differs from its position in the node list.
    #[error("node #{expected} declares id {found}")]
    NodeIdMismatch {
        /// Position in the node list, used as the id.
        expected: usize,
        /// Id written in the payload.
        found: i32,
    },

    /// Voxel records outside the model's declared size were dropped.
    #[error("model #{model}: dropped {count} voxels outside the declared size")]
    VoxelOutOfBounds {
        /// Index of the model.
        model: usize,
        /// Number of dropped records.
        count: usize,
    },

    /// Voxel records with palette index 0 were dropped.
    #[error("model #{model}: dropped {count} voxels with empty color index")]
    EmptyColorIndex {
        /// Index of the model.
        model: usize,
        /// Number of dropped records.
        count: usize,
    },

    /// A `MATL` chunk targets an index outside the material table.
    #[error("material index {index} out of range")]
    MaterialIndexOutOfRange {
        /// The declared index.
        index: i32,
    },
}

/// Errors raised while resolving the node hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The root id is not in a non-empty node list.
    #[error("root node {node} does not exist")]
    MissingRoot {
        /// The requested root id.
        node: usize,
    },

    /// A node references a child id that is not in the node list.
    #[error("node #{parent} references missing node {child}")]
    DanglingNode {
        /// Id of the referencing node.
        parent: usize,
        /// The missing child id.
        child: usize,
    },

    /// A shape node references a model index that was never decoded.
    #[error("shape node #{node} references missing model {model}")]
    DanglingModel {
        /// Id of the shape node.
        node: usize,
        /// The missing model index.
        model: usize,
    },

    /// A node is its own ancestor.
    #[error("node #{node} is its own ancestor")]
    CyclicHierarchy {
        /// Id of the node closing the cycle.
        node: usize,
    },

    /// The hierarchy is deeper than the resolver follows.
    #[error("node hierarchy deeper than {max} levels at node #{node}")]
    HierarchyTooDeep {
        /// Id of the node that crossed the limit.
        node: usize,
        /// The depth limit.
        max: usize,
    },

    /// Shared subtrees expand into more positioned nodes than allowed.
    #[error("resolved hierarchy exceeds {max} nodes")]
    TooManyNodes {
        /// The node limit.
        max: usize,
    },
}

/// Result type for scene resolution.
pub type SceneResult<T> = Result<T, SceneError>;

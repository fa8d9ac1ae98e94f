//! # LUNAVOX Format
//!
//! Decoder for MagicaVoxel `.vox` files and the scene graph they describe.
//!
//! - [`decode`] / [`decode_bytes`] / [`decode_file`]: stream to [`Scene`]
//! - [`SceneNode`] / [`NodeKind`]: the flat, id-indexed node list
//! - [`resolve`]: node list to a [`PositionedTree`] of placed model instances
//!
//! Decoding never panics on malformed input. Fatal problems are a
//! [`VoxError`]; recoverable ones are [`DecodeWarning`]s on the scene and are
//! also emitted through `tracing`.
//!
//! ```rust,ignore
//! let scene = lunavox_format::decode_file("assets/castle.vox")?;
//! for instance in scene.resolve()?.instances() {
//!     let grid = &scene.models[instance.model];
//!     println!("{:?} at {:?}", grid.size(), instance.world_offset);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod decoder;
pub mod error;
pub mod node;
mod reader;
pub mod resolve;
pub mod scene;

pub use chunk::{ChunkHeader, ChunkTag, CHUNK_HEADER_SIZE};
pub use decoder::{decode, decode_bytes, decode_file, MAX_CHUNK_DEPTH, VOX_SIGNATURE};
pub use error::{DecodeWarning, SceneError, SceneResult, VoxError, VoxResult};
pub use node::{NodeKind, SceneNode, ShapeModel};
pub use resolve::{
    model_label, resolve, ModelInstance, PositionedKind, PositionedNode, PositionedTree,
    MAX_HIERARCHY_DEPTH, MAX_RESOLVED_NODES,
};
pub use scene::{Camera, Scene, ROOT_NODE};

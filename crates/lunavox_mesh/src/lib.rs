//! # LUNAVOX Mesh
//!
//! Turns a [`VoxelGrid`](lunavox_core::VoxelGrid) into renderable triangles.
//!
//! ```text
//! VoxelGrid ──► build_mesh ──► ModelMesh
//!                               ├─ MeshBatch (Diffuse)   positions / normals / uvs / triangles
//!                               ├─ MeshBatch (Metal)
//!                               ├─ MeshBatch (Glass)
//!                               └─ MeshBatch (Emit)
//! ```
//!
//! Faces are culled per voxel: a face is emitted only where a solid cell
//! meets an empty cell or the edge of the grid. Texture coordinates index a
//! 256x1 palette strip, see [`Palette::texcoord`](lunavox_core::Palette::texcoord).

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod batch;
pub mod face;
pub mod mesher;

pub use batch::{IndexFormat, MeshBatch, MeshVertex, ModelMesh};
pub use face::{Face, QUAD_INDICES};
pub use mesher::build_mesh;

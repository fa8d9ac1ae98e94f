//! # LUNAVOX Core
//!
//! In-memory model of a decoded MagicaVoxel scene, independent of the file format:
//!
//! - [`VoxelGrid`]: one model, a bounded 3D grid of palette indices with
//!   adjacency and reachability queries
//! - [`Palette`]: the 256-slot color table (slot 0 is "no voxel")
//! - [`MaterialClass`] / [`MaterialTable`]: per-index material classification
//! - [`AttributeDict`]: the ordered string map every chunk uses for metadata
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  lunavox_format  →  Scene { grids, palette, materials }  │
//! │         ↓                         ↓                      │
//! │  Scene Graph Resolver       lunavox_mesh (face culling)  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod attributes;
pub mod grid;
pub mod material;
pub mod palette;

pub use attributes::AttributeDict;
pub use grid::{GridSize, Voxel, VoxelGrid, VoxelPos, MAX_MODEL_EXTENT};
pub use material::{MaterialClass, MaterialTable, MATERIAL_SLOTS};
pub use palette::{Palette, Rgba, PALETTE_SIZE};

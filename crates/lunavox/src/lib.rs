//! # LUNAVOX
//!
//! MagicaVoxel `.vox` importer. Decodes a file, resolves its scene graph,
//! meshes every model per material class, and hands the results to the host
//! as plain data, filtered by an [`ImportConfig`].
//!
//! ## Crates
//!
//! | crate            | concern                                          |
//! |------------------|--------------------------------------------------|
//! | `lunavox_core`   | grids, palette, materials, attribute dictionaries |
//! | `lunavox_format` | chunk decoder, scene nodes, scene graph resolver |
//! | `lunavox_mesh`   | face-culling mesher                              |
//! | `lunavox`        | import pipeline, configuration, CLI              |
//!
//! ```rust,ignore
//! let config = lunavox::ImportConfig::load("import.toml")?;
//! let output = lunavox::import_file("assets/castle.vox", &config)?;
//! for model in &output.models {
//!     println!("{}: {} triangles", model.name, model.mesh.triangle_count());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod import;

pub use config::{ImportConfig, MaterialTemplates};
pub use error::{ImportError, ImportResult};
pub use import::{
    import, import_bytes, import_file, ImportOutput, ImportedModel, MaterialInstance, VoxelData,
};

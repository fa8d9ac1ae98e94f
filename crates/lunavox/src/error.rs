//! # Import Error Types

use std::io;
use std::path::PathBuf;

use lunavox_format::{SceneError, VoxError};
use thiserror::Error;

/// Errors that abort an import.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The `.vox` stream could not be decoded.
    #[error("decode failed: {0}")]
    Decode(#[from] VoxError),

    /// The node hierarchy references missing nodes or models.
    #[error("invalid scene graph: {0}")]
    Scene(#[from] SceneError),

    /// The import configuration is not valid TOML for [`ImportConfig`](crate::ImportConfig).
    #[error("invalid import configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A model index past the decoded model list.
    #[error("model {index} does not exist (file has {count})")]
    ModelNotFound {
        /// Requested index.
        index: usize,
        /// Number of decoded models.
        count: usize,
    },
}

/// Result type for imports.
pub type ImportResult<T> = Result<T, ImportError>;

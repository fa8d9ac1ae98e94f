//! Import configuration.
//!
//! ```toml
//! build_geometry = true
//! build_palette_texture = true
//! build_material_instances = true
//! build_voxel_data = true
//!
//! [templates]
//! diffuse = "Materials/_diffuse"
//! metal = "Materials/_metal"
//! glass = "Materials/_glass"
//! emit = "Materials/_emit"
//! ```
//!
//! Every key is optional; missing keys take the values shown.

use std::fs;
use std::path::Path;

use lunavox_core::MaterialClass;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};

/// Directory prefix of the stock material templates.
pub const TEMPLATE_DIR: &str = "Materials";

/// What an import produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Mesh every model and keep the resolved hierarchy.
    pub build_geometry: bool,
    /// Emit the 256x1 RGBA palette strip.
    pub build_palette_texture: bool,
    /// Emit one material instance per material class.
    pub build_material_instances: bool,
    /// Keep the voxel grids, palette and material table.
    pub build_voxel_data: bool,
    /// Host material template per material class.
    pub templates: MaterialTemplates,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            build_geometry: true,
            build_palette_texture: true,
            build_material_instances: true,
            build_voxel_data: true,
            templates: MaterialTemplates::default(),
        }
    }
}

impl ImportConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Config`] for malformed TOML or unknown keys.
    pub fn from_toml_str(toml_str: &str) -> ImportResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Read`] if the file cannot be read, otherwise as
    /// [`ImportConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Material template names, one per [`MaterialClass`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialTemplates {
    /// Template for [`MaterialClass::Diffuse`].
    pub diffuse: String,
    /// Template for [`MaterialClass::Metal`].
    pub metal: String,
    /// Template for [`MaterialClass::Glass`].
    pub glass: String,
    /// Template for [`MaterialClass::Emit`].
    pub emit: String,
}

impl Default for MaterialTemplates {
    fn default() -> Self {
        let stock = |class: MaterialClass| format!("{TEMPLATE_DIR}/{}", class.template_name());
        Self {
            diffuse: stock(MaterialClass::Diffuse),
            metal: stock(MaterialClass::Metal),
            glass: stock(MaterialClass::Glass),
            emit: stock(MaterialClass::Emit),
        }
    }
}

impl MaterialTemplates {
    /// Template selected for `class`.
    #[must_use]
    pub fn for_class(&self, class: MaterialClass) -> &str {
        match class {
            MaterialClass::Diffuse => &self.diffuse,
            MaterialClass::Metal => &self.metal,
            MaterialClass::Glass => &self.glass,
            MaterialClass::Emit => &self.emit,
        }
    }
}

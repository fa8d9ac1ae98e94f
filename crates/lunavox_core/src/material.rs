//! Material classification per palette index.
//!
//! MagicaVoxel attaches an optional attribute dictionary (`MATL` chunk) to any
//! palette index. Only its `_type` attribute matters here: it selects one of
//! four material classes, and each class maps to one fixed shader template on
//! the host side. Indices without a dictionary, or with an unrecognized
//! `_type`, are [`MaterialClass::Diffuse`].

use crate::attributes::AttributeDict;
use crate::palette::PALETTE_SIZE;

/// Size of the material attribute table.
///
/// `MATL` ids observed in the wild run 1..=256, one past the last palette slot.
pub const MATERIAL_SLOTS: usize = PALETTE_SIZE + 1;

/// Attribute key holding the material type.
pub const TYPE_KEY: &str = "_type";

/// Material class of a palette index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MaterialClass {
    /// Plain lit surface.
    #[default]
    Diffuse = 0,
    /// Metallic surface.
    Metal = 1,
    /// Transparent surface.
    Glass = 2,
    /// Emissive surface.
    Emit = 3,
}

impl MaterialClass {
    /// All classes in batch order.
    pub const ALL: [Self; 4] = [Self::Diffuse, Self::Metal, Self::Glass, Self::Emit];

    /// Position of this class in [`MaterialClass::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps a `_type` attribute value to a class.
    #[must_use]
    pub fn from_type_attribute(value: &str) -> Self {
        match value {
            "_metal" => Self::Metal,
            "_glass" => Self::Glass,
            "_emit" => Self::Emit,
            // "_diffuse" and everything newer editors invent ("_blend", "_media", ...)
            _ => Self::Diffuse,
        }
    }

    /// Classifies an optional material dictionary.
    #[must_use]
    pub fn from_attributes(attributes: Option<&AttributeDict>) -> Self {
        attributes
            .and_then(|dict| dict.get(TYPE_KEY))
            .map_or(Self::Diffuse, Self::from_type_attribute)
    }

    /// Name of the default host material template for this class.
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Diffuse => "_diffuse",
            Self::Metal => "_metal",
            Self::Glass => "_glass",
            Self::Emit => "_emit",
        }
    }
}

/// Material dictionaries and their derived classes, indexed by palette index.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    /// Raw `MATL` dictionaries by id.
    attributes: Vec<Option<AttributeDict>>,
    /// Derived class per palette slot.
    classes: [MaterialClass; PALETTE_SIZE],
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialTable {
    /// Creates a table where every index is diffuse.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributes: vec![None; MATERIAL_SLOTS],
            classes: [MaterialClass::Diffuse; PALETTE_SIZE],
        }
    }

    /// Stores the dictionary of material `index`.
    ///
    /// Returns false (and stores nothing) if `index` is outside the table.
    pub fn set(&mut self, index: usize, attributes: AttributeDict) -> bool {
        let Some(slot) = self.attributes.get_mut(index) else {
            return false;
        };
        if let Some(class) = self.classes.get_mut(index) {
            *class = MaterialClass::from_attributes(Some(&attributes));
        }
        *slot = Some(attributes);
        true
    }

    /// Raw dictionary of material `index`, if the file declared one.
    #[must_use]
    pub fn attributes(&self, index: usize) -> Option<&AttributeDict> {
        self.attributes.get(index).and_then(Option::as_ref)
    }

    /// Material class of palette index `color`.
    #[inline]
    #[must_use]
    pub fn class_of(&self, color: u8) -> MaterialClass {
        self.classes[usize::from(color)]
    }

    /// Class of every palette slot, for the host's shader selection.
    #[inline]
    #[must_use]
    pub fn classes(&self) -> &[MaterialClass; PALETTE_SIZE] {
        &self.classes
    }

    /// Number of declared material dictionaries.
    #[must_use]
    pub fn declared_count(&self) -> usize {
        self.attributes.iter().filter(|a| a.is_some()).count()
    }
}

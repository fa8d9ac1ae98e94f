//! Chunk framing.
//!
//! ```text
//! ┌──────────┬──────────────┬───────────────┬─────────┬────────────┐
//! │ tag (4)  │ content (u32)│ children (u32)│ payload │ children…  │
//! └──────────┴──────────────┴───────────────┴─────────┴────────────┘
//! ```

use std::fmt;

/// Size of a chunk header in bytes.
pub const CHUNK_HEADER_SIZE: u64 = 12;

/// Four-byte chunk identifier, kept opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    /// Root chunk.
    pub const MAIN: Self = Self(*b"MAIN");
    /// Declared model count.
    pub const PACK: Self = Self(*b"PACK");
    /// Model extents.
    pub const SIZE: Self = Self(*b"SIZE");
    /// Model voxels.
    pub const XYZI: Self = Self(*b"XYZI");
    /// Palette.
    pub const RGBA: Self = Self(*b"RGBA");
    /// Material attributes.
    pub const MATL: Self = Self(*b"MATL");
    /// Transform node.
    pub const TRANSFORM: Self = Self(*b"nTRN");
    /// Group node.
    pub const GROUP: Self = Self(*b"nGRP");
    /// Shape node.
    pub const SHAPE: Self = Self(*b"nSHP");
    /// Layer.
    pub const LAYER: Self = Self(*b"LAYR");
    /// Render object settings.
    pub const RENDER_OBJECT: Self = Self(*b"rOBJ");
    /// Camera settings.
    pub const CAMERA: Self = Self(*b"rCAM");
    /// Palette note strings.
    pub const NOTE: Self = Self(*b"NOTE");

    /// Raw bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({self})")
    }
}

/// A decoded chunk header plus where it sits in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Chunk identifier.
    pub tag: ChunkTag,
    /// Bytes of this chunk's own payload.
    pub content_size: u32,
    /// Bytes occupied by nested chunks after the payload.
    pub children_size: u32,
    /// Stream offset of the header's first byte.
    pub offset: u64,
}

impl ChunkHeader {
    /// Offset of the first payload byte.
    #[inline]
    #[must_use]
    pub const fn content_start(&self) -> u64 {
        self.offset + CHUNK_HEADER_SIZE
    }

    /// Offset one past the payload, where children begin.
    #[inline]
    #[must_use]
    pub const fn content_end(&self) -> u64 {
        self.content_start() + self.content_size as u64
    }

    /// Offset one past the last child; the next sibling starts here.
    #[inline]
    #[must_use]
    pub const fn children_end(&self) -> u64 {
        self.content_end() + self.children_size as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        assert_eq!(ChunkTag::TRANSFORM.to_string(), "nTRN");
        assert_eq!(ChunkTag(*b"A\0B\xff").to_string(), "A\\x00B\\xff");
    }

    #[test]
    fn test_header_extents() {
        let header = ChunkHeader {
            tag: ChunkTag::SIZE,
            content_size: 12,
            children_size: 30,
            offset: 20,
        };
        assert_eq!(header.content_start(), 32);
        assert_eq!(header.content_end(), 44);
        assert_eq!(header.children_end(), 74);
    }
}

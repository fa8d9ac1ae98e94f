//! # Chunk Decoder
//!
//! ```text
//! "VOX " │ version │ MAIN ─┬─ PACK?
//!                          ├─ (SIZE, XYZI)*
//!                          ├─ nTRN | nGRP | nSHP | LAYR *
//!                          ├─ RGBA?  MATL*  rOBJ*  rCAM*  NOTE?
//!                          └─ unknown tags (skipped by declared size)
//! ```
//!
//! Chunks are consumed strictly in order: a chunk's position is only known
//! after every chunk before it has been framed. Every known payload is read
//! whole and parsed within its declared size; unknown chunks are stepped
//! over using `contentSize + childrenSize`.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use lunavox_core::{GridSize, Palette, Rgba, VoxelGrid, VoxelPos, MAX_MODEL_EXTENT, PALETTE_SIZE};
use tracing::{debug, warn};

use crate::chunk::{ChunkHeader, ChunkTag};
use crate::error::{DecodeWarning, VoxError, VoxResult};
use crate::node::read_node;
use crate::reader::{ByteCursor, StreamReader};
use crate::scene::{Camera, Scene};

/// File signature.
pub const VOX_SIGNATURE: [u8; 4] = *b"VOX ";

/// Deepest chunk nesting the decoder follows below `MAIN`.
pub const MAX_CHUNK_DEPTH: usize = 16;

/// Decodes a `.vox` stream.
///
/// # Errors
///
/// Returns a [`VoxError`] for a bad signature, a missing `MAIN` chunk, a
/// malformed known chunk, or a stream that ends before its chunks do.
/// Recoverable problems are collected in [`Scene::warnings`] instead.
pub fn decode<R: Read + Seek>(reader: R) -> VoxResult<Scene> {
    Decoder::new(reader)?.run()
}

/// Decodes a `.vox` file held in memory.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_bytes(data: &[u8]) -> VoxResult<Scene> {
    decode(Cursor::new(data))
}

/// Opens and decodes a `.vox` file.
///
/// # Errors
///
/// See [`decode`]; failing to open the file is [`VoxError::Io`].
pub fn decode_file<P: AsRef<Path>>(path: P) -> VoxResult<Scene> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

struct Decoder<R> {
    reader: StreamReader<R>,
    scene: Scene,
    /// Size waiting for its `XYZI` chunk.
    pending_size: Option<GridSize>,
}

impl<R: Read + Seek> Decoder<R> {
    fn new(reader: R) -> VoxResult<Self> {
        Ok(Self {
            reader: StreamReader::new(reader)?,
            scene: Scene::default(),
            pending_size: None,
        })
    }

    fn run(mut self) -> VoxResult<Scene> {
        let signature = self.reader.read_array::<4>()?;
        if signature != VOX_SIGNATURE {
            return Err(VoxError::InvalidSignature { found: signature });
        }
        self.scene.version = self.reader.read_u32()?;

        let main = self.reader.read_header()?;
        if main.tag != ChunkTag::MAIN {
            return Err(VoxError::MissingMainChunk { found: main.tag });
        }
        self.reader.seek_to(main.content_end())?;
        self.decode_children(main.children_end(), 1)?;

        if let Some(size) = self.pending_size {
            debug!(?size, "SIZE chunk without voxel data");
        }
        debug!(
            version = self.scene.version,
            models = self.scene.models.len(),
            nodes = self.scene.nodes.len(),
            warnings = self.scene.warnings.len(),
            "decoded vox scene"
        );
        Ok(self.scene)
    }

    fn decode_children(&mut self, end: u64, depth: usize) -> VoxResult<()> {
        while self.reader.position() < end {
            let header = self.reader.read_header()?;
            if header.children_end() > end {
                return Err(VoxError::ChildOverrun {
                    tag: header.tag,
                    offset: header.offset,
                    end: header.children_end(),
                    parent_end: end,
                });
            }
            self.decode_chunk(header, depth)?;
        }
        Ok(())
    }

    fn decode_chunk(&mut self, header: ChunkHeader, depth: usize) -> VoxResult<()> {
        if !is_known(header.tag) {
            let skipped = u64::from(header.content_size) + u64::from(header.children_size);
            self.warn(DecodeWarning::UnknownChunk {
                tag: header.tag,
                offset: header.offset,
                skipped,
            });
            return self.reader.seek_to(header.children_end());
        }

        let payload = self.reader.read_payload(&header)?;
        let mut cursor = ByteCursor::new(&payload, header);
        debug!(tag = %header.tag, offset = header.offset, size = header.content_size, "chunk");

        match header.tag {
            ChunkTag::PACK => {
                self.scene.declared_model_count = Some(cursor.read_u32()?);
            }
            ChunkTag::SIZE => self.read_size(&mut cursor)?,
            ChunkTag::XYZI => self.read_voxels(&mut cursor, header)?,
            ChunkTag::RGBA => self.read_palette(&mut cursor)?,
            ChunkTag::MATL => {
                let index = cursor.read_i32()?;
                let attributes = cursor.read_dict()?;
                let stored = usize::try_from(index)
                    .map(|i| self.scene.materials.set(i, attributes))
                    .unwrap_or(false);
                if !stored {
                    self.warn(DecodeWarning::MaterialIndexOutOfRange { index });
                }
            }
            ChunkTag::TRANSFORM | ChunkTag::GROUP | ChunkTag::SHAPE | ChunkTag::LAYER => {
                let expected = self.scene.nodes.len();
                if let Some(node) = read_node(header.tag, &mut cursor, expected)? {
                    if node.is_graph_node() && usize::try_from(node.declared_id) != Ok(expected) {
                        self.warn(DecodeWarning::NodeIdMismatch {
                            expected,
                            found: node.declared_id,
                        });
                    }
                    self.scene.nodes.push(node);
                }
            }
            ChunkTag::RENDER_OBJECT => {
                let attributes = cursor.read_dict()?;
                self.scene.render_objects.push(attributes);
            }
            ChunkTag::CAMERA => {
                let id = cursor.read_i32()?;
                let attributes = cursor.read_dict()?;
                self.scene.cameras.push(Camera { id, attributes });
            }
            // Named frame strings; the payload is already consumed.
            _ => {}
        }

        if header.children_size > 0 {
            if depth >= MAX_CHUNK_DEPTH {
                return Err(VoxError::NestingTooDeep {
                    offset: header.offset,
                    max: MAX_CHUNK_DEPTH,
                });
            }
            self.decode_children(header.children_end(), depth + 1)?;
        }
        Ok(())
    }

    fn read_size(&mut self, cursor: &mut ByteCursor<'_>) -> VoxResult<()> {
        // File order is X, Z, Y.
        let x = cursor.read_i32()?;
        let z = cursor.read_i32()?;
        let y = cursor.read_i32()?;
        let extent = |v: i32| u32::try_from(v).ok().filter(|v| (1..=MAX_MODEL_EXTENT).contains(v));
        let (Some(sx), Some(sy), Some(sz)) = (extent(x), extent(y), extent(z)) else {
            return Err(VoxError::InvalidModelSize { x, y, z });
        };
        if let Some(previous) = self.pending_size.replace(GridSize::new(sx, sy, sz)) {
            debug!(?previous, "SIZE chunk replaced before its voxel data");
        }
        Ok(())
    }

    fn read_voxels(&mut self, cursor: &mut ByteCursor<'_>, header: ChunkHeader) -> VoxResult<()> {
        let Some(size) = self.pending_size.take() else {
            self.warn(DecodeWarning::ChunkOrder {
                offset: header.offset,
            });
            return Ok(());
        };

        let count = cursor.read_u32()?;
        let model = self.scene.models.len();
        let mut grid = VoxelGrid::new(size);
        let mut empty = 0usize;
        let mut out_of_bounds = 0usize;

        for _ in 0..count {
            // File order is X, Z, Y, color.
            let [x, z, y, color] = cursor.read_array4()?;
            if color == 0 {
                empty += 1;
                continue;
            }
            let pos = VoxelPos::new(i32::from(x), i32::from(y), i32::from(z));
            if !grid.insert(pos, color) {
                out_of_bounds += 1;
            }
        }

        if empty > 0 {
            self.warn(DecodeWarning::EmptyColorIndex { model, count: empty });
        }
        if out_of_bounds > 0 {
            self.warn(DecodeWarning::VoxelOutOfBounds {
                model,
                count: out_of_bounds,
            });
        }
        debug!(model, ?size, voxels = grid.voxel_count(), "model");

        self.scene.total_voxels_read += u64::from(count);
        self.scene.models.push(grid);
        Ok(())
    }

    fn read_palette(&mut self, cursor: &mut ByteCursor<'_>) -> VoxResult<()> {
        let mut records = [Rgba::TRANSPARENT; PALETTE_SIZE];
        for record in &mut records {
            let [r, g, b, a] = cursor.read_array4()?;
            *record = Rgba::new(r, g, b, a);
        }
        self.scene.palette = Palette::from_file_records(&records);
        self.scene.has_custom_palette = true;
        Ok(())
    }

    fn warn(&mut self, warning: DecodeWarning) {
        warn!("{warning}");
        self.scene.warnings.push(warning);
    }
}

fn is_known(tag: ChunkTag) -> bool {
    matches!(
        tag,
        ChunkTag::PACK
            | ChunkTag::SIZE
            | ChunkTag::XYZI
            | ChunkTag::RGBA
            | ChunkTag::MATL
            | ChunkTag::TRANSFORM
            | ChunkTag::GROUP
            | ChunkTag::SHAPE
            | ChunkTag::LAYER
            | ChunkTag::RENDER_OBJECT
            | ChunkTag::CAMERA
            | ChunkTag::NOTE
    )
}

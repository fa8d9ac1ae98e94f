//! Binary reading primitives.
//!
//! [`StreamReader`] walks chunk headers on the underlying stream and loads
//! each payload into memory in one read. Payload fields are then parsed by a
//! [`ByteCursor`] bounded by the chunk's declared content size, so a malformed
//! payload can never consume bytes that belong to the next chunk.

use std::io::{Read, Seek, SeekFrom};

use lunavox_core::AttributeDict;

use crate::chunk::{ChunkHeader, ChunkTag, CHUNK_HEADER_SIZE};
use crate::error::{VoxError, VoxResult};

// =============================================================================
// STREAM READER
// =============================================================================

/// Sequential reader over a seekable stream that tracks its own position.
pub(crate) struct StreamReader<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> StreamReader<R> {
    /// Wraps `inner`, starting at its current position.
    pub(crate) fn new(mut inner: R) -> VoxResult<Self> {
        let position = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(Self {
            inner,
            position,
            len,
        })
    }

    /// Current offset in the stream.
    #[inline]
    pub(crate) const fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left before end of stream.
    #[inline]
    pub(crate) const fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// Reads exactly `N` bytes.
    pub(crate) fn read_array<const N: usize>(&mut self) -> VoxResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| VoxError::from_read(e, self.position, N as u64))?;
        self.position += N as u64;
        Ok(buf)
    }

    /// Reads a little-endian u32.
    pub(crate) fn read_u32(&mut self) -> VoxResult<u32> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    /// Reads a 12-byte chunk header.
    pub(crate) fn read_header(&mut self) -> VoxResult<ChunkHeader> {
        let offset = self.position;
        if self.remaining() < CHUNK_HEADER_SIZE {
            return Err(VoxError::Truncated {
                offset,
                needed: CHUNK_HEADER_SIZE - self.remaining(),
            });
        }
        let tag = ChunkTag(self.read_array::<4>()?);
        let content_size = self.read_u32()?;
        let children_size = self.read_u32()?;
        Ok(ChunkHeader {
            tag,
            content_size,
            children_size,
            offset,
        })
    }

    /// Loads the payload of `header`; the reader must sit at its content start.
    pub(crate) fn read_payload(&mut self, header: &ChunkHeader) -> VoxResult<Vec<u8>> {
        let declared = u64::from(header.content_size);
        if declared > self.remaining() {
            return Err(VoxError::Truncated {
                offset: self.position,
                needed: declared - self.remaining(),
            });
        }
        let mut payload = vec![0u8; header.content_size as usize];
        self.inner
            .read_exact(&mut payload)
            .map_err(|e| VoxError::from_read(e, self.position, declared))?;
        self.position += declared;
        Ok(payload)
    }

    /// Moves to absolute `offset`, which must lie within the stream.
    pub(crate) fn seek_to(&mut self, offset: u64) -> VoxResult<()> {
        if offset > self.len {
            return Err(VoxError::Truncated {
                offset: self.len,
                needed: offset - self.len,
            });
        }
        if offset != self.position {
            self.inner.seek(SeekFrom::Start(offset))?;
            self.position = offset;
        }
        Ok(())
    }
}

// =============================================================================
// PAYLOAD CURSOR
// =============================================================================

/// Little-endian cursor over one chunk payload.
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    header: ChunkHeader,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor over the payload of `header`.
    pub(crate) fn new(data: &'a [u8], header: ChunkHeader) -> Self {
        Self {
            data,
            pos: 0,
            header,
        }
    }

    /// Unread payload bytes.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn overrun(&self) -> VoxError {
        VoxError::ChunkOverrun {
            tag: self.header.tag,
            offset: self.header.offset,
            declared: self.header.content_size,
        }
    }

    /// Takes the next `n` bytes.
    pub(crate) fn read_bytes(&mut self, n: usize) -> VoxResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.overrun());
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Takes the next 4 bytes as an array.
    pub(crate) fn read_array4(&mut self) -> VoxResult<[u8; 4]> {
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub(crate) fn read_u32(&mut self) -> VoxResult<u32> {
        self.read_array4().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32(&mut self) -> VoxResult<i32> {
        self.read_array4().map(i32::from_le_bytes)
    }

    /// Reads an i32 count or length, rejecting negative values.
    pub(crate) fn read_len(&mut self) -> VoxResult<usize> {
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| VoxError::InvalidLength {
            tag: self.header.tag,
            offset: self.header.offset,
            length,
        })
    }

    /// Capacity to reserve for `count` records of at least `min_size` bytes.
    ///
    /// Never more than the payload could actually hold.
    pub(crate) fn capacity_for(&self, count: usize, min_size: usize) -> usize {
        count.min(self.remaining() / min_size.max(1))
    }

    /// Reads a length-prefixed string, replacing invalid UTF-8.
    pub(crate) fn read_string(&mut self) -> VoxResult<String> {
        let len = self.read_len()?;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads a DICT: an i32 pair count followed by key/value strings.
    pub(crate) fn read_dict(&mut self) -> VoxResult<AttributeDict> {
        let count = self.read_len()?;
        // Each pair holds two length prefixes.
        let mut pairs = Vec::with_capacity(self.capacity_for(count, 8));
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_string()?;
            pairs.push((key, value));
        }
        Ok(AttributeDict::from_pairs(pairs))
    }
}

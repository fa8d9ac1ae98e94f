//! Mesh output buffers.

use bytemuck::{Pod, Zeroable};
use lunavox_core::MaterialClass;

use crate::face::{Face, QUAD_INDICES};

// =============================================================================
// VERTEX FORMAT
// =============================================================================

/// Interleaved vertex for hosts that upload a single vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position relative to the model center.
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
    /// Palette strip coordinate.
    pub uv: [f32; 2],
}

/// Width of the indices a batch needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexFormat {
    /// Largest vertex count addressable with 16-bit indices.
    pub const U16_MAX_VERTICES: usize = u16::MAX as usize;

    /// Format needed for `vertex_count` vertices.
    #[inline]
    #[must_use]
    pub const fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count <= Self::U16_MAX_VERTICES {
            Self::U16
        } else {
            Self::U32
        }
    }
}

// =============================================================================
// MESH BATCH
// =============================================================================

/// Triangles of one material class, with their own vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBatch {
    /// Material class of every face in the batch.
    pub material: MaterialClass,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// One normal per vertex.
    pub normals: Vec<[f32; 3]>,
    /// One texture coordinate per vertex.
    pub uvs: Vec<[f32; 2]>,
    /// Triangles indexing this batch's vertices.
    pub triangles: Vec<[u32; 3]>,
}

impl MeshBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new(material: MaterialClass) -> Self {
        Self {
            material,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Appends one quad at `origin` (already pivoted) facing `face`.
    pub fn push_quad(&mut self, origin: [f32; 3], face: Face, uv: [f32; 2]) {
        let base = self.positions.len() as u32;
        for corner in face.corners() {
            self.positions.push([
                origin[0] + corner[0],
                origin[1] + corner[1],
                origin[2] + corner[2],
            ]);
            self.normals.push(face.normal());
            self.uvs.push(uv);
        }
        for [a, b, c] in QUAD_INDICES {
            self.triangles.push([base + a, base + b, base + c]);
        }
    }

    /// Returns true if the batch holds no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get vertex count
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Quads in the batch.
    #[inline]
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.triangles.len() / 2
    }

    /// Index width the host should use for this batch.
    #[inline]
    #[must_use]
    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::for_vertex_count(self.vertex_count())
    }

    /// Flat index list.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Flat 16-bit index list, if every index fits.
    #[must_use]
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        match self.index_format() {
            IndexFormat::U16 => Some(self.indices().iter().map(|&i| i as u16).collect()),
            IndexFormat::U32 => None,
        }
    }

    /// Interleaved vertices.
    #[must_use]
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((&position, &normal), &uv)| MeshVertex {
                position,
                normal,
                uv,
            })
            .collect()
    }

    /// Raw bytes of the position buffer.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the normal buffer.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the texture coordinate buffer.
    #[must_use]
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Raw bytes of the 32-bit index buffer.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

// =============================================================================
// MODEL MESH
// =============================================================================

/// All batches of one model, in [`MaterialClass::ALL`] order, empty ones omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMesh {
    /// Non-empty batches.
    pub batches: Vec<MeshBatch>,
}

impl ModelMesh {
    /// Check if mesh is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Batch of `material`, if the model has faces of that class.
    #[must_use]
    pub fn batch(&self, material: MaterialClass) -> Option<&MeshBatch> {
        self.batches.iter().find(|b| b.material == material)
    }

    /// Material classes in slot order; one slot per batch.
    pub fn materials(&self) -> impl Iterator<Item = MaterialClass> + '_ {
        self.batches.iter().map(|b| b.material)
    }

    /// Vertices across all batches.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(MeshBatch::vertex_count).sum()
    }

    /// Triangles across all batches.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.batches.iter().map(MeshBatch::triangle_count).sum()
    }
}

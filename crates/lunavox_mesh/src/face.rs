//! The six voxel faces.

use lunavox_core::VoxelPos;

/// Index pattern of a quad's two triangles, relative to its first vertex.
///
/// Corners are listed so that both triangles wind counter-clockwise when
/// seen from outside the voxel.
pub const QUAD_INDICES: [[u32; 3]; 2] = [[0, 1, 2], [3, 2, 1]];

/// One face of a unit voxel cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// -Y.
    Bottom = 0,
    /// +Y.
    Top = 1,
    /// +X.
    Right = 2,
    /// -X.
    Left = 3,
    /// +Z.
    Forward = 4,
    /// -Z.
    Back = 5,
}

impl Face {
    /// All faces in emission order.
    pub const ALL: [Self; 6] = [
        Self::Bottom,
        Self::Top,
        Self::Right,
        Self::Left,
        Self::Forward,
        Self::Back,
    ];

    /// Step to the cell this face looks at.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> VoxelPos {
        match self {
            Self::Bottom => VoxelPos::DOWN,
            Self::Top => VoxelPos::UP,
            Self::Right => VoxelPos::RIGHT,
            Self::Left => VoxelPos::LEFT,
            Self::Forward => VoxelPos::FORWARD,
            Self::Back => VoxelPos::BACK,
        }
    }

    /// Outward unit normal.
    #[inline]
    #[must_use]
    pub const fn normal(self) -> [f32; 3] {
        match self {
            Self::Bottom => [0.0, -1.0, 0.0],
            Self::Top => [0.0, 1.0, 0.0],
            Self::Right => [1.0, 0.0, 0.0],
            Self::Left => [-1.0, 0.0, 0.0],
            Self::Forward => [0.0, 0.0, 1.0],
            Self::Back => [0.0, 0.0, -1.0],
        }
    }

    /// Quad corners relative to the voxel's minimum corner.
    #[must_use]
    pub const fn corners(self) -> [[f32; 3]; 4] {
        match self {
            Self::Bottom => [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]],
            Self::Top => [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            Self::Right => [[1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0]],
            Self::Left => [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0]],
            Self::Forward => [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
            Self::Back => [[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        }
    }
}

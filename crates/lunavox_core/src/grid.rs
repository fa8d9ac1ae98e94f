//! Voxel grid model.
//!
//! One grid per decoded model. Storage is a dense byte array sized to the
//! declared extent (at most 256 per axis, so 16 MiB worst case), giving O(1)
//! point lookups for the mesher and the neighbor queries. Index 0 means empty
//! and is never counted as a voxel.
//!
//! Axes are Y-up: `x` right, `y` up, `z` forward. The file's X,Z,Y order is
//! permuted by the decoder before anything reaches this module.

use std::collections::{HashSet, VecDeque};
use std::ops::Add;

use crate::palette::{Palette, Rgba};

/// Largest extent accepted on any axis.
///
/// Voxel coordinates are stored as bytes in the file, so nothing past 256 can
/// ever be filled.
pub const MAX_MODEL_EXTENT: u32 = 256;

/// Integer extents of a grid. All axes are > 0 for decoded grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Extent along X.
    pub x: u32,
    /// Extent along Y (up).
    pub y: u32,
    /// Extent along Z.
    pub z: u32,
}

impl GridSize {
    /// Creates a new size.
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Returns true if `pos` lies in `[0, size)` on every axis.
    #[inline]
    #[must_use]
    pub fn contains(self, pos: VoxelPos) -> bool {
        (0..self.x as i64).contains(&i64::from(pos.x))
            && (0..self.y as i64).contains(&i64::from(pos.y))
            && (0..self.z as i64).contains(&i64::from(pos.z))
    }

    /// Geometric center, `size / 2` per axis.
    #[inline]
    #[must_use]
    pub fn center(self) -> [f32; 3] {
        [self.x as f32 / 2.0, self.y as f32 / 2.0, self.z as f32 / 2.0]
    }
}

/// Signed cell position. Queries accept positions outside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelPos {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate (up).
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl VoxelPos {
    /// +X.
    pub const RIGHT: Self = Self::new(1, 0, 0);
    /// -X.
    pub const LEFT: Self = Self::new(-1, 0, 0);
    /// +Y.
    pub const UP: Self = Self::new(0, 1, 0);
    /// -Y.
    pub const DOWN: Self = Self::new(0, -1, 0);
    /// +Z.
    pub const FORWARD: Self = Self::new(0, 0, 1);
    /// -Z.
    pub const BACK: Self = Self::new(0, 0, -1);

    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for VoxelPos {
    type Output = Self;

    /// Wraps on overflow; file translations are unchecked 32-bit values.
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

/// The six face neighbors, in query order.
const FACE_NEIGHBORS: [VoxelPos; 6] = [
    VoxelPos::RIGHT,
    VoxelPos::LEFT,
    VoxelPos::FORWARD,
    VoxelPos::BACK,
    VoxelPos::UP,
    VoxelPos::DOWN,
];

/// The four horizontal steps a walker can take.
const WALK_STEPS: [VoxelPos; 4] = [
    VoxelPos::RIGHT,
    VoxelPos::LEFT,
    VoxelPos::FORWARD,
    VoxelPos::BACK,
];

/// Free cells a walker needs above the cell it stands on.
const HEADROOM: i32 = 2;

/// A stored voxel: position plus palette index (never 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Voxel {
    /// Cell position inside the grid.
    pub pos: VoxelPos,
    /// Palette index, 1..=255.
    pub color: u8,
}

impl Voxel {
    /// Creates a voxel.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32, color: u8) -> Self {
        Self { pos: VoxelPos::new(x, y, z), color }
    }
}

/// One decoded model: declared size plus the palette index of every cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Declared extents.
    size: GridSize,
    /// Dense cells, `x + y * sx + z * sx * sy`.
    cells: Box<[u8]>,
    /// Number of non-empty cells.
    voxel_count: usize,
}

impl VoxelGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![0; size.volume()].into_boxed_slice(),
            voxel_count: 0,
        }
    }

    /// Builds a grid from a voxel list.
    ///
    /// Voxels outside the grid or with color 0 are ignored; a repeated
    /// position keeps the last color.
    #[must_use]
    pub fn from_voxels<I: IntoIterator<Item = Voxel>>(size: GridSize, voxels: I) -> Self {
        let mut grid = Self::new(size);
        for voxel in voxels {
            grid.insert(voxel.pos, voxel.color);
        }
        grid
    }

    #[inline]
    fn index_of(&self, pos: VoxelPos) -> Option<usize> {
        if !self.size.contains(pos) {
            return None;
        }
        let (x, y, z) = (pos.x as usize, pos.y as usize, pos.z as usize);
        let (sx, sy) = (self.size.x as usize, self.size.y as usize);
        Some(x + y * sx + z * sx * sy)
    }

    /// Writes `color` at `pos`. Color 0 clears the cell.
    ///
    /// Returns false if `pos` is outside the grid.
    pub fn insert(&mut self, pos: VoxelPos, color: u8) -> bool {
        let Some(idx) = self.index_of(pos) else {
            return false;
        };
        let old = self.cells[idx];
        if old == 0 && color != 0 {
            self.voxel_count += 1;
        } else if old != 0 && color == 0 {
            self.voxel_count -= 1;
        }
        self.cells[idx] = color;
        true
    }

    /// Declared size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of stored voxels.
    #[inline]
    #[must_use]
    pub const fn voxel_count(&self) -> usize {
        self.voxel_count
    }

    /// Returns true if no cell is filled.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.voxel_count == 0
    }

    /// Palette index at `pos`; 0 for empty cells and anything outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: VoxelPos) -> u8 {
        self.index_of(pos).map_or(0, |idx| self.cells[idx])
    }

    /// Returns true if `pos` holds a voxel.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, pos: VoxelPos) -> bool {
        self.get(pos) != 0
    }

    /// Color of the voxel at `pos`; transparent when empty.
    #[must_use]
    pub fn color_at(&self, pos: VoxelPos, palette: &Palette) -> Rgba {
        palette.get(self.get(pos))
    }

    /// Dense cell array, `x + y * sx + z * sx * sy`.
    #[inline]
    #[must_use]
    pub fn to_dense(&self) -> &[u8] {
        &self.cells
    }

    /// Iterates stored voxels in X, then Y, then Z order.
    pub fn voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        let size = self.size;
        (0..size.x as i32).flat_map(move |x| {
            (0..size.y as i32).flat_map(move |y| {
                (0..size.z as i32).filter_map(move |z| {
                    let color = self.get(VoxelPos::new(x, y, z));
                    (color != 0).then_some(Voxel::new(x, y, z, color))
                })
            })
        })
    }

    // =========================================================================
    // ADJACENCY QUERIES
    // =========================================================================

    /// Distinct colors of occupied cells within `range` face steps of `pos`.
    ///
    /// Each step moves to an occupied face neighbor, so colors are collected
    /// along paths of solid voxels. `range` 0 behaves like 1. The origin's own
    /// color shows up when a path of length >= 2 leads back to it.
    ///
    /// Breadth-first with a visited set: every cell is expanded once, at the
    /// shortest distance it is reached by, which yields the same set as
    /// exhaustive path enumeration without its 6^range blowup.
    #[must_use]
    pub fn neighbors_of(&self, pos: VoxelPos, range: u8) -> Vec<u8> {
        let range = range.max(1);
        let mut colors = Vec::new();
        let mut seen_color = [false; 256];
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(pos, 0u8)]);

        while let Some((cell, depth)) = queue.pop_front() {
            for step in FACE_NEIGHBORS {
                let next = cell + step;
                let color = self.get(next);
                if color == 0 || !visited.insert(next) {
                    continue;
                }
                if !seen_color[usize::from(color)] {
                    seen_color[usize::from(color)] = true;
                    colors.push(color);
                }
                if depth + 1 < range {
                    queue.push_back((next, depth + 1));
                }
            }
        }
        colors
    }

    /// First standable cell in column `(x, z)` relative to the height of `from`.
    ///
    /// Scans vertical offsets `-fall_step..=up_step` bottom-up; a cell is
    /// standable when it is solid and the two cells above it are empty.
    #[must_use]
    pub fn standable_in_column(
        &self,
        from: VoxelPos,
        x: i32,
        z: i32,
        up_step: u8,
        fall_step: u8,
    ) -> Option<VoxelPos> {
        (-i32::from(fall_step)..=i32::from(up_step))
            .map(|dy| VoxelPos::new(x, from.y.wrapping_add(dy), z))
            .find(|&cell| {
                self.is_solid(cell)
                    && (1..=HEADROOM).all(|h| !self.is_solid(cell + VoxelPos::new(0, h, 0)))
            })
    }

    /// Cells a walker standing on `pos` can reach within `range` horizontal steps.
    ///
    /// Each step goes to one of the four horizontal neighbor columns and lands
    /// on the first standable cell there, climbing at most `up_step` and
    /// dropping at most `fall_step`, both measured from the origin's height.
    /// The walk continues from the neighbor column at that height, not from
    /// the landing cell, and only through columns that had a landing cell.
    /// The origin is never part of the result.
    #[must_use]
    pub fn reachable_neighbors_of(
        &self,
        pos: VoxelPos,
        range: u8,
        up_step: u8,
        fall_step: u8,
    ) -> Vec<VoxelPos> {
        let range = range.max(1);
        let mut tiles = Vec::new();
        let mut found = HashSet::new();
        let mut visited = HashSet::from([pos]);
        let mut queue = VecDeque::from([(pos, 0u8)]);

        while let Some((cell, depth)) = queue.pop_front() {
            for step in WALK_STEPS {
                let column = cell + step;
                let Some(tile) =
                    self.standable_in_column(cell, column.x, column.z, up_step, fall_step)
                else {
                    continue;
                };
                if tile != pos && found.insert(tile) {
                    tiles.push(tile);
                }
                if depth + 1 < range && visited.insert(column) {
                    queue.push_back((column, depth + 1));
                }
            }
        }
        tiles
    }
}

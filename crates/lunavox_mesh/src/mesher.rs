//! Face-culling mesher.
//!
//! Every solid voxel emits one quad per face whose neighbor cell is empty or
//! outside the grid. No faces are merged. All four corners of a quad sample
//! the same palette texel, so colors are flat per voxel.

use lunavox_core::{MaterialClass, Palette, VoxelGrid};
use tracing::trace;

use crate::batch::{MeshBatch, ModelMesh};
use crate::face::Face;

/// Meshes `grid`, routing each voxel's faces to the batch of `material_of(color)`.
///
/// Positions are relative to the grid center, so a model of any size is
/// centered on the origin.
#[must_use]
pub fn build_mesh<F>(grid: &VoxelGrid, material_of: F) -> ModelMesh
where
    F: Fn(u8) -> MaterialClass,
{
    // Float halves: odd extents put the pivot on a half cell instead of
    // rounding it down to a whole one.
    let pivot = grid.size().center();
    let mut batches = MaterialClass::ALL.map(MeshBatch::new);

    for voxel in grid.voxels() {
        let pos = voxel.pos;
        let origin = [
            pos.x as f32 - pivot[0],
            pos.y as f32 - pivot[1],
            pos.z as f32 - pivot[2],
        ];
        let uv = Palette::texcoord(voxel.color);
        let batch = &mut batches[material_of(voxel.color).index()];

        for face in Face::ALL {
            // Cells outside the grid read as empty.
            if !grid.is_solid(pos + face.offset()) {
                batch.push_quad(origin, face, uv);
            }
        }
    }

    let mesh = ModelMesh {
        batches: batches.into_iter().filter(|b| !b.is_empty()).collect(),
    };
    trace!(
        size = ?grid.size(),
        batches = mesh.batches.len(),
        triangles = mesh.triangle_count(),
        "meshed model"
    );
    mesh
}

#[cfg(test)]
mod tests {
    use lunavox_core::{GridSize, Voxel, VoxelPos};

    use super::*;

    fn diffuse(_: u8) -> MaterialClass {
        MaterialClass::Diffuse
    }

    #[test]
    fn test_isolated_voxel() {
        let grid = VoxelGrid::from_voxels(GridSize::new(3, 3, 3), [Voxel::new(1, 1, 1, 7)]);
        let mesh = build_mesh(&grid, diffuse);

        assert_eq!(mesh.batches.len(), 1);
        let batch = &mesh.batches[0];
        assert_eq!(batch.quad_count(), 6);
        assert_eq!(batch.triangle_count(), 12);
        assert_eq!(batch.vertex_count(), 24);
        assert_eq!(batch.normals.len(), batch.positions.len());
        assert_eq!(batch.uvs.len(), batch.positions.len());
    }

    #[test]
    fn test_shared_face_is_culled() {
        let grid = VoxelGrid::from_voxels(
            GridSize::new(4, 4, 4),
            [Voxel::new(1, 1, 1, 3), Voxel::new(2, 1, 1, 3)],
        );
        let batch = &build_mesh(&grid, diffuse).batches[0];
        assert_eq!(batch.quad_count(), 10);

        // No quad lies in the shared plane x = 2 (pivoted: x = 0).
        let shared = batch
            .positions
            .chunks(4)
            .filter(|quad| quad.iter().all(|p| p[0] == 0.0))
            .count();
        assert_eq!(shared, 0);
    }

    #[test]
    fn test_faces_on_grid_boundary() {
        // A full 2x1x1 grid: every outer face touches the boundary.
        let grid = VoxelGrid::from_voxels(
            GridSize::new(2, 1, 1),
            [Voxel::new(0, 0, 0, 1), Voxel::new(1, 0, 0, 1)],
        );
        assert_eq!(build_mesh(&grid, diffuse).batches[0].quad_count(), 10);
    }

    #[test]
    fn test_positions_are_centered() {
        let grid = VoxelGrid::from_voxels(GridSize::new(2, 2, 2), [Voxel::new(0, 0, 0, 1)]);
        let batch = &build_mesh(&grid, diffuse).batches[0];
        for p in &batch.positions {
            assert!(p.iter().all(|v| (-1.0..=0.0).contains(v)), "{p:?}");
        }

        // Odd extents pivot on half cells.
        let grid = VoxelGrid::from_voxels(GridSize::new(3, 1, 1), [Voxel::new(2, 0, 0, 1)]);
        let batch = &build_mesh(&grid, diffuse).batches[0];
        let max_x = batch.positions.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
        assert!((max_x - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_uvs_sample_color_texel() {
        let grid = VoxelGrid::from_voxels(GridSize::new(1, 1, 1), [Voxel::new(0, 0, 0, 127)]);
        let batch = &build_mesh(&grid, diffuse).batches[0];
        assert!(batch.uvs.iter().all(|uv| *uv == [127.5 / 256.0, 0.5]));
    }

    #[test]
    fn test_materials_split_batches() {
        let grid = VoxelGrid::from_voxels(
            GridSize::new(8, 1, 1),
            [Voxel::new(0, 0, 0, 1), Voxel::new(3, 0, 0, 2), Voxel::new(6, 0, 0, 3)],
        );
        let mesh = build_mesh(&grid, |c| match c {
            1 => MaterialClass::Emit,
            2 => MaterialClass::Diffuse,
            _ => MaterialClass::Glass,
        });

        let order: Vec<_> = mesh.materials().collect();
        assert_eq!(
            order,
            [MaterialClass::Diffuse, MaterialClass::Glass, MaterialClass::Emit]
        );
        assert!(mesh.batch(MaterialClass::Metal).is_none());
        assert!(mesh.batches.iter().all(|b| b.quad_count() == 6));
        // Every batch indexes its own vertex list from 0.
        assert!(mesh.batches.iter().all(|b| b.indices()[0] == 0));
    }

    #[test]
    fn test_empty_grid() {
        let grid = VoxelGrid::new(GridSize::new(4, 4, 4));
        let mesh = build_mesh(&grid, diffuse);
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_large_grid_interior_is_hidden() {
        let size = GridSize::new(16, 16, 16);
        let voxels = (0..16).flat_map(|x| {
            (0..16).flat_map(move |y| (0..16).map(move |z| Voxel::new(x, y, z, 9)))
        });
        let grid = VoxelGrid::from_voxels(size, voxels);
        let mesh = build_mesh(&grid, diffuse);
        assert_eq!(mesh.batches[0].quad_count(), 6 * 16 * 16);
        assert!(grid.is_solid(VoxelPos::new(15, 15, 15)));
    }
}

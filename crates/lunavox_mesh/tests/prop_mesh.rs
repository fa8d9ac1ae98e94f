//! Property tests for mesh invariants.

use lunavox_core::{GridSize, MaterialClass, Voxel, VoxelGrid, VoxelPos};
use lunavox_mesh::{build_mesh, Face};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = VoxelGrid> {
    (1u32..10, 1u32..10, 1u32..10).prop_flat_map(|(sx, sy, sz)| {
        let voxel = (0..sx as i32, 0..sy as i32, 0..sz as i32, 1u8..=255)
            .prop_map(|(x, y, z, c)| Voxel::new(x, y, z, c));
        prop::collection::vec(voxel, 0..80)
            .prop_map(move |voxels| VoxelGrid::from_voxels(GridSize::new(sx, sy, sz), voxels))
    })
}

fn material_of(color: u8) -> MaterialClass {
    MaterialClass::ALL[usize::from(color) % 4]
}

proptest! {
    #[test]
    fn prop_quads_match_exposed_faces(grid in arb_grid()) {
        let exposed: usize = grid
            .voxels()
            .map(|v| {
                Face::ALL
                    .iter()
                    .filter(|f| !grid.is_solid(v.pos + f.offset()))
                    .count()
            })
            .sum();
        let mesh = build_mesh(&grid, material_of);
        let quads: usize = mesh.batches.iter().map(|b| b.quad_count()).sum();
        prop_assert_eq!(quads, exposed);
    }

    #[test]
    fn prop_batches_are_well_formed(grid in arb_grid()) {
        let mesh = build_mesh(&grid, material_of);
        prop_assert!(mesh.batches.len() <= 4);

        let mut previous = None;
        for batch in &mesh.batches {
            prop_assert!(!batch.is_empty());
            prop_assert_eq!(batch.normals.len(), batch.vertex_count());
            prop_assert_eq!(batch.uvs.len(), batch.vertex_count());
            let count = batch.vertex_count() as u32;
            prop_assert!(batch.indices().iter().all(|&i| i < count));

            // Batches come in class order.
            prop_assert!(previous < Some(batch.material));
            previous = Some(batch.material);
        }
    }

    #[test]
    fn prop_geometry_stays_in_centered_bounds(grid in arb_grid()) {
        let size = grid.size();
        let half = size.center();
        let mesh = build_mesh(&grid, material_of);
        for batch in &mesh.batches {
            for p in &batch.positions {
                for axis in 0..3 {
                    prop_assert!(p[axis] >= -half[axis] && p[axis] <= half[axis]);
                }
            }
        }
        prop_assert!(!grid.is_solid(VoxelPos::new(-1, 0, 0)));
    }
}

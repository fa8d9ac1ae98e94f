//! Property tests for the voxel grid model.

use std::collections::HashMap;

use lunavox_core::{GridSize, Voxel, VoxelGrid, VoxelPos};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = (GridSize, Vec<Voxel>)> {
    (1u32..12, 1u32..12, 1u32..12).prop_flat_map(|(sx, sy, sz)| {
        let voxel = (0..sx as i32, 0..sy as i32, 0..sz as i32, 1u8..=255)
            .prop_map(|(x, y, z, c)| Voxel::new(x, y, z, c));
        (Just(GridSize::new(sx, sy, sz)), prop::collection::vec(voxel, 0..64))
    })
}

proptest! {
    #[test]
    fn prop_lookup_round_trip((size, voxels) in arb_grid()) {
        let grid = VoxelGrid::from_voxels(size, voxels.iter().copied());

        // Last write wins for repeated positions.
        let expected: HashMap<VoxelPos, u8> = voxels.iter().map(|v| (v.pos, v.color)).collect();
        prop_assert_eq!(grid.voxel_count(), expected.len());

        for x in 0..size.x as i32 {
            for y in 0..size.y as i32 {
                for z in 0..size.z as i32 {
                    let pos = VoxelPos::new(x, y, z);
                    prop_assert_eq!(grid.get(pos), expected.get(&pos).copied().unwrap_or(0));
                }
            }
        }
    }

    #[test]
    fn prop_voxels_never_store_zero((size, voxels) in arb_grid()) {
        let grid = VoxelGrid::from_voxels(size, voxels);
        prop_assert!(grid.voxels().all(|v| v.color != 0));
        prop_assert_eq!(grid.voxels().count(), grid.voxel_count());
    }

    #[test]
    fn prop_range_one_is_direct_neighbors(
        (size, voxels) in arb_grid(),
        px in 0i32..12, py in 0i32..12, pz in 0i32..12,
    ) {
        let grid = VoxelGrid::from_voxels(size, voxels);
        let origin = VoxelPos::new(px, py, pz);

        let mut direct: Vec<u8> = [
            VoxelPos::RIGHT, VoxelPos::LEFT, VoxelPos::UP,
            VoxelPos::DOWN, VoxelPos::FORWARD, VoxelPos::BACK,
        ]
        .iter()
        .map(|&d| grid.get(origin + d))
        .filter(|&c| c != 0)
        .collect();
        direct.sort_unstable();
        direct.dedup();

        let mut found = grid.neighbors_of(origin, 1);
        found.sort_unstable();
        prop_assert_eq!(found, direct);
    }

    #[test]
    fn prop_wider_range_is_superset(
        (size, voxels) in arb_grid(),
        px in 0i32..12, py in 0i32..12, pz in 0i32..12,
    ) {
        let grid = VoxelGrid::from_voxels(size, voxels);
        let origin = VoxelPos::new(px, py, pz);
        let near = grid.neighbors_of(origin, 1);
        let far = grid.neighbors_of(origin, 2);
        prop_assert!(near.iter().all(|c| far.contains(c)));
    }

    #[test]
    fn prop_reachable_excludes_origin(
        (size, voxels) in arb_grid(),
        px in 0i32..12, py in 0i32..12, pz in 0i32..12,
        range in 1u8..4,
    ) {
        let grid = VoxelGrid::from_voxels(size, voxels);
        let origin = VoxelPos::new(px, py, pz);
        let reach = grid.reachable_neighbors_of(origin, range, 1, 2);
        prop_assert!(!reach.contains(&origin));
        prop_assert!(reach.iter().all(|&p| grid.is_solid(p)));
    }
}

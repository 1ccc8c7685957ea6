//! A grid is one allocation, released exactly once when dropped.
//!
//! Runs under a counting global allocator. Counters are per-thread, so each
//! test only observes its own allocations.

use slabgrid::{Grid2d, Grid3d, GridError};
use slabgrid_test_utils::fixtures::{fill_pattern_2d, fill_pattern_3d};
use slabgrid_test_utils::{thread_stats, TrackingAllocator};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[test]
fn grid2d_is_a_single_allocation() {
    let before = thread_stats();
    let mut grid = Grid2d::allocate(4, 5, 8).unwrap();
    fill_pattern_2d(&mut grid);

    let held = thread_stats().since(before);
    assert_eq!(held.allocations, 1);
    assert_eq!(held.deallocations, 0);
    assert_eq!(held.live_bytes, grid.memory_bytes() as isize);

    drop(grid);
    let after = thread_stats().since(before);
    assert_eq!(after.allocations, 1);
    assert_eq!(after.deallocations, 1);
    assert_eq!(after.live_bytes, 0);
}

#[test]
fn grid3d_is_a_single_allocation() {
    let before = thread_stats();
    let mut grid = Grid3d::allocate(2, 3, 4, 4).unwrap();
    fill_pattern_3d(&mut grid);

    let held = thread_stats().since(before);
    assert_eq!(held.allocations, 1);
    assert_eq!(held.live_bytes, grid.memory_bytes() as isize);

    drop(grid);
    let after = thread_stats().since(before);
    assert_eq!(after.deallocations, 1);
    assert_eq!(after.live_bytes, 0);
}

#[test]
fn views_do_not_allocate() {
    let mut grid = Grid3d::allocate(3, 3, 3, 2).unwrap();
    let before = thread_stats();
    grid.layer_mut(2).row_mut(1).write(0, 9u16);
    let mut sum = 0u32;
    for layer in grid.iter_layers() {
        for row in layer.rows() {
            sum += u32::from(row.read::<u16>(0));
        }
    }
    assert_eq!(sum, 9);
    assert_eq!(thread_stats().since(before).allocations, 0);
}

#[test]
fn empty_grids_release_cleanly() {
    let before = thread_stats();
    let a = Grid2d::allocate(0, 10, 4).unwrap();
    let b = Grid3d::allocate(5, 0, 0, 0).unwrap();
    assert_eq!(a.memory_bytes(), 0);
    drop(a);
    drop(b);
    let after = thread_stats().since(before);
    // 3D with zero rows still holds a five-word layer table.
    assert_eq!(after.allocations, 1);
    assert_eq!(after.deallocations, 1);
    assert_eq!(after.live_bytes, 0);
}

#[test]
fn overflow_never_reaches_the_allocator() {
    let before = thread_stats();
    let err = Grid2d::allocate(usize::MAX / 2, 3, 1).unwrap_err();
    assert!(matches!(err, GridError::SizeOverflow { .. }));
    let err = Grid3d::allocate(usize::MAX / 2, 2, 2, 2).unwrap_err();
    assert!(matches!(err, GridError::SizeOverflow { .. }));
    let delta = thread_stats().since(before);
    assert_eq!(delta.allocations, 0);
    assert_eq!(delta.live_bytes, 0);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn failed_allocation_leaks_nothing() {
    let before = thread_stats();
    let err = Grid2d::allocate(1, 1 << 60, 2).unwrap_err();
    assert!(matches!(err, GridError::AllocationFailed { .. }));
    let delta = thread_stats().since(before);
    assert_eq!(delta.allocations, 0);
    assert_eq!(delta.live_bytes, 0);
}

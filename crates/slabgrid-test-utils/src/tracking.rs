//! Allocation-counting global allocator.
//!
//! Install in a test binary with:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: TrackingAllocator = TrackingAllocator;
//! ```
//!
//! Counters are thread-local, so parallel tests in the same binary do not
//! see each other's allocations. Memory freed on a different thread than
//! it was allocated on is attributed to the freeing thread.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::thread::LocalKey;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static DEALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

/// Snapshot of the current thread's allocation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Successful `alloc`/`alloc_zeroed` calls.
    pub allocations: usize,
    /// `dealloc` calls.
    pub deallocations: usize,
    /// Bytes allocated minus bytes freed (reallocation adjusts in place).
    pub live_bytes: isize,
}

impl AllocStats {
    /// Counter deltas between `earlier` and `self`.
    pub fn since(self, earlier: AllocStats) -> AllocStats {
        AllocStats {
            allocations: self.allocations.wrapping_sub(earlier.allocations),
            deallocations: self.deallocations.wrapping_sub(earlier.deallocations),
            live_bytes: self.live_bytes - earlier.live_bytes,
        }
    }
}

/// Read the calling thread's counters.
pub fn thread_stats() -> AllocStats {
    AllocStats {
        allocations: ALLOCATIONS.try_with(Cell::get).unwrap_or(0),
        deallocations: DEALLOCATIONS.try_with(Cell::get).unwrap_or(0),
        live_bytes: LIVE_BYTES.try_with(Cell::get).unwrap_or(0),
    }
}

fn bump(counter: &'static LocalKey<Cell<usize>>) {
    // try_with: the allocator can run during thread teardown.
    let _ = counter.try_with(|c| c.set(c.get().wrapping_add(1)));
}

fn adjust_live(delta: isize) {
    let _ = LIVE_BYTES.try_with(|c| c.set(c.get() + delta));
}

/// [`System`] wrapper that records every allocation on the calling thread.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded unchanged; the caller upholds `alloc`'s contract.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            bump(&ALLOCATIONS);
            adjust_live(layout.size() as isize);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded unchanged; the caller upholds `alloc_zeroed`'s contract.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            bump(&ALLOCATIONS);
            adjust_live(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` came from this allocator, which always delegates to `System`.
        unsafe { System.dealloc(ptr, layout) };
        bump(&DEALLOCATIONS);
        adjust_live(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: `ptr` came from `System` via this allocator; the caller
        // upholds `realloc`'s contract for `layout` and `new_size`.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            adjust_live(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_subtracts_fieldwise() {
        let earlier = AllocStats {
            allocations: 2,
            deallocations: 1,
            live_bytes: 64,
        };
        let later = AllocStats {
            allocations: 5,
            deallocations: 4,
            live_bytes: 32,
        };
        assert_eq!(
            later.since(earlier),
            AllocStats {
                allocations: 3,
                deallocations: 3,
                live_bytes: -32,
            }
        );
    }
}

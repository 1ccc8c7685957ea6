//! Test utilities for slabgrid development.
//!
//! Provides a [`TrackingAllocator`] that counts allocations per thread, for
//! asserting that a grid is exactly one allocation released exactly once,
//! and [`fixtures`] that fill grids with position-dependent byte patterns.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod tracking;
pub mod fixtures;

pub use tracking::{thread_stats, AllocStats, TrackingAllocator};

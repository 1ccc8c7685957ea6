//! Contiguous single-block allocation for 2D and 3D grids.
//!
//! A grid is one zero-initialised heap allocation holding both the lookup
//! tables needed for nested indexing and the element payload. Dropping the
//! grid releases everything with a single deallocation.
//!
//! # Layout
//!
//! ```text
//! Grid2d: [ row table (rows words) | payload (rows * cols * element_size) ]
//! Grid3d: [ layer table (layers words)
//!         | row table (layers * rows words, layer-major)
//!         | payload (layers * rows * cols * element_size) ]
//! ```
//!
//! Table entries are `usize` byte offsets from the start of the block, so a
//! grid can be moved freely without invalidating its header. Every nested
//! access reads through the tables: `grid.row(r)[c]` resolves the row-table
//! word for `r`, then steps `c` elements from it; `grid.layer(l).row(r)[c]`
//! first resolves the layer-table word for `l`.
//!
//! # Failure
//!
//! Allocation never panics. A block size that cannot be represented is
//! reported as [`GridError::SizeOverflow`] before the allocator is called;
//! an allocator refusal is [`GridError::AllocationFailed`].
//!
//! ```
//! use slabgrid::Grid2d;
//!
//! let mut grid = Grid2d::allocate(2, 3, 4).unwrap();
//! grid.write(1, 2, 0xAABB_CCDDu32);
//! assert_eq!(grid.read::<u32>(1, 2), 0xAABB_CCDD);
//! assert_eq!(grid.row(0)[0], [0u8; 4]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod block;
pub mod element;
pub mod error;
pub mod grid2d;
pub mod grid3d;
pub mod shape;
pub mod view;

// Public re-exports for the primary API surface.
pub use block::Block;
pub use element::Element;
pub use error::GridError;
pub use grid2d::{alloc_2d, Grid2d};
pub use grid3d::{alloc_3d, Grid3d};
pub use shape::{BlockLayout, Shape2d, Shape3d, WORD_SIZE};
pub use view::{Layer, LayerMut, Row, RowMut};

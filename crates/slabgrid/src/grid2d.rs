//! Two-dimensional grids in a single block.
//!
//! ```text
//! offset 0                rows * WORD_SIZE
//! ├── row table ─────────┼── payload ─────────────────────────┤
//! │ r0 │ r1 │ ... │ rN-1 │ row 0 │ row 1 │ ... │ row N-1      │
//!   │    │                 ▲       ▲
//!   └────┼─────────────────┘       │
//!        └─────────────────────────┘
//! ```
//!
//! Each row-table word holds the byte offset of its row within the same
//! block. Element `(r, c)` is reached by reading word `r` and stepping
//! `c * element_size` bytes from there.

use std::ops::{Index, IndexMut};

use crate::block::Block;
use crate::element::{check_size, Element};
use crate::error::GridError;
use crate::shape::{BlockLayout, Shape2d, WORD_SIZE};
use crate::view::{Row, RowMut};

/// A `rows × cols` grid of `element_size`-byte cells, header and payload
/// in one zero-initialised allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid2d {
    block: Block,
    shape: Shape2d,
    layout: BlockLayout,
}

impl Grid2d {
    /// Allocate a zeroed `rows × cols` grid.
    ///
    /// Zero dimensions are accepted and produce an empty (but valid) grid.
    /// Returns [`GridError::SizeOverflow`] if the block size is not
    /// representable, or [`GridError::AllocationFailed`] if the allocator
    /// refuses the request.
    pub fn allocate(rows: usize, cols: usize, element_size: usize) -> Result<Self, GridError> {
        Self::with_shape(Shape2d::new(rows, cols, element_size))
    }

    /// Allocate a zeroed grid for an existing [`Shape2d`].
    pub fn with_shape(shape: Shape2d) -> Result<Self, GridError> {
        let layout = shape.layout().inspect_err(|err| {
            log::debug!("rejecting 2d grid {shape:?}: {err}");
        })?;
        let mut block = Block::zeroed(layout.len)?;

        let row_stride = if shape.rows == 0 {
            0
        } else {
            // Bounded by payload_bytes, which is known to fit.
            shape.cols * shape.element_size
        };
        for row in 0..shape.rows {
            block.write_word(
                layout.row_table + row * WORD_SIZE,
                layout.payload_start + row * row_stride,
            );
        }

        log::trace!("allocated 2d grid {shape:?} as {layout:?}");
        Ok(Self {
            block,
            shape,
            layout,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns per row.
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.shape.element_size
    }

    /// The shape this grid was allocated with.
    pub fn shape(&self) -> Shape2d {
        self.shape
    }

    /// The region layout of the backing block.
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Byte offset of the payload within the block.
    pub fn payload_offset(&self) -> usize {
        self.layout.payload_start
    }

    /// Row-table entry `row`: the block offset where that row's payload starts.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row_offset(&self, row: usize) -> usize {
        assert!(
            row < self.shape.rows,
            "row {row} out of range for grid of {} rows",
            self.shape.rows
        );
        self.block.read_word(self.layout.row_table + row * WORD_SIZE)
    }

    /// Shared view of row `row`, or `None` if out of range.
    pub fn get_row(&self, row: usize) -> Option<Row<'_>> {
        if row >= self.shape.rows {
            return None;
        }
        let start = self.row_offset(row);
        let bytes = self.block.bytes(start, self.row_bytes());
        Some(Row::new(bytes, self.shape.element_size, self.shape.cols))
    }

    /// Mutable view of row `row`, or `None` if out of range.
    pub fn get_row_mut(&mut self, row: usize) -> Option<RowMut<'_>> {
        if row >= self.shape.rows {
            return None;
        }
        let start = self.row_offset(row);
        let len = self.row_bytes();
        let bytes = self.block.bytes_mut(start, len);
        Some(RowMut::new(bytes, self.shape.element_size, self.shape.cols))
    }

    /// Shared view of row `row`; `grid.row(r)[c]` is element `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row(&self, row: usize) -> Row<'_> {
        match self.get_row(row) {
            Some(r) => r,
            None => panic!(
                "row {row} out of range for grid of {} rows",
                self.shape.rows
            ),
        }
    }

    /// Mutable view of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row_mut(&mut self, row: usize) -> RowMut<'_> {
        let rows = self.shape.rows;
        match self.get_row_mut(row) {
            Some(r) => r,
            None => panic!("row {row} out of range for grid of {rows} rows"),
        }
    }

    /// Iterate over all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.shape.rows).map(move |r| self.row(r))
    }

    /// Bytes of element `(row, col)`, or `None` if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&[u8]> {
        self.get_row(row)?.get(col)
    }

    /// Mutable bytes of element `(row, col)`, or `None` if out of range.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut [u8]> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        let start = self.row_offset(row) + col * self.shape.element_size;
        Some(self.block.bytes_mut(start, self.shape.element_size))
    }

    /// Decode element `(row, col)` as a `T`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or `T` is not `element_size` bytes.
    pub fn read<T: Element>(&self, row: usize, col: usize) -> T {
        check_size::<T>(self.shape.element_size);
        T::from_ne_slice(&self[(row, col)])
    }

    /// Encode `value` into element `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or `T` is not `element_size` bytes.
    pub fn write<T: Element>(&mut self, row: usize, col: usize, value: T) {
        check_size::<T>(self.shape.element_size);
        value.write_ne_slice(&mut self[(row, col)]);
    }

    /// The payload region, all rows back to back.
    pub fn payload(&self) -> &[u8] {
        self.block
            .bytes(self.layout.payload_start, self.layout.payload_bytes)
    }

    /// Mutable payload region. The header cannot be reached through it.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        self.block
            .bytes_mut(self.layout.payload_start, self.layout.payload_bytes)
    }

    /// The entire block, header included.
    pub fn as_bytes(&self) -> &[u8] {
        self.block.as_bytes()
    }

    /// Memory owned by the grid's block in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.block.len()
    }

    fn row_bytes(&self) -> usize {
        self.shape.cols * self.shape.element_size
    }
}

impl Index<(usize, usize)> for Grid2d {
    type Output = [u8];

    fn index(&self, (row, col): (usize, usize)) -> &[u8] {
        match self.get(row, col) {
            Some(bytes) => bytes,
            None => panic!(
                "index ({row}, {col}) out of range for {}x{} grid",
                self.shape.rows, self.shape.cols
            ),
        }
    }
}

impl IndexMut<(usize, usize)> for Grid2d {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut [u8] {
        let Shape2d { rows, cols, .. } = self.shape;
        match self.get_mut(row, col) {
            Some(bytes) => bytes,
            None => panic!("index ({row}, {col}) out of range for {rows}x{cols} grid"),
        }
    }
}

/// Allocate a zeroed 2D grid. Equivalent to [`Grid2d::allocate`].
pub fn alloc_2d(rows: usize, cols: usize, element_size: usize) -> Result<Grid2d, GridError> {
    Grid2d::allocate(rows, cols, element_size)
}

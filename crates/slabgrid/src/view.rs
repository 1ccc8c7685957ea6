//! Borrowed row and layer views.
//!
//! Views never own memory. A [`Row`] is the payload slice a row-table entry
//! points at; a [`Layer`] is a window onto the block positioned at one
//! layer-table entry, from which rows are resolved through the row table.
//! Indexing a view with `[c]` yields the bytes of one element, so
//! `grid.row(r)[c]` reads the same way as `a[r][c]` on a nested array.

use std::ops::{Index, IndexMut};

use crate::block::Block;
use crate::element::{check_size, Element};
use crate::shape::WORD_SIZE;

/// Shared view of one row of elements.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    bytes: &'a [u8],
    element_size: usize,
    cols: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(bytes: &'a [u8], element_size: usize, cols: usize) -> Self {
        Self {
            bytes,
            element_size,
            cols,
        }
    }

    /// Number of elements in the row.
    pub fn len(&self) -> usize {
        self.cols
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.cols == 0
    }

    /// Bytes of element `col`, or `None` if out of range.
    pub fn get(&self, col: usize) -> Option<&'a [u8]> {
        if col >= self.cols {
            return None;
        }
        let bytes = self.bytes;
        let start = col * self.element_size;
        Some(&bytes[start..start + self.element_size])
    }

    /// Decode element `col` as a `T`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of range or `T` is not `element_size` bytes.
    pub fn read<T: Element>(&self, col: usize) -> T {
        check_size::<T>(self.element_size);
        T::from_ne_slice(&self[col])
    }

    /// The whole row as one byte slice.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Iterate over the elements of the row.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let bytes = self.bytes;
        let element_size = self.element_size;
        (0..self.cols).map(move |c| &bytes[c * element_size..(c + 1) * element_size])
    }
}

impl Index<usize> for Row<'_> {
    type Output = [u8];

    fn index(&self, col: usize) -> &[u8] {
        match self.get(col) {
            Some(bytes) => bytes,
            None => panic!("column {col} out of range for row of {} columns", self.cols),
        }
    }
}

/// Mutable view of one row of elements.
#[derive(Debug)]
pub struct RowMut<'a> {
    bytes: &'a mut [u8],
    element_size: usize,
    cols: usize,
}

impl<'a> RowMut<'a> {
    pub(crate) fn new(bytes: &'a mut [u8], element_size: usize, cols: usize) -> Self {
        Self {
            bytes,
            element_size,
            cols,
        }
    }

    /// Number of elements in the row.
    pub fn len(&self) -> usize {
        self.cols
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.cols == 0
    }

    /// Mutable bytes of element `col`, or `None` if out of range.
    pub fn get_mut(&mut self, col: usize) -> Option<&mut [u8]> {
        if col >= self.cols {
            return None;
        }
        let start = col * self.element_size;
        Some(&mut self.bytes[start..start + self.element_size])
    }

    /// Encode `value` into element `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of range or `T` is not `element_size` bytes.
    pub fn write<T: Element>(&mut self, col: usize, value: T) {
        check_size::<T>(self.element_size);
        value.write_ne_slice(&mut self[col]);
    }

    /// Reborrow as a shared view.
    pub fn as_row(&self) -> Row<'_> {
        Row::new(&*self.bytes, self.element_size, self.cols)
    }

    /// The whole row as one mutable byte slice.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

impl Index<usize> for RowMut<'_> {
    type Output = [u8];

    fn index(&self, col: usize) -> &[u8] {
        let cols = self.cols;
        assert!(col < cols, "column {col} out of range for row of {cols} columns");
        let start = col * self.element_size;
        &self.bytes[start..start + self.element_size]
    }
}

impl IndexMut<usize> for RowMut<'_> {
    fn index_mut(&mut self, col: usize) -> &mut [u8] {
        let cols = self.cols;
        match self.get_mut(col) {
            Some(bytes) => bytes,
            None => panic!("column {col} out of range for row of {cols} columns"),
        }
    }
}

/// Shared view of one layer of a 3D grid.
///
/// Holds the block and the offset of this layer's first row-table entry
/// (the value stored in the layer table). Rows are resolved by reading the
/// row table, exactly as a nested pointer array would be dereferenced.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    block: &'a Block,
    row_entries: usize,
    rows: usize,
    cols: usize,
    element_size: usize,
}

impl<'a> Layer<'a> {
    pub(crate) fn new(
        block: &'a Block,
        row_entries: usize,
        rows: usize,
        cols: usize,
        element_size: usize,
    ) -> Self {
        Self {
            block,
            row_entries,
            rows,
            cols,
            element_size,
        }
    }

    /// Number of rows in the layer.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the layer has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Offset of the payload row `row`, read from the row table.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row_offset(&self, row: usize) -> usize {
        assert!(
            row < self.rows,
            "row {row} out of range for layer of {} rows",
            self.rows
        );
        self.block.read_word(self.row_entries + row * WORD_SIZE)
    }

    /// Row `row`, or `None` if out of range.
    pub fn get(&self, row: usize) -> Option<Row<'a>> {
        if row >= self.rows {
            return None;
        }
        let block = self.block;
        let start = block.read_word(self.row_entries + row * WORD_SIZE);
        let bytes = block.bytes(start, self.cols * self.element_size);
        Some(Row::new(bytes, self.element_size, self.cols))
    }

    /// Row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> Row<'a> {
        match self.get(row) {
            Some(r) => r,
            None => panic!("row {row} out of range for layer of {} rows", self.rows),
        }
    }

    /// Iterate over the rows of the layer.
    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> + 'a {
        let layer = *self;
        (0..self.rows).map(move |r| layer.row(r))
    }
}

/// Mutable view of one layer of a 3D grid.
#[derive(Debug)]
pub struct LayerMut<'a> {
    block: &'a mut Block,
    row_entries: usize,
    rows: usize,
    cols: usize,
    element_size: usize,
}

impl<'a> LayerMut<'a> {
    pub(crate) fn new(
        block: &'a mut Block,
        row_entries: usize,
        rows: usize,
        cols: usize,
        element_size: usize,
    ) -> Self {
        Self {
            block,
            row_entries,
            rows,
            cols,
            element_size,
        }
    }

    /// Number of rows in the layer.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the layer has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Mutable row `row`, or `None` if out of range.
    pub fn get_mut(&mut self, row: usize) -> Option<RowMut<'_>> {
        if row >= self.rows {
            return None;
        }
        let start = self.block.read_word(self.row_entries + row * WORD_SIZE);
        let bytes = self.block.bytes_mut(start, self.cols * self.element_size);
        Some(RowMut::new(bytes, self.element_size, self.cols))
    }

    /// Mutable row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row_mut(&mut self, row: usize) -> RowMut<'_> {
        let rows = self.rows;
        match self.get_mut(row) {
            Some(r) => r,
            None => panic!("row {row} out of range for layer of {rows} rows"),
        }
    }

    /// Reborrow as a shared view.
    pub fn as_layer(&self) -> Layer<'_> {
        Layer::new(
            &*self.block,
            self.row_entries,
            self.rows,
            self.cols,
            self.element_size,
        )
    }
}

//! Three-dimensional grids in a single block.
//!
//! ```text
//! ├── layer table ──┼── row table (layer-major) ──────┼── payload ──────────┤
//! │ l0 │ ... │ lL-1 │ l0r0 │ l0r1 │ ... │ lL-1 rR-1   │ (0,0,*) │ (0,1,*) … │
//!   │                 ▲  │
//!   └─────────────────┘  └──────────────────────────────▶
//! ```
//!
//! A layer-table word holds the offset of that layer's first row-table
//! entry; a row-table word holds the offset of the row's first element.
//! Row-table entries and payload rows are both ordered `layer * rows + row`,
//! so a single linear index serves both.

use std::ops::{Index, IndexMut};

use crate::block::Block;
use crate::element::{check_size, Element};
use crate::error::GridError;
use crate::shape::{BlockLayout, Shape3d, WORD_SIZE};
use crate::view::{Layer, LayerMut, Row};

/// A `layers × rows × cols` grid of `element_size`-byte cells, with both
/// pointer tables and the payload in one zero-initialised allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid3d {
    block: Block,
    shape: Shape3d,
    layout: BlockLayout,
}

impl Grid3d {
    /// Allocate a zeroed `layers × rows × cols` grid.
    ///
    /// Zero dimensions are accepted and produce an empty (but valid) grid.
    /// Fails with [`GridError::SizeOverflow`] or
    /// [`GridError::AllocationFailed`] exactly as [`Grid2d::allocate`] does.
    ///
    /// [`Grid2d::allocate`]: crate::Grid2d::allocate
    pub fn allocate(
        layers: usize,
        rows: usize,
        cols: usize,
        element_size: usize,
    ) -> Result<Self, GridError> {
        Self::with_shape(Shape3d::new(layers, rows, cols, element_size))
    }

    /// Allocate a zeroed grid for an existing [`Shape3d`].
    pub fn with_shape(shape: Shape3d) -> Result<Self, GridError> {
        let layout = shape.layout().inspect_err(|err| {
            log::debug!("rejecting 3d grid {shape:?}: {err}");
        })?;
        let mut block = Block::zeroed(layout.len)?;

        let rows_start = layout.row_table;
        let cols_start = layout.payload_start;
        for layer in 0..shape.layers {
            block.write_word(layer * WORD_SIZE, rows_start + layer * shape.rows * WORD_SIZE);
        }

        let row_stride = if shape.layers == 0 || shape.rows == 0 {
            0
        } else {
            shape.cols * shape.element_size
        };
        for layer in 0..shape.layers {
            for row in 0..shape.rows {
                let linear = row + layer * shape.rows;
                block.write_word(
                    rows_start + linear * WORD_SIZE,
                    cols_start + linear * row_stride,
                );
            }
        }

        log::trace!("allocated 3d grid {shape:?} as {layout:?}");
        Ok(Self {
            block,
            shape,
            layout,
        })
    }

    /// Number of layers.
    pub fn layers(&self) -> usize {
        self.shape.layers
    }

    /// Number of rows per layer.
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
    pub fn shape(&self) -> Shape3d {
        self.shape
    }

    /// The region layout of the backing block.
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Byte offset of the row table within the block.
    pub fn row_table_offset(&self) -> usize {
        self.layout.row_table
    }

    /// Byte offset of the payload within the block.
    pub fn payload_offset(&self) -> usize {
        self.layout.payload_start
    }

    /// Layer-table entry `layer`: the block offset of that layer's first
    /// row-table entry.
    ///
    /// # Panics
    ///
    /// Panics if `layer >= layers`.
    pub fn layer_offset(&self, layer: usize) -> usize {
        assert!(
            layer < self.shape.layers,
            "layer {layer} out of range for grid of {} layers",
            self.shape.layers
        );
        self.block.read_word(layer * WORD_SIZE)
    }

    /// Row-table entry for `(layer, row)`, resolved through the layer table.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn row_offset(&self, layer: usize, row: usize) -> usize {
        self.layer(layer).row_offset(row)
    }

    /// Shared view of layer `layer`, or `None` if out of range.
    pub fn get_layer(&self, layer: usize) -> Option<Layer<'_>> {
        if layer >= self.shape.layers {
            return None;
        }
        let row_entries = self.block.read_word(layer * WORD_SIZE);
        Some(Layer::new(
            &self.block,
            row_entries,
            self.shape.rows,
            self.shape.cols,
            self.shape.element_size,
        ))
    }

    /// Mutable view of layer `layer`, or `None` if out of range.
    pub fn get_layer_mut(&mut self, layer: usize) -> Option<LayerMut<'_>> {
        if layer >= self.shape.layers {
            return None;
        }
        let row_entries = self.block.read_word(layer * WORD_SIZE);
        Some(LayerMut::new(
            &mut self.block,
            row_entries,
            self.shape.rows,
            self.shape.cols,
            self.shape.element_size,
        ))
    }

    /// Shared view of layer `layer`; `grid.layer(l).row(r)[c]` is
    /// element `(l, r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `layer >= layers`.
    pub fn layer(&self, layer: usize) -> Layer<'_> {
        match self.get_layer(layer) {
            Some(l) => l,
            None => panic!(
                "layer {layer} out of range for grid of {} layers",
                self.shape.layers
            ),
        }
    }

    /// Mutable view of layer `layer`.
    ///
    /// # Panics
    ///
    /// Panics if `layer >= layers`.
    pub fn layer_mut(&mut self, layer: usize) -> LayerMut<'_> {
        let layers = self.shape.layers;
        match self.get_layer_mut(layer) {
            Some(l) => l,
            None => panic!("layer {layer} out of range for grid of {layers} layers"),
        }
    }

    /// Iterate over all layers in order.
    pub fn iter_layers(&self) -> impl Iterator<Item = Layer<'_>> + '_ {
        (0..self.shape.layers).map(move |l| self.layer(l))
    }

    /// Shared view of row `row` of layer `layer`, or `None` if out of range.
    pub fn get_row(&self, layer: usize, row: usize) -> Option<Row<'_>> {
        self.get_layer(layer)?.get(row)
    }

    /// Bytes of element `(layer, row, col)`, or `None` if out of range.
    pub fn get(&self, layer: usize, row: usize, col: usize) -> Option<&[u8]> {
        self.get_row(layer, row)?.get(col)
    }

    /// Mutable bytes of element `(layer, row, col)`, or `None` if out of range.
    pub fn get_mut(&mut self, layer: usize, row: usize, col: usize) -> Option<&mut [u8]> {
        let Shape3d {
            layers,
            rows,
            cols,
            element_size,
        } = self.shape;
        if layer >= layers || row >= rows || col >= cols {
            return None;
        }
        let start = self.row_offset(layer, row) + col * element_size;
        Some(self.block.bytes_mut(start, element_size))
    }

    /// Decode element `(layer, row, col)` as a `T`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or `T` is not `element_size` bytes.
    pub fn read<T: Element>(&self, layer: usize, row: usize, col: usize) -> T {
        check_size::<T>(self.shape.element_size);
        T::from_ne_slice(&self[(layer, row, col)])
    }

    /// Encode `value` into element `(layer, row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or `T` is not `element_size` bytes.
    pub fn write<T: Element>(&mut self, layer: usize, row: usize, col: usize, value: T) {
        check_size::<T>(self.shape.element_size);
        value.write_ne_slice(&mut self[(layer, row, col)]);
    }

    /// The payload region, layer-major then row-major.
    pub fn payload(&self) -> &[u8] {
        self.block
            .bytes(self.layout.payload_start, self.layout.payload_bytes)
    }

    /// Mutable payload region. The pointer tables cannot be reached through it.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        self.block
            .bytes_mut(self.layout.payload_start, self.layout.payload_bytes)
    }

    /// The entire block, both tables included.
    pub fn as_bytes(&self) -> &[u8] {
        self.block.as_bytes()
    }

    /// Memory owned by the grid's block in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.block.len()
    }
}

impl Index<(usize, usize, usize)> for Grid3d {
    type Output = [u8];

    fn index(&self, (layer, row, col): (usize, usize, usize)) -> &[u8] {
        match self.get(layer, row, col) {
            Some(bytes) => bytes,
            None => panic!(
                "index ({layer}, {row}, {col}) out of range for {}x{}x{} grid",
                self.shape.layers, self.shape.rows, self.shape.cols
            ),
        }
    }
}

impl IndexMut<(usize, usize, usize)> for Grid3d {
    fn index_mut(&mut self, (layer, row, col): (usize, usize, usize)) -> &mut [u8] {
        let Shape3d {
            layers, rows, cols, ..
        } = self.shape;
        match self.get_mut(layer, row, col) {
            Some(bytes) => bytes,
            None => panic!(
                "index ({layer}, {row}, {col}) out of range for {layers}x{rows}x{cols} grid"
            ),
        }
    }
}

/// Allocate a zeroed 3D grid. Equivalent to [`Grid3d::allocate`].
pub fn alloc_3d(
    layers: usize,
    rows: usize,
    cols: usize,
    element_size: usize,
) -> Result<Grid3d, GridError> {
    Grid3d::allocate(layers, rows, cols, element_size)
}

//! Grid dimensions and block size arithmetic.
//!
//! A [`Shape2d`] or [`Shape3d`] describes what the caller asked for; its
//! [`layout`](Shape2d::layout) method turns that into a [`BlockLayout`]
//! giving the byte offset of every region inside the single allocation.
//! All arithmetic is checked: a shape whose block size is not representable
//! yields [`GridError::SizeOverflow`] instead of a wrapped length.

use crate::error::GridError;

/// Width in bytes of one header entry.
///
/// Header entries are `usize` offsets, so this is the platform pointer width.
pub const WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Byte offsets of the regions within a grid block.
///
/// Regions are packed back to back with no padding:
///
/// ```text
/// 2D: [ row table | payload ]
/// 3D: [ layer table | row table | payload ]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    /// Offset of the first row-table entry. Zero for 2D blocks.
    pub row_table: usize,
    /// Offset of the first payload byte; also the total header size.
    pub payload_start: usize,
    /// Size of the payload region in bytes.
    pub payload_bytes: usize,
    /// Total block length in bytes.
    pub len: usize,
}

impl BlockLayout {
    /// Size of the header region (all pointer tables) in bytes.
    pub fn header_bytes(&self) -> usize {
        self.payload_start
    }

    fn from_parts(
        header_words: Option<usize>,
        row_table_words: usize,
        elements: Option<usize>,
        element_size: usize,
        payload_bytes: Option<usize>,
    ) -> Result<Self, GridError> {
        let overflow = || GridError::SizeOverflow {
            header_words,
            elements,
            element_size,
        };

        let header_bytes = header_words
            .and_then(|w| w.checked_mul(WORD_SIZE))
            .ok_or_else(overflow)?;
        let payload_bytes = payload_bytes.ok_or_else(overflow)?;
        let len = header_bytes
            .checked_add(payload_bytes)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or_else(overflow)?;

        Ok(Self {
            // header_bytes fits, and the row table ends exactly at it.
            row_table: header_bytes - row_table_words * WORD_SIZE,
            payload_start: header_bytes,
            payload_bytes,
            len,
        })
    }
}

/// Checked product of `factors`.
///
/// A zero factor makes the product zero even when the remaining factors
/// would overflow together.
fn byte_product(factors: &[usize]) -> Option<usize> {
    if factors.contains(&0) {
        return Some(0);
    }
    factors.iter().try_fold(1usize, |acc, &f| acc.checked_mul(f))
}

/// Dimensions of a two-dimensional grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape2d {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns per row.
    pub cols: usize,
    /// Size of one element in bytes.
    pub element_size: usize,
}

impl Shape2d {
    /// Create a new 2D shape.
    pub fn new(rows: usize, cols: usize, element_size: usize) -> Self {
        Self {
            rows,
            cols,
            element_size,
        }
    }

    /// Number of elements, or `None` if `rows * cols` overflows.
    pub fn element_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Compute the block layout: `rows` header words followed by
    /// `rows * cols * element_size` payload bytes.
    pub fn layout(&self) -> Result<BlockLayout, GridError> {
        BlockLayout::from_parts(
            Some(self.rows),
            self.rows,
            self.element_count(),
            self.element_size,
            byte_product(&[self.rows, self.cols, self.element_size]),
        )
    }
}

/// Dimensions of a three-dimensional grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape3d {
    /// Number of layers.
    pub layers: usize,
    /// Number of rows per layer.
    pub rows: usize,
    /// Number of columns per row.
    pub cols: usize,
    /// Size of one element in bytes.
    pub element_size: usize,
}

impl Shape3d {
    /// Create a new 3D shape.
    pub fn new(layers: usize, rows: usize, cols: usize, element_size: usize) -> Self {
        Self {
            layers,
            rows,
            cols,
            element_size,
        }
    }

    /// Number of row-table entries (`layers * rows`), or `None` on overflow.
    pub fn row_count(&self) -> Option<usize> {
        self.layers.checked_mul(self.rows)
    }

    /// Number of elements, or `None` if `layers * rows * cols` overflows.
    pub fn element_count(&self) -> Option<usize> {
        self.row_count()?.checked_mul(self.cols)
    }

    /// Compute the block layout: `layers` layer-table words, then
    /// `layers * rows` row-table words, then the payload.
    pub fn layout(&self) -> Result<BlockLayout, GridError> {
        let row_words = self.row_count();
        let header_words = row_words.and_then(|r| r.checked_add(self.layers));
        BlockLayout::from_parts(
            header_words,
            row_words.unwrap_or(0),
            self.element_count(),
            self.element_size,
            byte_product(&[self.layers, self.rows, self.cols, self.element_size]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_2d_packs_header_before_payload() {
        let layout = Shape2d::new(2, 3, 4).layout().unwrap();
        assert_eq!(layout.row_table, 0);
        assert_eq!(layout.payload_start, 2 * WORD_SIZE);
        assert_eq!(layout.payload_bytes, 24);
        assert_eq!(layout.len, 2 * WORD_SIZE + 24);
    }

    #[test]
    fn layout_3d_has_three_regions() {
        let layout = Shape3d::new(2, 3, 4, 4).layout().unwrap();
        assert_eq!(layout.row_table, 2 * WORD_SIZE);
        assert_eq!(layout.payload_start, 2 * WORD_SIZE + 6 * WORD_SIZE);
        assert_eq!(layout.payload_bytes, 2 * 3 * 4 * 4);
        assert_eq!(layout.len, layout.payload_start + layout.payload_bytes);
    }

    #[test]
    fn zero_rows_is_empty_block() {
        let layout = Shape2d::new(0, 100, 8).layout().unwrap();
        assert_eq!(layout.len, 0);
    }

    #[test]
    fn zero_cols_keeps_row_table() {
        let layout = Shape2d::new(5, 0, 8).layout().unwrap();
        assert_eq!(layout.payload_bytes, 0);
        assert_eq!(layout.len, 5 * WORD_SIZE);
    }

    #[test]
    fn zero_rows_with_huge_cols_does_not_overflow() {
        // A zero factor absorbs the others, however large.
        let layout = Shape2d::new(0, usize::MAX, 2).layout().unwrap();
        assert_eq!(layout.len, 0);
    }

    #[test]
    fn zero_element_size_absorbs_huge_cols() {
        let layout = Shape2d::new(3, usize::MAX, 0).layout().unwrap();
        assert_eq!(layout.payload_bytes, 0);
        assert_eq!(layout.len, 3 * WORD_SIZE);

        let layout = Shape3d::new(2, 3, usize::MAX, 0).layout().unwrap();
        assert_eq!(layout.payload_bytes, 0);
        assert_eq!(layout.len, 8 * WORD_SIZE);
    }

    #[test]
    fn byte_product_treats_any_zero_as_zero() {
        assert_eq!(byte_product(&[usize::MAX, usize::MAX, 0]), Some(0));
        assert_eq!(byte_product(&[0, usize::MAX, 2]), Some(0));
        assert_eq!(byte_product(&[usize::MAX, 2]), None);
        assert_eq!(byte_product(&[2, 3, 4]), Some(24));
    }

    #[test]
    fn element_product_overflow_is_rejected() {
        let result = Shape2d::new(usize::MAX, 2, 1).layout();
        assert!(matches!(
            result,
            Err(GridError::SizeOverflow { elements: None, .. })
        ));
    }

    #[test]
    fn header_overflow_is_rejected() {
        let result = Shape2d::new(usize::MAX / 2, 1, 0).layout();
        assert!(matches!(result, Err(GridError::SizeOverflow { .. })));
    }

    #[test]
    fn total_above_isize_max_is_rejected() {
        let result = Shape2d::new(1, isize::MAX as usize, 1).layout();
        assert!(matches!(result, Err(GridError::SizeOverflow { .. })));
    }

    #[test]
    fn layout_3d_overflow_in_row_count() {
        let result = Shape3d::new(usize::MAX, 2, 1, 1).layout();
        assert!(matches!(
            result,
            Err(GridError::SizeOverflow {
                header_words: None,
                ..
            })
        ));
    }

    #[test]
    fn layout_3d_overflow_in_payload() {
        let result = Shape3d::new(2, 2, usize::MAX / 8, 8).layout();
        assert!(matches!(result, Err(GridError::SizeOverflow { .. })));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn layout_2d_matches_reference_formula(
                rows in 0usize..512,
                cols in 0usize..512,
                element_size in 0usize..32,
            ) {
                let layout = Shape2d::new(rows, cols, element_size).layout().unwrap();
                prop_assert_eq!(
                    layout.len,
                    rows * WORD_SIZE + rows * cols * element_size
                );
                prop_assert_eq!(layout.header_bytes(), rows * WORD_SIZE);
            }

            #[test]
            fn layout_3d_matches_reference_formula(
                layers in 0usize..64,
                rows in 0usize..64,
                cols in 0usize..64,
                element_size in 0usize..16,
            ) {
                let layout = Shape3d::new(layers, rows, cols, element_size)
                    .layout()
                    .unwrap();
                prop_assert_eq!(
                    layout.len,
                    layers * WORD_SIZE
                        + layers * rows * WORD_SIZE
                        + layers * rows * cols * element_size
                );
                prop_assert_eq!(layout.row_table, layers * WORD_SIZE);
            }
        }
    }
}

//! Reusable grid fill fixtures.
//!
//! Every byte of every cell gets a value derived from the cell's linear
//! index and the byte's position inside the cell, so a misrouted read or an
//! aliased cell shows up as a pattern mismatch.

use slabgrid::{Grid2d, Grid3d};

/// Expected byte `byte` of the cell with linear index `cell`.
pub fn pattern_byte(cell: usize, byte: usize) -> u8 {
    (cell.wrapping_mul(131).wrapping_add(byte.wrapping_mul(7)) % 251) as u8 + 1
}

/// Fill every cell of `grid` through the row views.
pub fn fill_pattern_2d(grid: &mut Grid2d) {
    let cols = grid.cols();
    for r in 0..grid.rows() {
        let mut row = grid.row_mut(r);
        for c in 0..cols {
            for (i, b) in row[c].iter_mut().enumerate() {
                *b = pattern_byte(r * cols + c, i);
            }
        }
    }
}

/// Find the first cell whose bytes differ from [`fill_pattern_2d`]'s output.
pub fn find_pattern_mismatch_2d(grid: &Grid2d) -> Option<(usize, usize)> {
    let cols = grid.cols();
    for (r, row) in grid.iter_rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let ok = cell
                .iter()
                .enumerate()
                .all(|(i, &b)| b == pattern_byte(r * cols + c, i));
            if !ok {
                return Some((r, c));
            }
        }
    }
    None
}

/// Fill every cell of `grid` through the layer and row views.
pub fn fill_pattern_3d(grid: &mut Grid3d) {
    let (rows, cols) = (grid.rows(), grid.cols());
    for l in 0..grid.layers() {
        let mut layer = grid.layer_mut(l);
        for r in 0..rows {
            let mut row = layer.row_mut(r);
            for c in 0..cols {
                for (i, b) in row[c].iter_mut().enumerate() {
                    *b = pattern_byte((l * rows + r) * cols + c, i);
                }
            }
        }
    }
}

/// Find the first cell whose bytes differ from [`fill_pattern_3d`]'s output.
pub fn find_pattern_mismatch_3d(grid: &Grid3d) -> Option<(usize, usize, usize)> {
    let (rows, cols) = (grid.rows(), grid.cols());
    for (l, layer) in grid.iter_layers().enumerate() {
        for (r, row) in layer.rows().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let linear = (l * rows + r) * cols + c;
                let ok = cell
                    .iter()
                    .enumerate()
                    .all(|(i, &b)| b == pattern_byte(linear, i));
                if !ok {
                    return Some((l, r, c));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_never_zero() {
        for cell in 0..1000 {
            for byte in 0..16 {
                assert_ne!(pattern_byte(cell, byte), 0);
            }
        }
    }

    #[test]
    fn fill_then_verify_2d() {
        let mut grid = Grid2d::allocate(4, 6, 3).unwrap();
        assert_eq!(find_pattern_mismatch_2d(&grid), Some((0, 0)));
        fill_pattern_2d(&mut grid);
        assert_eq!(find_pattern_mismatch_2d(&grid), None);
    }

    #[test]
    fn fill_then_verify_3d() {
        let mut grid = Grid3d::allocate(3, 4, 5, 2).unwrap();
        fill_pattern_3d(&mut grid);
        assert_eq!(find_pattern_mismatch_3d(&grid), None);
        grid.write(2, 3, 4, 0u16);
        assert_eq!(find_pattern_mismatch_3d(&grid), Some((2, 3, 4)));
    }
}

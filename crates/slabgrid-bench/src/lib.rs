//! Benchmark profiles and utilities for slabgrid.
//!
//! Provides pre-built shapes used by the criterion benches and examples:
//!
//! - [`reference_shape_2d`]: 256x256 grid of `f32` (64K cells)
//! - [`reference_shape_3d`]: 32x64x64 grid of `f32` (128K cells)
//! - [`diffuse_step`]: one explicit diffusion step over a 2D grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slabgrid::{Grid2d, GridError, Shape2d, Shape3d};

/// Reference 2D profile: 256x256 `f32` cells.
pub fn reference_shape_2d() -> Shape2d {
    Shape2d::new(256, 256, std::mem::size_of::<f32>())
}

/// Reference 3D profile: 32 layers of 64x64 `f32` cells.
pub fn reference_shape_3d() -> Shape3d {
    Shape3d::new(32, 64, 64, std::mem::size_of::<f32>())
}

/// Allocate an `f32` grid with a single hot cell in the middle.
pub fn hot_spot_grid(rows: usize, cols: usize, heat: f32) -> Result<Grid2d, GridError> {
    let mut grid = Grid2d::allocate(rows, cols, std::mem::size_of::<f32>())?;
    if rows > 0 && cols > 0 {
        grid.write(rows / 2, cols / 2, heat);
    }
    Ok(grid)
}

/// One explicit diffusion step with coefficient `d` and absorbing edges.
///
/// Reads `src` and writes every cell of `dst`. Both grids must be `f32`
/// grids of the same shape.
///
/// # Panics
///
/// Panics if the shapes differ or the element size is not 4 bytes.
pub fn diffuse_step(src: &Grid2d, dst: &mut Grid2d, d: f32) {
    assert_eq!(src.shape(), dst.shape(), "diffusion grids must share a shape");
    let (rows, cols) = (src.rows(), src.cols());
    let at = |r: isize, c: isize| -> f32 {
        if r < 0 || c < 0 || r as usize >= rows || c as usize >= cols {
            0.0
        } else {
            src.read::<f32>(r as usize, c as usize)
        }
    };
    for r in 0..rows {
        let mut out = dst.row_mut(r);
        for c in 0..cols {
            let (ri, ci) = (r as isize, c as isize);
            let here = at(ri, ci);
            let laplacian = at(ri - 1, ci) + at(ri + 1, ci) + at(ri, ci - 1) + at(ri, ci + 1)
                - 4.0 * here;
            out.write(c, here + d * laplacian);
        }
    }
}

/// Sum of every cell of an `f32` grid.
pub fn total(grid: &Grid2d) -> f32 {
    grid.iter_rows()
        .map(|row| (0..row.len()).map(|c| row.read::<f32>(c)).sum::<f32>())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_spot_is_centered() {
        let grid = hot_spot_grid(5, 5, 10.0).unwrap();
        assert_eq!(grid.read::<f32>(2, 2), 10.0);
        assert_eq!(total(&grid), 10.0);
    }

    #[test]
    fn diffusion_spreads_heat_to_neighbours() {
        let src = hot_spot_grid(5, 5, 1.0).unwrap();
        let mut dst = Grid2d::with_shape(src.shape()).unwrap();
        diffuse_step(&src, &mut dst, 0.1);
        assert!((dst.read::<f32>(2, 2) - 0.6).abs() < 1e-6);
        assert!((dst.read::<f32>(1, 2) - 0.1).abs() < 1e-6);
        assert_eq!(dst.read::<f32>(0, 0), 0.0);
        // Heat far from the edges is conserved.
        assert!((total(&dst) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reference_shapes_fit() {
        assert!(reference_shape_2d().layout().is_ok());
        assert!(reference_shape_3d().layout().is_ok());
    }
}

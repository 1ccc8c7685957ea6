//! Heat diffusion on a contiguous 2D grid.
//!
//! Demonstrates: allocate two grids → seed a hot spot → ping-pong diffusion
//! steps between them → print the centre row.

use slabgrid::Grid2d;
use slabgrid_bench::{diffuse_step, hot_spot_grid, total};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== slabgrid heat diffusion ===\n");

    let (rows, cols) = (21, 21);
    let mut a = hot_spot_grid(rows, cols, 1000.0)?;
    let mut b = Grid2d::with_shape(a.shape())?;
    println!(
        "grid: {rows}x{cols} f32, block {} bytes (header {} bytes)",
        a.memory_bytes(),
        a.layout().header_bytes()
    );

    for step in 1..=40 {
        diffuse_step(&a, &mut b, 0.2);
        std::mem::swap(&mut a, &mut b);
        if step % 10 == 0 {
            println!("step {step:>3}: total heat {:.3}", total(&a));
        }
    }

    println!("\ncentre row:");
    let row = a.row(rows / 2);
    let cells: Vec<String> = (0..row.len())
        .map(|c| format!("{:5.1}", row.read::<f32>(c)))
        .collect();
    println!("{}", cells.join(" "));
    Ok(())
}

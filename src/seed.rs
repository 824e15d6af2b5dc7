//! Closed space-filling curve over the matrix.
//!
//! The board is split into four quadrants, each covered by a generalized
//! Hilbert (Gilbert) curve. The quadrants are oriented so the curve runs up
//! the left half and down the right half, ending next to where it started.
//! Because the path closes into a cycle, every cyclic rotation of it is still
//! a Hamiltonian path over the grid.

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{CELL_COUNT, GRID_HEIGHT, GRID_WIDTH};
use crate::grid::Cell;

const _: () = assert!(
    GRID_WIDTH % 2 == 0 && GRID_HEIGHT % 2 == 0,
    "a closed seed path needs even grid dimensions"
);

pub type Path = Vec<Cell, CELL_COUNT>;

#[derive(Clone)]
pub struct SeedPath {
    cells: Path,
}

impl SeedPath {
    pub fn new() -> Self {
        let mut cells = Path::new();
        let w = GRID_WIDTH as i32 / 2;
        let h = GRID_HEIGHT as i32 / 2;

        // Left half upwards, right half downwards.
        gilbert2d(w - 1, 0, 0, h, -w, 0, &mut cells);
        gilbert2d(w - 1, h, 0, h, -w, 0, &mut cells);
        gilbert2d(w, 2 * h - 1, 0, -h, w, 0, &mut cells);
        gilbert2d(w, h - 1, 0, -h, w, 0, &mut cells);

        debug_assert_eq!(cells.len(), CELL_COUNT);
        Self { cells }
    }

    pub fn path(&self) -> &[Cell] {
        &self.cells
    }

    /// The path started `start_offset` cells in, wrapping back to the
    /// beginning. Offsets at or past the length wrap around.
    pub fn rotate(&self, start_offset: usize) -> Path {
        let split = start_offset % self.cells.len();
        let (front, back) = self.cells.split_at(split);
        back.iter().chain(front).copied().collect()
    }

    /// Picks a rotation offset from one raw entropy sample. The same sample
    /// always gives the same offset.
    pub fn offset_from_entropy(sample: u32) -> usize {
        let mut rng = SmallRng::seed_from_u64(u64::from(sample));
        rng.gen_range(0..CELL_COUNT)
    }
}

impl Default for SeedPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends the curve covering the rectangle spanned from `(x, y)` by the
/// major axis `(ax, ay)` and minor axis `(bx, by)`. The curve starts at
/// `(x, y)` and ends at the far corner of the major axis.
fn gilbert2d(x: i32, y: i32, ax: i32, ay: i32, bx: i32, by: i32, path: &mut Path) {
    let w = (ax + ay).abs();
    let h = (bx + by).abs();

    let dax = ax.signum();
    let day = ay.signum();
    let dbx = bx.signum();
    let dby = by.signum();

    if h == 1 {
        let (mut cx, mut cy) = (x, y);
        for _ in 0..w {
            push(path, cx, cy);
            cx += dax;
            cy += day;
        }
        return;
    }

    if w == 1 {
        let (mut cx, mut cy) = (x, y);
        for _ in 0..h {
            push(path, cx, cy);
            cx += dbx;
            cy += dby;
        }
        return;
    }

    let mut ax2 = ax / 2;
    let mut ay2 = ay / 2;
    let mut bx2 = bx / 2;
    let mut by2 = by / 2;

    let w2 = (ax2 + ay2).abs();
    let h2 = (bx2 + by2).abs();

    if 2 * w > 3 * h {
        if (w2 & 1 != 0) && (w > 2) {
            ax2 += dax;
            ay2 += day;
        }
        gilbert2d(x, y, ax2, ay2, bx, by, path);
        gilbert2d(x + ax2, y + ay2, ax - ax2, ay - ay2, bx, by, path);
    } else {
        if (h2 & 1 != 0) && (h > 2) {
            bx2 += dbx;
            by2 += dby;
        }
        gilbert2d(x, y, bx2, by2, ax2, ay2, path);
        gilbert2d(x + bx2, y + by2, ax, ay, bx - bx2, by - by2, path);
        gilbert2d(
            x + (ax - dax) + (bx2 - dbx),
            y + (ay - day) + (by2 - dby),
            -bx2,
            -by2,
            -(ax - ax2),
            -(ay - ay2),
            path,
        );
    }
}

fn push(path: &mut Path, x: i32, y: i32) {
    // Capacity is exactly the cell count and every cell is emitted once.
    let _ = path.push(Cell::new(x as u8, y as u8));
}

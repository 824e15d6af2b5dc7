use crate::config::{CELL_COUNT, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step as `(dx, dy)`. Up increases `y`.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What happens when a move would step off the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundaryPolicy {
    /// The move is ignored.
    Clamp,
    /// The head reappears on the opposite edge.
    Wrap,
}

/// A position on the matrix. Nothing stops a `Cell` from lying off-grid;
/// [`Cell::index`] is the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn index(self) -> Option<CellIndex> {
        index(self.x, self.y)
    }

    /// The cell one step away in `direction`, or `None` when the step leaves
    /// the grid under [`BoundaryPolicy::Clamp`].
    pub fn neighbor(self, direction: Direction, policy: BoundaryPolicy) -> Option<Cell> {
        let (dx, dy) = direction.offset();
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        let (w, h) = (GRID_WIDTH as i16, GRID_HEIGHT as i16);

        match policy {
            BoundaryPolicy::Clamp => {
                if x < 0 || y < 0 || x >= w || y >= h {
                    None
                } else {
                    Some(Cell::new(x as u8, y as u8))
                }
            }
            BoundaryPolicy::Wrap => Some(Cell::new(x.rem_euclid(w) as u8, y.rem_euclid(h) as u8)),
        }
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) as u16 + self.y.abs_diff(other.y) as u16 == 1
    }
}

/// Linear position of a cell in the LED chain, always in `0..CELL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellIndex(u16);

impl CellIndex {
    pub fn new(raw: usize) -> Option<Self> {
        (raw < CELL_COUNT).then_some(CellIndex(raw as u16))
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Inverse of [`index`].
    pub fn cell(self) -> Cell {
        let h = GRID_HEIGHT as u16;
        Cell::new((self.0 / h) as u8, (self.0 % h) as u8)
    }

    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u16).map(CellIndex)
    }
}

/// Maps a coordinate to its LED index. The matrix is wired column by column,
/// so `x` selects the column strip and `y` the LED within it.
///
/// Returns `None` for coordinates off the grid rather than aliasing them onto
/// a valid LED.
pub fn index(x: u8, y: u8) -> Option<CellIndex> {
    if x >= GRID_WIDTH || y >= GRID_HEIGHT {
        return None;
    }
    Some(CellIndex(x as u16 * GRID_HEIGHT as u16 + y as u16))
}

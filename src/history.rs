use crate::config::{CELL_COUNT, START_CELL};
use crate::grid::Cell;
use crate::occupancy::OccupancySet;

/// The snake body: cells in visiting order, head last.
///
/// Slots past the head cursor keep whatever they held before a retraction
/// and are only meaningful again once an advance overwrites them. The
/// history is never empty; slot 0 always holds the tail end.
#[derive(Clone)]
pub struct TailHistory {
    cells: [Cell; CELL_COUNT],
    head: usize,
}

impl TailHistory {
    pub const CAPACITY: usize = CELL_COUNT;

    /// A one-cell history at `start`.
    pub fn new(start: Cell) -> Self {
        let mut cells = [START_CELL; CELL_COUNT];
        cells[0] = start;
        Self { cells, head: 0 }
    }

    /// Replaces the history with `path` (head at its last cell) and rebuilds
    /// `occupancy` to match.
    pub fn seed(&mut self, path: &[Cell], occupancy: &mut OccupancySet) {
        assert!(
            !path.is_empty() && path.len() <= CELL_COUNT,
            "seed path length out of range"
        );

        occupancy.clear();
        for (slot, &cell) in self.cells.iter_mut().zip(path) {
            let index = cell.index().expect("seed path cell off the grid");
            debug_assert!(!occupancy.is_occupied(index), "seed path revisits a cell");
            occupancy.mark(index);
            *slot = cell;
        }
        self.head = path.len() - 1;
    }

    pub fn head(&self) -> Cell {
        self.cells[self.head]
    }

    /// Cursor of the head slot; `len() - 1`.
    pub fn head_index(&self) -> usize {
        self.head
    }

    /// The neck: the cell just behind the head.
    pub fn previous(&self) -> Option<Cell> {
        self.head.checked_sub(1).map(|i| self.cells[i])
    }

    pub fn advance(&mut self, cell: Cell) {
        assert!(!self.is_full(), "advance past tail capacity");
        self.head += 1;
        self.cells[self.head] = cell;
    }

    pub fn retract(&mut self) {
        assert!(self.head > 0, "retract with no tail behind the head");
        self.head -= 1;
    }

    pub fn is_full(&self) -> bool {
        self.head == CELL_COUNT - 1
    }

    pub fn len(&self) -> usize {
        self.head + 1
    }

    /// Always false: a history holds at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Live cells, oldest first.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells[..=self.head]
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator + '_ {
        self.as_slice().iter()
    }

    /// Drops everything behind `start` and puts the head there.
    pub fn reset(&mut self, start: Cell) {
        self.cells[0] = start;
        self.head = 0;
    }
}

impl core::fmt::Debug for TailHistory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

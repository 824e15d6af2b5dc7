use crate::config::CELL_COUNT;
use crate::grid::CellIndex;

const WORD_BITS: usize = u32::BITS as usize;
const WORDS: usize = CELL_COUNT.div_ceil(WORD_BITS);

/// One bit per cell: set while the cell belongs to the live tail.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancySet {
    words: [u32; WORDS],
}

impl OccupancySet {
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    #[inline]
    fn locate(index: CellIndex) -> (usize, u32) {
        let i = index.get();
        (i / WORD_BITS, 1 << (i % WORD_BITS))
    }

    pub fn mark(&mut self, index: CellIndex) {
        let (word, bit) = Self::locate(index);
        self.words[word] |= bit;
    }

    pub fn unmark(&mut self, index: CellIndex) {
        let (word, bit) = Self::locate(index);
        self.words[word] &= !bit;
    }

    pub fn is_occupied(&self, index: CellIndex) -> bool {
        let (word, bit) = Self::locate(index);
        self.words[word] & bit != 0
    }

    pub fn clear(&mut self) {
        self.words = [0; WORDS];
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Occupied cells in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        CellIndex::all().filter(move |i| self.is_occupied(*i))
    }
}

impl Default for OccupancySet {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for OccupancySet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter().map(|i| i.get())).finish()
    }
}

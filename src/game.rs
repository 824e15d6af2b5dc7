use crate::config::{GameConfig, StartMode, START_CELL};
use crate::grid::{BoundaryPolicy, Cell, Direction};
use crate::history::TailHistory;
use crate::occupancy::OccupancySet;
use crate::traits::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Playing,
    /// Every cell has been visited; input is ignored until a reset.
    Solved,
}

/// What a single input did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// No directional input this tick, or the board is already solved.
    Idle,
    Advanced(Cell),
    /// The head stepped back onto its neck; holds the new head.
    Retracted(Cell),
    /// The target cell is part of the tail.
    Blocked(Cell),
    /// The move would have left the grid.
    OffGrid,
    /// The advance filled the last free cell.
    Solved,
}

/// The board: tail history, occupancy and the move rules that keep the two
/// in step. Nothing else mutates either.
#[derive(Clone)]
pub struct GameState {
    history: TailHistory,
    occupancy: OccupancySet,
    phase: Phase,
    boundary: BoundaryPolicy,
    retraction: bool,
}

impl GameState {
    pub fn new(start: Cell, boundary: BoundaryPolicy, retraction: bool) -> Self {
        let mut state = Self {
            history: TailHistory::new(start),
            occupancy: OccupancySet::new(),
            phase: Phase::Playing,
            boundary,
            retraction,
        };
        state.reset(start);
        state
    }

    /// A one-cell board following `config`'s move rules. Seeded starts begin
    /// at [`START_CELL`] until [`GameState::seed`] is called.
    pub fn from_config(config: &GameConfig) -> Self {
        let start = match config.start {
            StartMode::Cell(cell) => cell,
            StartMode::SeedReveal => START_CELL,
        };
        Self::new(start, config.boundary, config.retraction)
    }

    /// Clears the board down to a single head at `start`.
    pub fn reset(&mut self, start: Cell) {
        let index = start.index().expect("start cell off the grid");
        self.history.reset(start);
        self.occupancy.clear();
        self.occupancy.mark(index);
        self.phase = Phase::Playing;
        debug!("board reset at {}", start);
    }

    /// Loads `path` as the tail, head at its last cell.
    pub fn seed(&mut self, path: &[Cell]) {
        self.history.seed(path, &mut self.occupancy);
        self.phase = if self.history.is_full() {
            Phase::Solved
        } else {
            Phase::Playing
        };
        debug!("board seeded with {} cells", path.len());
    }

    pub fn handle(&mut self, event: InputEvent) -> MoveOutcome {
        match event {
            InputEvent::Direction(direction) => self.step(direction),
            InputEvent::Interact | InputEvent::None => MoveOutcome::Idle,
        }
    }

    /// Applies one directional move: retract onto the neck, reject a move
    /// into the tail, or advance into a free cell.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase == Phase::Solved {
            return MoveOutcome::Idle;
        }

        let head = self.history.head();
        let Some(target) = head.neighbor(direction, self.boundary) else {
            trace!("move {} off the grid from {}", direction, head);
            return MoveOutcome::OffGrid;
        };
        let Some(target_index) = target.index() else {
            return MoveOutcome::OffGrid;
        };

        if self.history.previous() == Some(target) {
            if !self.retraction {
                trace!("retraction disabled, neck {} blocks", target);
                return MoveOutcome::Blocked(target);
            }
            if let Some(head_index) = head.index() {
                self.occupancy.unmark(head_index);
            }
            self.history.retract();
            debug!("retracted to {}", target);
            return MoveOutcome::Retracted(target);
        }

        if self.occupancy.is_occupied(target_index) {
            trace!("move into {} blocked by tail", target);
            return MoveOutcome::Blocked(target);
        }

        self.history.advance(target);
        self.occupancy.mark(target_index);

        if self.history.is_full() {
            self.phase = Phase::Solved;
            info!("board solved, all {} cells visited", self.history.len());
            return MoveOutcome::Solved;
        }

        debug!("advanced to {} (length {})", target, self.history.len());
        MoveOutcome::Advanced(target)
    }

    /// Pulls the head back by one cell, releasing it. Returns false when only
    /// the head is left.
    pub(crate) fn shrink(&mut self) -> bool {
        if self.history.head_index() == 0 {
            return false;
        }
        if let Some(index) = self.history.head().index() {
            self.occupancy.unmark(index);
        }
        self.history.retract();
        if self.phase == Phase::Solved {
            self.phase = Phase::Playing;
        }
        true
    }

    pub fn history(&self) -> &TailHistory {
        &self.history
    }

    pub fn occupancy(&self) -> &OccupancySet {
        &self.occupancy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn head(&self) -> Cell {
        self.history.head()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// True when the occupied cells are exactly the live history.
    pub fn is_consistent(&self) -> bool {
        let mut expected = OccupancySet::new();
        for cell in self.history.iter() {
            match cell.index() {
                Some(index) if !expected.is_occupied(index) => expected.mark(index),
                _ => return false,
            }
        }
        expected == self.occupancy
    }
}

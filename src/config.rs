use crate::grid::{BoundaryPolicy, Cell};
use crate::palette::Palette;
use crate::traits::Color;

// Fixed parameters of the LED matrix
pub const GRID_WIDTH: u8 = 8;
pub const GRID_HEIGHT: u8 = 8;
pub const CELL_COUNT: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// Global brightness scale applied by the LED driver (out of 255).
pub const BRIGHTNESS: u8 = 32;

/// Where a fresh board puts the head when no seed path is used.
pub const START_CELL: Cell = Cell::new(3, 3);

pub const TICK_MS: u32 = 20;
pub const ANIMATION_DELAY_MS: u32 = 50;
pub const SPLASH_HOLD_MS: u32 = 200;
pub const DEBOUNCE_MS: u64 = 30;

/// Hue step between consecutive cells of the start-up rainbow.
pub const SPLASH_HUE_STEP: u8 = 5;

/// How a new board is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartMode {
    /// One-cell tail at the given cell.
    Cell(Cell),
    /// Full rotated seed path, revealed by the shrink animation.
    SeedReveal,
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub boundary: BoundaryPolicy,
    /// Moving onto the neck retracts the head instead of being blocked.
    pub retraction: bool,
    pub start: StartMode,
    pub palette: Palette,
    pub head_color: Color,
    /// When set, the oldest tail cell maps to palette position 255.
    pub reverse_gradient: bool,
    pub frame_time_ms: u32,
    pub animation_delay_ms: u32,
    pub splash_hold_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::Clamp,
            retraction: true,
            start: StartMode::SeedReveal,
            palette: Palette::RAINBOW,
            head_color: Color::WHITE,
            reverse_gradient: false,
            frame_time_ms: TICK_MS,
            animation_delay_ms: ANIMATION_DELAY_MS,
            splash_hold_ms: SPLASH_HOLD_MS,
        }
    }
}

impl GameConfig {
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_retraction(mut self, retraction: bool) -> Self {
        self.retraction = retraction;
        self
    }

    pub fn with_start(mut self, start: StartMode) -> Self {
        self.start = start;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_reverse_gradient(mut self, reverse: bool) -> Self {
        self.reverse_gradient = reverse;
        self
    }

    pub fn with_animation_delay_ms(mut self, ms: u32) -> Self {
        self.animation_delay_ms = ms;
        self
    }

    /// The toroidal free-roaming variant: wraps at the edges, no retraction.
    pub fn wraparound() -> Self {
        Self::default()
            .with_boundary(BoundaryPolicy::Wrap)
            .with_retraction(false)
            .with_start(StartMode::Cell(START_CELL))
    }
}

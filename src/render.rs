use core::ops::{Index, IndexMut};

use crate::config::{GameConfig, CELL_COUNT};
use crate::game::GameState;
use crate::grid::CellIndex;
use crate::history::TailHistory;
use crate::palette::Palette;
use crate::traits::{Color, GameDisplay};

/// One color per LED, addressed by [`CellIndex`]. Unlit cells are black.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: [Color; CELL_COUNT],
}

impl Frame {
    pub const fn new() -> Self {
        Self { pixels: [Color::BLACK; CELL_COUNT] }
    }

    pub fn filled(color: Color) -> Self {
        Self { pixels: [color; CELL_COUNT] }
    }

    pub fn get(&self, index: CellIndex) -> Color {
        self.pixels[index.get()]
    }

    pub fn set(&mut self, index: CellIndex, color: Color) {
        self.pixels[index.get()] = color;
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|c| !c.is_black()).count()
    }

    /// Every cell with its color, in LED order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Color)> + '_ {
        CellIndex::all().zip(self.pixels.iter().copied())
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    /// Clears `display`, writes every pixel and leaves the frame pending.
    pub fn draw<D: GameDisplay>(&self, display: &mut D) {
        display.clear(Color::BLACK);
        for (index, color) in self.iter() {
            display.set_pixel(index, color);
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<CellIndex> for Frame {
    type Output = Color;

    fn index(&self, index: CellIndex) -> &Color {
        &self.pixels[index.get()]
    }
}

impl IndexMut<CellIndex> for Frame {
    fn index_mut(&mut self, index: CellIndex) -> &mut Color {
        &mut self.pixels[index.get()]
    }
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame").field("lit", &self.lit_count()).finish()
    }
}

/// Turns the tail into LED colors.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
    head_color: Color,
    reverse_gradient: bool,
}

impl Renderer {
    pub fn new(palette: Palette, head_color: Color) -> Self {
        Self {
            palette,
            head_color,
            reverse_gradient: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            palette: config.palette,
            head_color: config.head_color,
            reverse_gradient: config.reverse_gradient,
        }
    }

    pub fn with_reverse_gradient(mut self, reverse: bool) -> Self {
        self.reverse_gradient = reverse;
        self
    }

    /// Palette position of the tail cell at `position` in the history, before
    /// modulation. The oldest cell sits at 0 unless the gradient is reversed.
    pub fn gradient_position(&self, position: usize) -> u8 {
        let scaled = (position.min(CELL_COUNT - 1) * 256 / CELL_COUNT) as u8;
        if self.reverse_gradient {
            255 - scaled
        } else {
            scaled
        }
    }

    /// Head in the highlight color, every older cell shaded from the palette
    /// at its history position shifted by `modulation`.
    pub fn frame(&self, history: &TailHistory, modulation: u8) -> Frame {
        let mut frame = Frame::new();
        let (body, head) = history.as_slice().split_at(history.head_index());

        for (position, cell) in body.iter().enumerate() {
            if let Some(index) = cell.index() {
                let hue = self.gradient_position(position).wrapping_add(modulation);
                frame.set(index, self.palette.color_at(hue));
            }
        }
        if let Some(index) = head[0].index() {
            frame.set(index, self.head_color);
        }
        frame
    }

    /// Rainbow across the LEDs in chain order, `delta_hue` apart.
    pub fn rainbow_fill(initial_hue: u8, delta_hue: u8) -> Frame {
        let mut frame = Frame::new();
        let mut hue = initial_hue;
        for index in CellIndex::all() {
            frame.set(index, Color::from_hue(hue));
            hue = hue.wrapping_add(delta_hue);
        }
        frame
    }

    pub fn shrink<'a>(
        &'a self,
        state: &'a mut GameState,
        modulation: u8,
        delay_ms: u32,
    ) -> ShrinkAnimation<'a> {
        ShrinkAnimation::new(state, self, modulation, delay_ms)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::RAINBOW, Color::WHITE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    pub frame: Frame,
    /// How long to hold this frame before showing the next.
    pub delay_ms: u32,
}

/// Collapses the tail one cell per frame until only the oldest cell is left.
///
/// Each step releases the head cell and retracts, so the board stays
/// consistent between frames. Yields one frame per retraction: a tail with
/// its head at slot `n` produces `n` frames.
pub struct ShrinkAnimation<'a> {
    state: &'a mut GameState,
    renderer: &'a Renderer,
    modulation: u8,
    delay_ms: u32,
}

impl<'a> ShrinkAnimation<'a> {
    pub fn new(
        state: &'a mut GameState,
        renderer: &'a Renderer,
        modulation: u8,
        delay_ms: u32,
    ) -> Self {
        Self {
            state,
            renderer,
            modulation,
            delay_ms,
        }
    }

    /// Modulation used for frames rendered from now on.
    pub fn set_modulation(&mut self, modulation: u8) {
        self.modulation = modulation;
    }

    pub fn remaining(&self) -> usize {
        self.state.history().head_index()
    }

    /// Runs the rest of the collapse without keeping frames; returns the
    /// final head slot, which is always 0.
    pub fn finish(mut self) -> usize {
        for _ in &mut self {}
        self.remaining()
    }
}

impl Iterator for ShrinkAnimation<'_> {
    type Item = AnimationFrame;

    fn next(&mut self) -> Option<AnimationFrame> {
        if !self.state.shrink() {
            return None;
        }
        Some(AnimationFrame {
            frame: self.renderer.frame(self.state.history(), self.modulation),
            delay_ms: self.delay_ms,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for ShrinkAnimation<'_> {}

use crate::grid::{CellIndex, Direction};

/// Color representation that can be implemented for different LED drivers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated color at `hue` on a 0..=255 color wheel.
    pub fn from_hue(hue: u8) -> Self {
        let region = hue / 43;
        let rem = (hue - region * 43) as u16 * 6;
        let rising = rem.min(255) as u8;
        let falling = 255 - rising;

        match region {
            0 => Color::new(255, rising, 0),
            1 => Color::new(falling, 255, 0),
            2 => Color::new(0, 255, rising),
            3 => Color::new(0, falling, 255),
            4 => Color::new(rising, 0, 255),
            _ => Color::new(255, 0, falling),
        }
    }

    /// Scales every channel by `scale / 256`; `255` keeps the color as is.
    pub fn scale(self, scale: u8) -> Self {
        let s = scale as u16 + 1;
        Color::new(
            ((self.r as u16 * s) >> 8) as u8,
            ((self.g as u16 * s) >> 8) as u8,
            ((self.b as u16 * s) >> 8) as u8,
        )
    }

    /// Linear blend: `amount` 0 gives `self`, 255 gives (almost) `other`.
    pub fn lerp(self, other: Color, amount: u8) -> Self {
        fn mix(a: u8, b: u8, t: u16) -> u8 {
            let a = a as u16;
            let b = b as u16;
            ((a * (256 - t) + b * t) >> 8) as u8
        }
        let t = amount as u16;
        Color::new(mix(self.r, other.r, t), mix(self.g, other.g, t), mix(self.b, other.b, t))
    }

    pub fn is_black(self) -> bool {
        self == Color::BLACK
    }
}

/// Edge events delivered by the button panel; one per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    Direction(Direction),
    /// Fifth button; delivered but not used by the game.
    Interact,
    None,
}

/// A full-frame pixel surface, addressed by LED index.
pub trait GameDisplay {
    type Error;

    /// Set every pixel to `color` in the pending frame.
    fn clear(&mut self, color: Color);

    /// Set one pixel in the pending frame.
    fn set_pixel(&mut self, index: CellIndex, color: Color);

    /// Push the pending frame to the LEDs.
    async fn update(&mut self) -> Result<(), Self::Error>;
}

/// Source of debounced button edges.
pub trait GameInput {
    type Error;

    /// Returns at most one event per call; [`InputEvent::None`] when idle.
    async fn read_input(&mut self) -> Result<InputEvent, Self::Error>;

    /// Drops events that arrived but have not been read yet.
    fn discard_pending(&mut self) {}
}

/// Abstraction for platform-specific operations
pub trait GamePlatform {
    /// Delay for specified milliseconds
    async fn delay_ms(&self, ms: u32);

    /// Get current time in milliseconds (for game timing)
    fn current_time_ms(&self) -> u32;
}

/// Continuously varying input sampled once per frame, e.g. a dial.
pub trait Modulation {
    /// Current level scaled to 0..=255.
    async fn level(&mut self) -> u8;
}

/// One-shot randomness for the start-of-game seed rotation.
pub trait EntropySource {
    fn sample(&mut self) -> u32;
}

/// A sample taken ahead of time.
impl EntropySource for u32 {
    fn sample(&mut self) -> u32 {
        *self
    }
}

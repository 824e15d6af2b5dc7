//! Button debouncing for the five-button panel.
//!
//! Pure logic over raw pin levels and a millisecond clock, so the firmware
//! task only has to feed it samples.

use crate::grid::Direction;
use crate::traits::InputEvent;

/// Reports one press per physical click once the level has been steady for
/// the debounce window.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window_ms: u64,
    raw: bool,
    stable: bool,
    changed_at: u64,
}

impl Debouncer {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            raw: false,
            stable: false,
            changed_at: 0,
        }
    }

    /// Feeds one sample; returns true exactly once per settled press.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        if pressed != self.raw {
            self.raw = pressed;
            self.changed_at = now_ms;
            return false;
        }
        if self.stable != self.raw && now_ms.saturating_sub(self.changed_at) >= self.window_ms {
            self.stable = self.raw;
            return self.stable;
        }
        false
    }

    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

/// Order of the raw levels passed to [`ButtonPanel::poll`].
pub const PANEL_EVENTS: [InputEvent; 5] = [
    InputEvent::Direction(Direction::Up),
    InputEvent::Direction(Direction::Down),
    InputEvent::Direction(Direction::Left),
    InputEvent::Direction(Direction::Right),
    InputEvent::Interact,
];

pub struct ButtonPanel {
    buttons: [Debouncer; 5],
}

impl ButtonPanel {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            buttons: [Debouncer::new(window_ms); 5],
        }
    }

    /// Feeds one sample of every button (true = pressed, in
    /// [`PANEL_EVENTS`] order) and calls `emit` for each new press.
    pub fn poll(&mut self, pressed: [bool; 5], now_ms: u64, mut emit: impl FnMut(InputEvent)) {
        for ((button, level), event) in self.buttons.iter_mut().zip(pressed).zip(PANEL_EVENTS) {
            if button.update(level, now_ms) {
                emit(event);
            }
        }
    }
}

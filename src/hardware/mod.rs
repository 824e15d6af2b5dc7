//! Raspberry Pi Pico bindings for the game's capability traits.

pub mod pico_lightbox;

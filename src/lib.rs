#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod engine;
pub mod game;
pub mod grid;
pub mod history;
pub mod input;
pub mod occupancy;
pub mod palette;
pub mod render;
pub mod seed;
pub mod traits;

#[cfg(feature = "rp2040")]
pub mod hardware;

pub use config::{GameConfig, StartMode};
pub use engine::GameEngine;
pub use game::{GameState, MoveOutcome, Phase};
pub use grid::{BoundaryPolicy, Cell, CellIndex, Direction};
pub use palette::Palette;
pub use render::{AnimationFrame, Frame, Renderer, ShrinkAnimation};
pub use traits::{Color, InputEvent};

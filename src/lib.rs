//! Parallax Runner - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Per-frame simulation (runner physics, spawning, collisions, parallax)
//! - `assets`: Asset registry filled by fire-and-forget image loads
//! - `renderer`: Frame snapshot, render surface trait, WebGPU quad renderer
//! - `platform`: Browser/native differences (key state, storage)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{AssetKey, AssetRegistry, SpriteId};
pub use settings::{KeyBindings, Settings};
pub use tuning::{Tuning, TuningError};

/// Displayed score for an internal tick count (one point per `divisor` ticks)
#[inline]
pub fn display_score(ticks: u64, divisor: u64) -> u64 {
    ticks / divisor.max(1)
}

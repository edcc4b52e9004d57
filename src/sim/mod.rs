//! Simulation module
//!
//! All gameplay logic lives here. One `tick` per display frame:
//! - Fixed step per call (frame time is not used)
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - Reads asset flags, never loads or renders

pub mod collision;
pub mod obstacle;
pub mod parallax;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use obstacle::{Obstacle, ObstacleKind, Spawner};
pub use parallax::{ParallaxLayer, ParallaxSet};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};

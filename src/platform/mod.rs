//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key state (keydown/keyup on web)
//! - Storage (LocalStorage on web, process-local map on native)

pub mod input;
pub mod storage;

pub use input::KeyState;

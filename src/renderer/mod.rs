//! Rendering
//!
//! `Frame` is the read-only snapshot the simulation exposes each frame;
//! `RenderSurface` is anything that can draw one. `RenderState` is the
//! WebGPU implementation used by the browser host.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{Frame, Quad, RenderSurface};
pub use pipeline::RenderState;
pub use vertex::{Color, colors};

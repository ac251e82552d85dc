//! Rendering adapter
//!
//! The simulation never draws. Hosts implement `Surface` for their backend
//! and call `draw_frame` with a snapshot after each tick.

pub mod frame;
pub mod surface;

pub use frame::{draw_frame, to_screen};
pub use surface::{DrawCommand, DrawList, Surface, rgba};

//! Skyhop: a side-scrolling avoidance game.
//!
//! The player falls under gravity and flaps upward to thread through gated
//! obstacles that scroll in from the right. Touching the floor or an
//! obstacle's solid region ends the session.

pub mod autopilot;
pub mod logic;
pub mod render;
pub mod types;

pub use logic::*;
pub use render::*;
pub use types::*;

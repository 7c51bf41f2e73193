//! Skyhop - a terminal side-scrolling avoidance game.
//!
//! The simulation lives in [`game`] and knows nothing about terminals; the
//! binary wires it to crossterm input and a ratatui display.

pub mod app;
pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod logging;
pub mod ui;

pub use app::{App, Screen};
pub use config::{ConfigError, Settings};
pub use game::{Phase, Session, StepEvent, StepReport, Viewport};

//! Timing and layout constants shared by the simulation and its hosts.

/// Length of one simulation frame in milliseconds (~60 Hz).
pub const FRAME_MS: u64 = 16;

/// Largest wall-clock delta fed to the simulation at once. Longer stalls are
/// truncated so the session does not replay a burst of frames.
pub const MAX_FRAME_DELTA_MS: u64 = 100;

/// Viewports narrower than this (in virtual pixels) use the compact profile.
pub const COMPACT_WIDTH_THRESHOLD: f64 = 768.0;

/// Virtual pixels covered by one terminal cell, horizontally.
pub const DEFAULT_CELL_WIDTH: f64 = 10.0;

/// Virtual pixels covered by one terminal cell, vertically.
pub const DEFAULT_CELL_HEIGHT: f64 = 20.0;

/// Position of the in-game score readout.
pub const SCORE_TEXT_X: f64 = 10.0;
pub const SCORE_TEXT_Y: f64 = 30.0;

/// Vertical distance between the game-over title and the final score line.
pub const SUMMARY_LINE_SPACING: f64 = 40.0;

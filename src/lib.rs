//! Laser Mirrors - A turn-based console puzzle
//!
//! Core modules:
//! - `sim`: Deterministic game rules (reflection, beam tracing, turns, setup)
//! - `render`: Text grid drawn from the game state
//! - `console`: Stdin/stdout session driving the turn controller
//! - `settings`: Player preferences loaded from JSON
//! - `error`: Setup, turn and session errors

pub mod console;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use console::Console;
pub use error::{SessionError, SetupError, TurnError};
pub use render::Grid;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Smallest allowed grid side
    pub const MIN_GRID_SIDE: i32 = 3;
    /// Mirrors only turn in steps of this many degrees
    pub const ANGLE_STEP: i32 = 30;
    /// Degrees in a full turn
    pub const FULL_TURN: i32 = 360;
    /// Number of distinct mirror orientations
    pub const ANGLE_STEPS: i32 = FULL_TURN / ANGLE_STEP;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(consts::FULL_TURN)
}

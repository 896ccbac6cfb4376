//! Deterministic game rules
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in explicitly
//! - Stable iteration order (by placement index)
//! - No console or rendering dependencies

pub mod beam;
pub mod mirror;
pub mod setup;
pub mod state;
pub mod turn;

pub use beam::{Shot, ShotOutcome, fire};
pub use mirror::Mirror;
pub use setup::{BoardConfig, generate_board, new_game};
pub use state::{Board, Direction, GamePhase, GameState, GridObject, LaserSource, Position, Target};
pub use turn::{TurnInput, open, play_turn, validate};

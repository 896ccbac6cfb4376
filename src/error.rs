//! Error types
//!
//! Setup errors are fatal, turn errors are recoverable and leave the game
//! state untouched, session errors end the console session.

use thiserror::Error;

/// Invalid board configuration; the game cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32 },

    #[error("there must be at least one target, got {0}")]
    NoTargets(i32),

    #[error("mirror count cannot be negative, got {0}")]
    NegativeMirrors(i32),

    #[error("{objects} targets and mirrors do not fit on a {width}x{height} grid")]
    TooCrowded {
        objects: i32,
        width: i32,
        height: i32,
    },
}

/// A rejected turn. The game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("invalid mirror index {index}, expected 1-{count}")]
    MirrorOutOfRange { index: i32, count: usize },

    #[error("rotation must be a multiple of 30 degrees, got {0}")]
    RotationNotMultiple(i32),

    #[error("the game is already over")]
    GameFinished,
}

/// Failure of the interactive console session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("expected a whole number, got {0:?}")]
    InvalidNumber(String),

    #[error("input closed before the game finished")]
    InputClosed,

    #[error("console I/O failed")]
    Io(#[from] std::io::Error),
}

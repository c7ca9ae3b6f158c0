pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Invalid puzzle or session configuration.
///
/// Returned when building a [`Catalog`] or a [`GameSession`]; no game can be
/// started from a configuration that fails these checks.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("catalog must contain at least one piece")]
    EmptyCatalog,
    #[display("board must have at least one column")]
    ZeroColumns,
    #[display("board has {columns} columns but only {len} slots")]
    TooManyColumns { columns: usize, len: usize },
    #[display("{slot} is claimed by more than one piece")]
    DuplicateTargetSlot { slot: SlotId },
    #[display("piece {name:?} targets {slot}, but the board only has {len} slots")]
    TargetSlotOutOfRange {
        name: String,
        slot: SlotId,
        len: usize,
    },
    #[display("time limit must be at least one second")]
    ZeroTimeLimit,
}

/// An id passed to [`GameSession::attempt_placement`] that does not exist in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NotFoundError {
    #[display("unknown piece {id}")]
    Piece { id: PieceId },
    #[display("unknown slot {id}")]
    Slot { id: SlotId },
}

/// Errors reported by [`GameSession`] operations.
///
/// None of these leave the session modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("{_0}")]
    NotFound(#[error(not(source))] NotFoundError),
    #[display("cannot {operation} while the game is {state}")]
    InvalidInState {
        state: SessionState,
        operation: Operation,
    },
    #[display("game is already running")]
    AlreadyRunning,
}

impl From<NotFoundError> for GameError {
    fn from(err: NotFoundError) -> Self {
        Self::NotFound(err)
    }
}

/// Session operation named in [`GameError::InvalidInState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Operation {
    #[display("start")]
    Start,
    #[display("tick")]
    Tick,
    #[display("place a piece")]
    Place,
}

use serde::Serialize;

use crate::{PieceId, SessionState};

/// Remaining seconds at or below which the countdown is shown as a warning.
pub const WARNING_SECONDS: u32 = 10;
/// Remaining seconds at or below which the countdown is shown as critical.
pub const CRITICAL_SECONDS: u32 = 5;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    won: bool,
    elapsed_seconds: u32,
}

impl GameOutcome {
    #[must_use]
    pub const fn new(won: bool, elapsed_seconds: u32) -> Self {
        Self {
            won,
            elapsed_seconds,
        }
    }

    #[must_use]
    pub const fn won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Player-facing summary line.
    #[must_use]
    pub fn message(&self) -> String {
        if self.won {
            format!(
                "Perfect! You completed the puzzle in {} seconds!",
                self.elapsed_seconds
            )
        } else {
            "Time's up! The shapes exploded out of the board!".to_owned()
        }
    }
}

/// Urgency of the countdown, for front ends that change colour or play a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum TimerLevel {
    Normal,
    Warning,
    Critical,
}

impl TimerLevel {
    /// Only a running countdown is ever above [`TimerLevel::Normal`].
    #[must_use]
    pub fn new(state: SessionState, time_remaining: u32) -> Self {
        match state {
            SessionState::Running if time_remaining <= CRITICAL_SECONDS => Self::Critical,
            SessionState::Running if time_remaining <= WARNING_SECONDS => Self::Warning,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub placed: bool,
}

/// Read-only view of a [`GameSession`](crate::GameSession) for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub state: SessionState,
    pub time_remaining: u32,
    pub pieces: Vec<PieceSnapshot>,
    pub outcome: Option<GameOutcome>,
}

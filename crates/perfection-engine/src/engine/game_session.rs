use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    Catalog, ConfigurationError, GameError, NotFoundError, Operation, Piece, PieceId, SlotId,
    engine::{
        evaluator,
        piece_tray::{self, PuzzleSeed},
        snapshot::{GameOutcome, GameSnapshot, PieceSnapshot, TimerLevel},
    },
};

/// Countdown length in seconds when none is configured.
pub const DEFAULT_TIME_LIMIT: u32 = 60;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[display("idle")]
    Idle,
    #[display("running")]
    Running,
    #[display("ended")]
    Ended,
}

/// Why a structurally valid placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    #[display("wrong slot")]
    WrongSlot,
    #[display("already placed")]
    AlreadyPlaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlacementResult {
    /// The piece is now on the board; `completed` is set when it was the last one.
    Accepted { completed: bool },
    Rejected(Rejection),
}

impl PlacementResult {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Accepted { completed: true })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickResult {
    Counting { time_remaining: u32 },
    TimedOut,
}

/// One play-through of the puzzle, from `start()` to the next `reset()`.
///
/// The session owns its pieces exclusively and applies every event as a whole
/// transition before returning, so callers driving it from a timer and from
/// user input only need to call it in the order events arrive.
///
/// # Lifecycle
///
/// ```text
/// Idle --start--> Running --last piece placed / time out--> Ended
///  ^                 |                                        |
///  +-----reset-------+--------------------reset---------------+
/// ```
///
/// # Example
///
/// ```
/// use perfection_engine::{Catalog, GameSession, PuzzleSeed, SessionState};
///
/// let seed = PuzzleSeed::from_bytes([0; 16]);
/// let mut session = GameSession::with_seed(Catalog::shapes(), 60, seed).unwrap();
/// session.start().unwrap();
///
/// let piece = session.pieces()[0];
/// let result = session.attempt_placement(piece.id(), piece.target_slot()).unwrap();
/// assert!(result.is_accepted());
///
/// for _ in 0..60 {
///     session.tick().unwrap();
/// }
/// assert_eq!(session.state(), SessionState::Ended);
/// assert!(!session.outcome().unwrap().won());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    catalog: Catalog,
    seed: PuzzleSeed,
    rng: Pcg32,
    time_limit: u32,
    state: SessionState,
    time_remaining: u32,
    pieces: Vec<Piece>,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Creates an idle session with a random seed.
    pub fn new(catalog: Catalog, time_limit: u32) -> Result<Self, ConfigurationError> {
        Self::with_seed(catalog, time_limit, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic tray order.
    pub fn with_seed(
        catalog: Catalog,
        time_limit: u32,
        seed: PuzzleSeed,
    ) -> Result<Self, ConfigurationError> {
        if time_limit == 0 {
            return Err(ConfigurationError::ZeroTimeLimit);
        }
        Ok(Self {
            catalog,
            seed,
            rng: seed.rng(),
            time_limit,
            state: SessionState::Idle,
            time_remaining: time_limit,
            pieces: Vec::new(),
            outcome: None,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn seed(&self) -> PuzzleSeed {
        self.seed
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn time_limit(&self) -> u32 {
        self.time_limit
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Seconds spent in the current game so far.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.time_limit - self.time_remaining
    }

    #[must_use]
    pub fn timer_level(&self) -> TimerLevel {
        TimerLevel::new(self.state, self.time_remaining)
    }

    /// Pieces of the current game in tray order. Empty while idle.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    pub fn available_pieces(&self) -> impl Iterator<Item = &Piece> {
        evaluator::available_pieces(&self.pieces)
    }

    #[must_use]
    pub fn piece_for_slot(&self, slot: SlotId) -> Option<&Piece> {
        evaluator::piece_for_slot(&self.pieces, slot)
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        evaluator::placed_count(&self.pieces)
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Starts a new game with a freshly shuffled tray and a full countdown.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.state {
            SessionState::Idle => {
                self.begin();
                Ok(())
            }
            SessionState::Running => Err(GameError::AlreadyRunning),
            SessionState::Ended => Err(GameError::InvalidInState {
                state: self.state,
                operation: Operation::Start,
            }),
        }
    }

    /// Abandons the current game, if any, and returns to idle.
    pub fn reset(&mut self) {
        if self.state.is_idle() {
            return;
        }
        debug!(state = %self.state, "reset");
        self.state = SessionState::Idle;
        self.time_remaining = self.time_limit;
        self.pieces = Vec::new();
        self.outcome = None;
    }

    /// Resets and immediately starts a new game ("play again").
    pub fn restart(&mut self) {
        self.reset();
        self.begin();
    }

    fn begin(&mut self) {
        self.time_remaining = self.time_limit;
        self.pieces = piece_tray::generate_pieces(&self.catalog, &mut self.rng);
        self.outcome = None;
        self.state = SessionState::Running;
        debug!(
            pieces = self.pieces.len(),
            time_limit = self.time_limit,
            "game started"
        );
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Result<TickResult, GameError> {
        if !self.state.is_running() {
            return Err(GameError::InvalidInState {
                state: self.state,
                operation: Operation::Tick,
            });
        }
        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            self.finish(false);
            return Ok(TickResult::TimedOut);
        }
        self.time_remaining -= 1;
        Ok(TickResult::Counting {
            time_remaining: self.time_remaining,
        })
    }

    /// Tries to drop `piece_id` onto `slot_id`.
    ///
    /// A wrong slot or an already placed piece is reported as
    /// [`PlacementResult::Rejected`] and changes nothing. Placing the last
    /// piece ends the game as a win.
    pub fn attempt_placement(
        &mut self,
        piece_id: PieceId,
        slot_id: SlotId,
    ) -> Result<PlacementResult, GameError> {
        if !self.state.is_running() {
            return Err(GameError::InvalidInState {
                state: self.state,
                operation: Operation::Place,
            });
        }
        if !self.catalog.contains_slot(slot_id) {
            return Err(NotFoundError::Slot { id: slot_id }.into());
        }
        let piece = self
            .pieces
            .iter_mut()
            .find(|piece| piece.id() == piece_id)
            .ok_or(NotFoundError::Piece { id: piece_id })?;

        if piece.is_placed() {
            return Ok(PlacementResult::Rejected(Rejection::AlreadyPlaced));
        }
        if !evaluator::is_correct_placement(piece, slot_id) {
            debug!(%piece_id, %slot_id, "placement rejected");
            return Ok(PlacementResult::Rejected(Rejection::WrongSlot));
        }

        piece.mark_placed();
        debug!(%piece_id, %slot_id, "piece placed");

        let completed = evaluator::is_complete(&self.pieces);
        if completed {
            self.finish(true);
        }
        Ok(PlacementResult::Accepted { completed })
    }

    fn finish(&mut self, won: bool) {
        let outcome = GameOutcome::new(won, self.elapsed_seconds());
        info!(
            won,
            elapsed_seconds = outcome.elapsed_seconds(),
            placed = self.placed_count(),
            total = self.pieces.len(),
            "game over"
        );
        self.state = SessionState::Ended;
        self.outcome = Some(outcome);
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            time_remaining: self.time_remaining,
            pieces: self
                .pieces
                .iter()
                .map(|piece| PieceSnapshot {
                    id: piece.id(),
                    placed: piece.is_placed(),
                })
                .collect(),
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    const SEED: PuzzleSeed = PuzzleSeed::from_bytes([42; 16]);

    fn session(time_limit: u32) -> GameSession {
        GameSession::with_seed(Catalog::shapes(), time_limit, SEED).unwrap()
    }

    fn running(time_limit: u32) -> GameSession {
        let mut session = session(time_limit);
        session.start().unwrap();
        session
    }

    fn place_all(session: &mut GameSession) -> Vec<PlacementResult> {
        let pieces = session.pieces().to_vec();
        pieces
            .iter()
            .map(|piece| {
                session
                    .attempt_placement(piece.id(), piece.target_slot())
                    .unwrap()
            })
            .collect()
    }

    mod construction {
        use super::*;

        #[test]
        fn test_new_session_is_idle() {
            let session = session(DEFAULT_TIME_LIMIT);
            assert_eq!(session.state(), SessionState::Idle);
            assert_eq!(session.time_remaining(), DEFAULT_TIME_LIMIT);
            assert!(session.pieces().is_empty());
            assert_eq!(session.outcome(), None);
        }

        #[test]
        fn test_zero_time_limit_is_rejected() {
            let result = GameSession::with_seed(Catalog::shapes(), 0, SEED);
            assert_eq!(result.unwrap_err(), ConfigurationError::ZeroTimeLimit);
        }
    }

    mod start {
        use super::*;

        #[test]
        fn test_start_generates_unplaced_pieces() {
            let session = running(DEFAULT_TIME_LIMIT);
            assert_eq!(session.state(), SessionState::Running);
            assert_eq!(session.pieces().len(), 12);
            assert!(session.pieces().iter().all(|piece| !piece.is_placed()));
        }

        #[test]
        fn test_start_while_running_fails_without_change() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            session.tick().unwrap();
            let before = session.snapshot();

            assert_eq!(session.start(), Err(GameError::AlreadyRunning));
            assert_eq!(session.snapshot(), before);
        }

        #[test]
        fn test_start_after_end_requires_reset() {
            let mut session = running(1);
            session.tick().unwrap();
            assert_eq!(
                session.start(),
                Err(GameError::InvalidInState {
                    state: SessionState::Ended,
                    operation: Operation::Start,
                })
            );
        }

        #[test]
        fn test_restart_from_ended() {
            let mut session = running(2);
            let first_game = session.pieces().to_vec();
            place_all(&mut session);
            assert!(session.state().is_ended());

            session.restart();
            assert!(session.state().is_running());
            assert_eq!(session.time_remaining(), 2);
            assert_eq!(session.outcome(), None);
            assert_eq!(session.placed_count(), 0);
            // The generator keeps running, so a new game gets a new shuffle
            assert_ne!(session.pieces(), first_game.as_slice());
        }
    }

    mod tick {
        use super::*;

        #[test]
        fn test_tick_counts_down() {
            let mut session = running(3);
            assert_eq!(
                session.tick(),
                Ok(TickResult::Counting { time_remaining: 2 })
            );
            assert_eq!(
                session.tick(),
                Ok(TickResult::Counting { time_remaining: 1 })
            );
            assert_eq!(session.tick(), Ok(TickResult::TimedOut));
            assert_eq!(session.time_remaining(), 0);
            assert_eq!(session.outcome(), Some(GameOutcome::new(false, 3)));
        }

        #[test]
        fn test_tick_while_idle_is_invalid() {
            let mut session = session(DEFAULT_TIME_LIMIT);
            assert_eq!(
                session.tick(),
                Err(GameError::InvalidInState {
                    state: SessionState::Idle,
                    operation: Operation::Tick,
                })
            );
            assert_eq!(session.time_remaining(), DEFAULT_TIME_LIMIT);
        }

        #[test]
        fn test_stale_tick_after_reset_is_ignored() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            session.tick().unwrap();
            session.reset();
            assert!(session.tick().is_err());
            assert!(session.state().is_idle());
            assert_eq!(session.time_remaining(), DEFAULT_TIME_LIMIT);
        }

        #[test]
        fn test_timer_level_follows_countdown() {
            let mut session = running(11);
            assert!(session.timer_level().is_normal());
            session.tick().unwrap();
            assert!(session.timer_level().is_warning());
            for _ in 0..5 {
                session.tick().unwrap();
            }
            assert_eq!(session.time_remaining(), 5);
            assert!(session.timer_level().is_critical());
        }
    }

    mod placement {
        use super::*;

        #[test]
        fn test_wrong_slot_is_rejected_without_change() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            let piece = session.pieces()[0];
            let wrong = SlotId::new((piece.target_slot().index() + 1) % 12);
            let before = session.snapshot();

            let result = session.attempt_placement(piece.id(), wrong);
            assert_eq!(result, Ok(PlacementResult::Rejected(Rejection::WrongSlot)));
            assert_eq!(session.snapshot(), before);
        }

        #[test]
        fn test_second_placement_of_same_piece_is_rejected() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            let piece = session.pieces()[0];

            let first = session.attempt_placement(piece.id(), piece.target_slot());
            let second = session.attempt_placement(piece.id(), piece.target_slot());
            assert_eq!(first, Ok(PlacementResult::Accepted { completed: false }));
            assert_eq!(
                second,
                Ok(PlacementResult::Rejected(Rejection::AlreadyPlaced))
            );
            assert_eq!(session.placed_count(), 1);
        }

        #[test]
        fn test_last_placement_wins() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            for _ in 0..7 {
                session.tick().unwrap();
            }

            let results = place_all(&mut session);
            let (last, rest) = results.split_last().unwrap();
            assert!(rest.iter().all(|r| r.is_accepted() && !r.is_completed()));
            assert!(last.is_completed());
            assert!(session.state().is_ended());
            assert_eq!(session.outcome(), Some(GameOutcome::new(true, 7)));
        }

        #[test]
        fn test_unknown_ids_are_not_found() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            let piece = session.pieces()[0];
            let before = session.snapshot();

            assert_eq!(
                session.attempt_placement(PieceId::new(99), piece.target_slot()),
                Err(GameError::NotFound(NotFoundError::Piece {
                    id: PieceId::new(99)
                }))
            );
            assert_eq!(
                session.attempt_placement(piece.id(), SlotId::new(12)),
                Err(GameError::NotFound(NotFoundError::Slot {
                    id: SlotId::new(12)
                }))
            );
            assert_eq!(session.snapshot(), before);
        }

        #[test]
        fn test_placement_while_idle_is_invalid() {
            let mut session = session(DEFAULT_TIME_LIMIT);
            let err = session
                .attempt_placement(PieceId::new(0), SlotId::new(0))
                .unwrap_err();
            assert_eq!(err.to_string(), "cannot place a piece while the game is idle");
        }

        #[test]
        fn test_piece_for_slot_after_placement() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            let piece = session.pieces()[3];
            assert_eq!(session.piece_for_slot(piece.target_slot()), None);

            session
                .attempt_placement(piece.id(), piece.target_slot())
                .unwrap();
            assert_eq!(
                session.piece_for_slot(piece.target_slot()).map(Piece::id),
                Some(piece.id())
            );
            assert_eq!(session.available_pieces().count(), 11);
        }

        #[test]
        fn test_custom_catalog_target_slots() {
            let kinds = vec![
                PieceKind::new("a", 'a', SlotId::new(1)),
                PieceKind::new("b", 'b', SlotId::new(0)),
            ];
            let catalog = Catalog::new(2, kinds).unwrap();
            let mut session = GameSession::with_seed(catalog, 60, SEED).unwrap();
            session.start().unwrap();

            let result = session.attempt_placement(PieceId::new(0), SlotId::new(0));
            assert_eq!(result, Ok(PlacementResult::Rejected(Rejection::WrongSlot)));
            let result = session.attempt_placement(PieceId::new(0), SlotId::new(1));
            assert_eq!(result, Ok(PlacementResult::Accepted { completed: false }));
        }
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(Rejection::WrongSlot.to_string(), "wrong slot");
        assert_eq!(Rejection::AlreadyPlaced.to_string(), "already placed");
    }

    mod reset {
        use super::*;

        #[test]
        fn test_reset_discards_game() {
            let mut session = running(DEFAULT_TIME_LIMIT);
            session.tick().unwrap();
            place_all(&mut session);
            session.reset();

            assert_eq!(session.state(), SessionState::Idle);
            assert_eq!(session.time_remaining(), DEFAULT_TIME_LIMIT);
            assert!(session.pieces().is_empty());
            assert_eq!(session.outcome(), None);
        }

        #[test]
        fn test_reset_while_idle_is_noop() {
            let mut session = session(DEFAULT_TIME_LIMIT);
            session.reset();
            assert_eq!(session.state(), SessionState::Idle);
        }
    }
}

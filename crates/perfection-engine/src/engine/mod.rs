//! Game rules and session state.
//!
//! This module turns a [`Catalog`](crate::Catalog) into playable games:
//!
//! - [`GameSession`] - The state machine (`Idle` → `Running` → `Ended`)
//! - [`generate_pieces`] - Shuffled tray generation
//! - [`PuzzleSeed`] - Seed for deterministic tray order
//! - [`evaluator`] - Pure placement and completion rules
//! - [`GameSnapshot`] - Read-only view for front ends
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a catalog and a time limit
//! 2. [`GameSession::start`] shuffles a new tray and starts the countdown
//! 3. The front end calls [`GameSession::tick`] once per second and
//!    [`GameSession::attempt_placement`] whenever the player drops a piece
//! 4. The game ends when the last piece is placed (win) or the countdown
//!    reaches zero (loss)
//! 5. [`GameSession::reset`] returns to idle; [`GameSession::restart`] plays again
//!
//! The session never reads a clock. Whatever drives it decides when a second
//! has passed, and must stop calling `tick` once the game is no longer running.

pub use self::{game_session::*, piece_tray::*, snapshot::*};

pub mod evaluator;
mod game_session;
mod piece_tray;
mod snapshot;

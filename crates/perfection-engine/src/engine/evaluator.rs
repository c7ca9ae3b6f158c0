//! Pure placement rules.
//!
//! Nothing here mutates pieces; [`GameSession`](crate::GameSession) applies the
//! results.

use crate::{Piece, SlotId};

/// Returns whether `slot` is the one place `piece` belongs.
#[must_use]
pub fn is_correct_placement(piece: &Piece, slot: SlotId) -> bool {
    piece.target_slot() == slot
}

/// Returns `true` iff every piece has been placed.
#[must_use]
pub fn is_complete(pieces: &[Piece]) -> bool {
    pieces.iter().all(Piece::is_placed)
}

#[must_use]
pub fn placed_count(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|piece| piece.is_placed()).count()
}

/// Pieces still waiting in the tray, in tray order.
pub fn available_pieces(pieces: &[Piece]) -> impl Iterator<Item = &Piece> {
    pieces.iter().filter(|piece| !piece.is_placed())
}

pub fn placed_pieces(pieces: &[Piece]) -> impl Iterator<Item = &Piece> {
    pieces.iter().filter(|piece| piece.is_placed())
}

/// Returns the placed piece occupying `slot`, if any.
#[must_use]
pub fn piece_for_slot(pieces: &[Piece], slot: SlotId) -> Option<&Piece> {
    placed_pieces(pieces).find(|piece| piece.target_slot() == slot)
}

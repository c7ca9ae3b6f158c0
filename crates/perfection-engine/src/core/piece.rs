use serde::{Deserialize, Serialize};

/// Stable identifier of a piece.
///
/// The id is the index of the piece's kind in its [`Catalog`](crate::Catalog),
/// so it does not depend on the shuffled tray order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("shape-{_0}")]
pub struct PieceId(usize);

impl PieceId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A board position, numbered row by row from zero.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("slot-{_0}")]
pub struct SlotId(usize);

impl SlotId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A puzzle tile in the current session.
///
/// `target_slot` is fixed by the catalog; only `placed` changes during a game,
/// and only from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    target_slot: SlotId,
    placed: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(id: PieceId, target_slot: SlotId) -> Self {
        Self {
            id,
            target_slot,
            placed: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub const fn target_slot(&self) -> SlotId {
        self.target_slot
    }

    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.placed
    }

    pub(crate) const fn mark_placed(&mut self) {
        self.placed = true;
    }
}

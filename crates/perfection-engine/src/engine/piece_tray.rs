use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Catalog, Piece, PieceId};

/// Generates a fresh set of pieces for a new game.
///
/// Returns one unplaced piece per catalog kind, in uniformly shuffled tray
/// order. Each piece's target slot is taken from the catalog; the shuffle only
/// changes the order the pieces are presented in.
///
/// # Example
///
/// ```
/// use perfection_engine::{Catalog, PuzzleSeed, generate_pieces};
///
/// let catalog = Catalog::shapes();
/// let mut rng = PuzzleSeed::from_bytes([7; 16]).rng();
/// let pieces = generate_pieces(&catalog, &mut rng);
///
/// assert_eq!(pieces.len(), catalog.len());
/// assert!(pieces.iter().all(|piece| !piece.is_placed()));
/// ```
pub fn generate_pieces<R>(catalog: &Catalog, rng: &mut R) -> Vec<Piece>
where
    R: Rng + ?Sized,
{
    let mut pieces: Vec<Piece> = catalog
        .kinds()
        .iter()
        .enumerate()
        .map(|(index, kind)| Piece::new(PieceId::new(index), kind.target_slot()))
        .collect();
    pieces.shuffle(rng);
    pieces
}

/// Seed for deterministic tray shuffling.
///
/// A 128-bit seed used to initialize the random number generator that orders
/// the tray. The same seed with the same catalog yields the same sequence of
/// tray orders across restarts, which makes games reproducible.
///
/// Seeds are written as hexadecimal strings. [`FromStr`] accepts up to 32 hex
/// digits (shorter strings are zero-padded on the left), while the serialized
/// form is always exactly 32 digits.
///
/// # Example
///
/// ```
/// use perfection_engine::{Catalog, GameSession, PuzzleSeed};
/// use rand::Rng as _;
///
/// let seed: PuzzleSeed = rand::rng().random();
///
/// let mut session1 = GameSession::with_seed(Catalog::shapes(), 60, seed).unwrap();
/// let mut session2 = GameSession::with_seed(Catalog::shapes(), 60, seed).unwrap();
/// session1.start().unwrap();
/// session2.start().unwrap();
///
/// assert_eq!(session1.pieces(), session2.pieces());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleSeed([u8; 16]);

impl PuzzleSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates the generator that shuffles trays for this seed.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl std::fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: seed is empty")]
    Empty,
    #[display("invalid hex: expected at most 32 characters, got {len}")]
    TooLong { len: usize },
    #[display("invalid hex: {input}")]
    InvalidDigit { input: String },
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseSeedError::Empty);
        }
        if s.len() > 32 {
            return Err(ParseSeedError::TooLong { len: s.len() });
        }
        // `from_str_radix` would also accept a leading sign
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidDigit {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PuzzleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for PuzzleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PuzzleSeed` values with `rng.random()`.
impl Distribution<PuzzleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PuzzleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PuzzleSeed(seed)
    }
}

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, PieceId, SlotId};

/// One kind of piece in a catalog, together with the slot it belongs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceKind {
    name: String,
    symbol: char,
    target_slot: SlotId,
}

impl PieceKind {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: char, target_slot: SlotId) -> Self {
        Self {
            name: name.into(),
            symbol,
            target_slot,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single-character glyph used by text front ends.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    #[must_use]
    pub const fn target_slot(&self) -> SlotId {
        self.target_slot
    }
}

/// The fixed set of piece kinds a puzzle is generated from.
///
/// A constructed catalog always maps its kinds one-to-one onto the slots
/// `0..len()`, so every slot has exactly one expected piece.
///
/// Catalogs can be read from JSON:
///
/// ```
/// use perfection_engine::{Catalog, SlotId};
///
/// let json = r##"{
///     "columns": 2,
///     "pieces": [
///         { "name": "circle", "symbol": "o", "target_slot": 1 },
///         { "name": "square", "symbol": "#", "target_slot": 0 }
///     ]
/// }"##;
/// let catalog: Catalog = serde_json::from_str(json).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.expected_piece(SlotId::new(0)).unwrap().index(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    columns: usize,
    kinds: Vec<PieceKind>,
}

/// On-disk form of a [`Catalog`], validated when converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    columns: usize,
    pieces: Vec<PieceKind>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = ConfigurationError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Self::new(file.columns, file.pieces)
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        Self {
            columns: catalog.columns,
            pieces: catalog.kinds,
        }
    }
}

const SHAPES: [(&str, char); 12] = [
    ("circle", '●'),
    ("square", '■'),
    ("triangle", '▲'),
    ("hexagon", '⬢'),
    ("star", '★'),
    ("diamond", '◆'),
    ("heart", '♥'),
    ("pentagon", '⬟'),
    ("octagon", '✸'),
    ("cross", '✚'),
    ("oval", '⬭'),
    ("trapezoid", '⏢'),
];

const SPRITE_COUNT: usize = 25;

impl Catalog {
    /// Builds a catalog, checking that target slots form a bijection onto `0..kinds.len()`
    /// and that the board is no wider than its number of slots.
    pub fn new(columns: usize, kinds: Vec<PieceKind>) -> Result<Self, ConfigurationError> {
        if columns == 0 {
            return Err(ConfigurationError::ZeroColumns);
        }
        if kinds.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let len = kinds.len();
        if columns > len {
            return Err(ConfigurationError::TooManyColumns { columns, len });
        }
        let mut claimed = vec![false; len];
        for kind in &kinds {
            let slot = kind.target_slot;
            let Some(seen) = claimed.get_mut(slot.index()) else {
                return Err(ConfigurationError::TargetSlotOutOfRange {
                    name: kind.name.clone(),
                    slot,
                    len,
                });
            };
            if *seen {
                return Err(ConfigurationError::DuplicateTargetSlot { slot });
            }
            *seen = true;
        }

        Ok(Self { columns, kinds })
    }

    /// The twelve geometric shapes on a four-column board.
    #[must_use]
    pub fn shapes() -> Self {
        let kinds = SHAPES
            .iter()
            .enumerate()
            .map(|(i, (name, symbol))| PieceKind::new(*name, *symbol, SlotId::new(i)))
            .collect();
        Self { columns: 4, kinds }
    }

    /// The twenty-five sprite tiles on a 5×5 board.
    #[must_use]
    pub fn sprites() -> Self {
        let kinds = (0..SPRITE_COUNT)
            .zip('A'..='Y')
            .map(|(i, symbol)| PieceKind::new(format!("shape{i}"), symbol, SlotId::new(i)))
            .collect();
        Self { columns: 5, kinds }
    }

    /// Number of piece kinds, which is also the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always `false` for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.len().div_ceil(self.columns)
    }

    #[must_use]
    pub fn kinds(&self) -> &[PieceKind] {
        &self.kinds
    }

    #[must_use]
    pub fn kind(&self, id: PieceId) -> Option<&PieceKind> {
        self.kinds.get(id.index())
    }

    #[must_use]
    pub fn contains_slot(&self, slot: SlotId) -> bool {
        slot.index() < self.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotId> + use<> {
        (0..self.len()).map(SlotId::new)
    }

    /// Returns the piece that belongs in `slot`.
    #[must_use]
    pub fn expected_piece(&self, slot: SlotId) -> Option<PieceId> {
        self.kinds
            .iter()
            .position(|kind| kind.target_slot == slot)
            .map(PieceId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str, slot: usize) -> PieceKind {
        PieceKind::new(name, '?', SlotId::new(slot))
    }

    #[test]
    fn test_builtin_catalogs_are_valid() {
        for catalog in [Catalog::shapes(), Catalog::sprites()] {
            let rebuilt = Catalog::new(catalog.columns(), catalog.kinds().to_vec());
            assert_eq!(rebuilt.as_ref(), Ok(&catalog));
        }
        assert_eq!(Catalog::shapes().len(), 12);
        assert_eq!(Catalog::shapes().rows(), 3);
        assert_eq!(Catalog::sprites().len(), 25);
        assert_eq!(Catalog::sprites().rows(), 5);
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert_eq!(
            Catalog::new(4, vec![]),
            Err(ConfigurationError::EmptyCatalog)
        );
    }

    #[test]
    fn test_zero_columns_is_rejected() {
        assert_eq!(
            Catalog::new(0, vec![kind("a", 0)]),
            Err(ConfigurationError::ZeroColumns)
        );
    }

    #[test]
    fn test_more_columns_than_slots_is_rejected() {
        assert_eq!(
            Catalog::new(3, vec![kind("a", 0), kind("b", 1)]),
            Err(ConfigurationError::TooManyColumns { columns: 3, len: 2 })
        );
        assert!(Catalog::new(2, vec![kind("a", 0), kind("b", 1)]).is_ok());
    }

    #[test]
    fn test_wide_json_catalog_is_rejected() {
        let json = r#"{"columns":10000,"pieces":[{"name":"a","symbol":"a","target_slot":0}]}"#;
        let err = serde_json::from_str::<Catalog>(json).unwrap_err();
        assert!(err.to_string().contains("10000 columns but only 1 slots"));
    }

    #[test]
    fn test_duplicate_target_slot_is_rejected() {
        let result = Catalog::new(2, vec![kind("a", 1), kind("b", 1)]);
        assert_eq!(
            result,
            Err(ConfigurationError::DuplicateTargetSlot {
                slot: SlotId::new(1)
            })
        );
    }

    #[test]
    fn test_out_of_range_target_slot_is_rejected() {
        let result = Catalog::new(2, vec![kind("a", 0), kind("b", 2)]);
        assert_eq!(
            result,
            Err(ConfigurationError::TargetSlotOutOfRange {
                name: "b".to_owned(),
                slot: SlotId::new(2),
                len: 2,
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            r#"piece "b" targets slot-2, but the board only has 2 slots"#
        );
    }

    #[test]
    fn test_expected_piece_follows_target_slots() {
        let catalog = Catalog::new(3, vec![kind("a", 2), kind("b", 0), kind("c", 1)]).unwrap();
        assert_eq!(catalog.expected_piece(SlotId::new(0)), Some(PieceId::new(1)));
        assert_eq!(catalog.expected_piece(SlotId::new(1)), Some(PieceId::new(2)));
        assert_eq!(catalog.expected_piece(SlotId::new(2)), Some(PieceId::new(0)));
        assert_eq!(catalog.expected_piece(SlotId::new(3)), None);
        assert!(!catalog.contains_slot(SlotId::new(3)));
    }

    #[test]
    fn test_json_catalog_is_validated() {
        let json = r#"{"columns":1,"pieces":[
            {"name":"a","symbol":"a","target_slot":0},
            {"name":"b","symbol":"b","target_slot":0}
        ]}"#;
        let err = serde_json::from_str::<Catalog>(json).unwrap_err();
        assert!(err.to_string().contains("claimed by more than one piece"));
    }

    #[test]
    fn test_json_catalog_roundtrip() {
        let catalog = Catalog::shapes();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with(r#"{"columns":4,"pieces":["#));
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}

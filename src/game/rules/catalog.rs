//! Piece catalog
//!
//! Static table mapping each [`PieceKind`] to its movement geometry. A rule is
//! a set of base offsets plus a range: how many times one offset may be
//! repeated in a single move. Leaping pieces (Hero3) encode the whole leap in
//! the offset and use a range of 1.

use crate::game::error::ConfigError;
use crate::game::types::PieceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relative displacement `(dx, dy)`: `dx` along columns, `dy` along rows
///
/// Serialized as a two-element array, e.g. `[0, -1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset(pub i8, pub i8);

impl Offset {
    pub fn dx(self) -> i8 {
        self.0
    }

    pub fn dy(self) -> i8 {
        self.1
    }
}

/// Movement rule for one piece kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRule {
    pub offsets: Vec<Offset>,
    pub range: u8,
}

impl MoveRule {
    fn new(offsets: &[(i8, i8)], range: u8) -> Self {
        Self {
            offsets: offsets.iter().map(|&(dx, dy)| Offset(dx, dy)).collect(),
            range,
        }
    }

    fn validate(&self, kind: PieceKind) -> Result<(), ConfigError> {
        if self.range == 0 {
            return Err(ConfigError::ZeroRange { kind });
        }
        if self.offsets.is_empty() || self.offsets.iter().any(|o| *o == Offset(0, 0)) {
            return Err(ConfigError::InvalidOffsets { kind });
        }
        Ok(())
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const L_LEAPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Lookup table from piece kind to movement rule
///
/// Serialized as a JSON object keyed by the piece tag:
///
/// ```json
/// { "P": { "offsets": [[0, -1], [0, 1], [-1, 0], [1, 0]], "range": 1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceCatalog {
    rules: BTreeMap<PieceKind, MoveRule>,
}

impl Default for PieceCatalog {
    fn default() -> Self {
        let rules = BTreeMap::from([
            (PieceKind::Pawn, MoveRule::new(&ORTHOGONAL, 1)),
            (PieceKind::Hero1, MoveRule::new(&ORTHOGONAL, 2)),
            (PieceKind::Hero2, MoveRule::new(&DIAGONAL, 2)),
            (PieceKind::Hero3, MoveRule::new(&L_LEAPS, 1)),
        ]);
        Self { rules }
    }
}

impl PieceCatalog {
    /// Build a catalog from explicit rules, validating each one
    pub fn from_rules(
        rules: impl IntoIterator<Item = (PieceKind, MoveRule)>,
    ) -> Result<Self, ConfigError> {
        let catalog = Self {
            rules: rules.into_iter().collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every rule for a zero range or a degenerate offset set
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules
            .iter()
            .try_for_each(|(kind, rule)| rule.validate(*kind))
    }

    /// Movement rule for `kind`, `None` if the catalog does not define it
    pub fn rules(&self, kind: PieceKind) -> Option<&MoveRule> {
        self.rules.get(&kind)
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.rules.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.rules.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_ranges() {
        let catalog = PieceCatalog::default();
        assert_eq!(catalog.rules(PieceKind::Pawn).unwrap().range, 1);
        assert_eq!(catalog.rules(PieceKind::Hero1).unwrap().range, 2);
        assert_eq!(catalog.rules(PieceKind::Hero2).unwrap().range, 2);
        assert_eq!(catalog.rules(PieceKind::Hero3).unwrap().range, 1);
        assert_eq!(catalog.rules(PieceKind::Hero3).unwrap().offsets.len(), 8);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_zero_range_rejected() {
        let result = PieceCatalog::from_rules([(PieceKind::Pawn, MoveRule::new(&ORTHOGONAL, 0))]);
        assert_eq!(
            result,
            Err(ConfigError::ZeroRange {
                kind: PieceKind::Pawn
            })
        );
    }

    #[test]
    fn test_empty_or_null_offsets_rejected() {
        let empty = PieceCatalog::from_rules([(PieceKind::Hero2, MoveRule::new(&[], 1))]);
        assert_eq!(
            empty,
            Err(ConfigError::InvalidOffsets {
                kind: PieceKind::Hero2
            })
        );

        let null = PieceCatalog::from_rules([(PieceKind::Hero2, MoveRule::new(&[(0, 0)], 1))]);
        assert!(null.is_err());
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"{ "P": { "offsets": [[0, -1], [1, 0]], "range": 3 } }"#;
        let catalog: PieceCatalog = serde_json::from_str(json).unwrap();
        let rule = catalog.rules(PieceKind::Pawn).unwrap();
        assert_eq!(rule.range, 3);
        assert_eq!(rule.offsets, vec![Offset(0, -1), Offset(1, 0)]);
        assert!(!catalog.contains(PieceKind::Hero1));
    }
}

//! Ruleset persistence
//!
//! Loads the piece catalog and starting placement from a JSON file. Both
//! sections are optional and fall back to the built-in defaults:
//!
//! ```json
//! {
//!   "catalog": { "P": { "offsets": [[0, -1], [0, 1], [-1, 0], [1, 0]], "range": 1 } },
//!   "setup": [
//!     { "id": "A-P1", "type": "P", "player": "A", "position": { "row": 0, "col": 0 } },
//!     { "id": "B-P1", "type": "P", "player": "B", "position": { "row": 4, "col": 4 } }
//!   ]
//! }
//! ```
//!
//! # Error Handling
//!
//! Unlike move proposals, a bad ruleset is fatal: [`RuleSet::load`] validates
//! the catalog and builds the starting board once, so a piece type missing
//! from the catalog is reported before the server accepts any connection.

use super::error::CoreResult;
use crate::game::rules::{PieceCatalog, Setup};
use crate::game::{GameResult, GameSession};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Catalog plus starting placement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub catalog: PieceCatalog,
    pub setup: Setup,
}

impl RuleSet {
    /// Read and validate a ruleset file
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let ruleset = Self::from_json(&contents)?;
        info!(
            "[RULESET] Loaded {} piece kinds and {} placements from {:?}",
            ruleset.catalog.kinds().count(),
            ruleset.setup.placements().len(),
            path
        );
        Ok(ruleset)
    }

    /// Parse and validate a ruleset from a JSON string
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let ruleset: RuleSet = serde_json::from_str(json)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Check the catalog and that the placement builds a legal board
    pub fn validate(&self) -> CoreResult<()> {
        self.catalog.validate()?;
        self.setup.build(&self.catalog)?;
        Ok(())
    }

    /// Fresh game using this ruleset
    pub fn new_session(&self) -> GameResult<GameSession> {
        GameSession::new(self.catalog.clone(), &self.setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreError;
    use crate::game::types::{PieceKind, Player};
    use crate::game::ConfigError;

    #[test]
    fn test_empty_object_uses_defaults() {
        let ruleset = RuleSet::from_json("{}").unwrap();
        assert_eq!(ruleset, RuleSet::default());
        assert_eq!(ruleset.setup.placements().len(), 10);
    }

    #[test]
    fn test_custom_setup() {
        let json = r#"{
            "setup": [
                { "id": "A-P1", "type": "P", "player": "A", "position": { "row": 0, "col": 0 } },
                { "id": "B-H1", "type": "H1", "player": "B", "position": { "row": 4, "col": 4 } }
            ]
        }"#;

        let ruleset = RuleSet::from_json(json).unwrap();
        let session = ruleset.new_session().unwrap();

        assert_eq!(session.board().count_pieces(Player::A), 1);
        assert_eq!(session.board().count_pieces(Player::B), 1);
    }

    #[test]
    fn test_missing_catalog_entry_is_rejected() {
        let json = r#"{
            "catalog": { "P": { "offsets": [[0, 1]], "range": 1 } },
            "setup": [
                { "id": "A-H2", "type": "H2", "player": "A", "position": { "row": 0, "col": 0 } }
            ]
        }"#;

        let err = RuleSet::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::RulesetInvalid(ConfigError::UnknownPieceType {
                kind: PieceKind::Hero2,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_tag_is_parse_error() {
        let json = r#"{ "catalog": { "Q": { "offsets": [[0, 1]], "range": 1 } } }"#;
        assert!(matches!(
            RuleSet::from_json(json),
            Err(CoreError::RulesetSerialization(_))
        ));
    }

    #[test]
    fn test_off_board_placement_is_parse_error() {
        let json = r#"{
            "setup": [
                { "id": "A-P1", "type": "P", "player": "A", "position": { "row": 5, "col": 0 } }
            ]
        }"#;
        assert!(RuleSet::from_json(json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuleSet::load("/definitely/not/here/ruleset.json");
        assert!(matches!(result, Err(CoreError::RulesetIo(_))));
    }
}

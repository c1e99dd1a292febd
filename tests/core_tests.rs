//! Core Module Integration Tests
//!
//! Ruleset loading from disk and the sessions it produces.

use gridduel::core::{CoreError, RuleSet};
use gridduel::game::types::{Coord, PieceId, PieceKind, Player};
use gridduel::game::ConfigError;
use std::fs;
use std::path::PathBuf;

/// Unique path in the system temp dir, removed on drop
struct TempFile(PathBuf);

impl TempFile {
    fn with_contents(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "gridduel-{}-{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).expect("Failed to write temp file");
        TempFile(path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn sq(row: u8, col: u8) -> Coord {
    Coord::new(row, col).unwrap()
}

#[test]
fn test_load_ruleset_from_file() {
    let file = TempFile::with_contents(
        "long-pawns",
        r#"{
            "catalog": { "P": { "offsets": [[1, 0], [-1, 0]], "range": 3 } },
            "setup": [
                { "id": "A-P1", "type": "P", "player": "A", "position": { "row": 0, "col": 0 } },
                { "id": "B-P1", "type": "P", "player": "B", "position": { "row": 4, "col": 4 } }
            ]
        }"#,
    );

    let ruleset = RuleSet::load(&file.0).expect("Ruleset should load");
    let mut session = ruleset.new_session().unwrap();

    let hints = session
        .legal_destinations_for(&PieceId::from("A-P1"))
        .unwrap();
    assert_eq!(hints, vec![sq(0, 1), sq(0, 2), sq(0, 3)]);

    session.propose_move("A-P1", sq(0, 0), sq(0, 3)).unwrap();
    assert_eq!(session.current_player(), Player::B);
}

#[test]
fn test_empty_ruleset_uses_defaults() {
    let file = TempFile::with_contents("empty", "{}");

    let ruleset = RuleSet::load(&file.0).unwrap();

    assert_eq!(ruleset, RuleSet::default());
    let session = ruleset.new_session().unwrap();
    assert_eq!(session.board().pieces().len(), 10);
    assert_eq!(session.board().count_pieces(Player::A), 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("gridduel-does-not-exist.json");

    let err = RuleSet::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::RulesetIo(_)));
}

#[test]
fn test_bad_json_is_serialization_error() {
    let file = TempFile::with_contents("bad-json", "{ not json");

    let err = RuleSet::load(&file.0).unwrap_err();
    assert!(matches!(err, CoreError::RulesetSerialization(_)));
}

#[test]
fn test_setup_with_uncatalogued_kind_is_rejected() {
    let file = TempFile::with_contents(
        "no-heroes",
        r#"{
            "catalog": { "P": { "offsets": [[1, 0]], "range": 1 } },
            "setup": [
                { "id": "A-H1", "type": "H1", "player": "A", "position": { "row": 0, "col": 0 } },
                { "id": "B-P1", "type": "P", "player": "B", "position": { "row": 4, "col": 4 } }
            ]
        }"#,
    );

    let err = RuleSet::load(&file.0).unwrap_err();
    match err {
        CoreError::RulesetInvalid(ConfigError::UnknownPieceType { kind, .. }) => {
            assert_eq!(kind, PieceKind::Hero1);
        }
        other => panic!("Expected UnknownPieceType, got {:?}", other),
    }
}

#[test]
fn test_overlapping_setup_is_rejected() {
    let err = RuleSet::from_json(
        r#"{
            "setup": [
                { "id": "A-P1", "type": "P", "player": "A", "position": { "row": 2, "col": 2 } },
                { "id": "B-P1", "type": "P", "player": "B", "position": { "row": 2, "col": 2 } }
            ]
        }"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::RulesetInvalid(ConfigError::SquareOccupied { .. })
    ));
}

#[test]
fn test_off_board_placement_is_rejected() {
    let err = RuleSet::from_json(
        r#"{
            "setup": [
                { "id": "A-P1", "type": "P", "player": "A", "position": { "row": 5, "col": 0 } }
            ]
        }"#,
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::RulesetSerialization(_)));
}

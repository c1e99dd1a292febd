//! Error types for game module
//!
//! Provides the rejection taxonomy for move proposals and the configuration
//! errors raised while building a session from a ruleset.

use crate::game::types::{Coord, PieceId, PieceKind};
use serde::{Deserialize, Serialize};

/// Why a move proposal was dropped
///
/// Every variant is recovered locally: the proposal is discarded and the
/// session state is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveRejection {
    /// The named piece is not on the board (never existed or was captured)
    #[error("No such piece")]
    NoSuchPiece,

    /// The piece belongs to the player who is not on move
    #[error("Not your turn")]
    NotYourTurn,

    /// The proposal's `from` does not match the piece's recorded position
    #[error("Stale position")]
    StalePosition,

    /// `to` is not among the piece's legal destinations
    #[error("Illegal destination")]
    IllegalDestination,

    /// Structurally invalid message; never reaches the controller
    #[error("Malformed proposal")]
    MalformedProposal,

    /// The game is already won and waiting for its reset
    #[error("Game over")]
    GameOver,
}

/// Ruleset problems detected before a session starts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A placement references a piece type the catalog does not define
    #[error("Unknown piece type {kind} for piece {id}")]
    UnknownPieceType { id: PieceId, kind: PieceKind },

    /// A catalog rule allows zero repetitions
    #[error("Piece type {kind} has a range of zero")]
    ZeroRange { kind: PieceKind },

    /// A catalog rule has no offsets, or a zero offset
    #[error("Piece type {kind} has an invalid offset set")]
    InvalidOffsets { kind: PieceKind },

    /// Two placements share an id
    #[error("Duplicate piece id {id}")]
    DuplicatePieceId { id: PieceId },

    /// Two placements share a square
    #[error("Square {square} is occupied by both {first} and {second}")]
    SquareOccupied {
        square: Coord,
        first: PieceId,
        second: PieceId,
    },
}

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A move proposal was rejected
    #[error("Move rejected: {0}")]
    Rejected(#[from] MoveRejection),

    /// The ruleset could not be turned into a valid starting position
    #[error("Invalid ruleset: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;

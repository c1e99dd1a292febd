//! Type definitions for the 5×5 grid game
//!
//! Provides newtype patterns for coordinates, players and piece identifiers so
//! the rules code cannot mix up rows and columns or hand out a square that
//! lies outside the board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows and columns on the board
pub const BOARD_SIZE: u8 = 5;

/// Board square position (row, col)
///
/// Origin `(0, 0)` is the top-left cell; `row` grows toward the higher-row
/// side of the board and `col` grows rightward. Only [`Coord::new`] and
/// [`Coord::offset`] build values, both of which refuse anything outside
/// `[0, 4] × [0, 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, returning `None` if it lies off the board
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridduel::game::types::Coord;
    ///
    /// assert!(Coord::new(4, 4).is_some());
    /// assert!(Coord::new(5, 0).is_none());
    /// ```
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Apply a displacement `steps` times, `None` if the result leaves the grid
    ///
    /// `dx` moves along columns, `dy` along rows.
    pub fn offset(self, dx: i8, dy: i8, steps: u8) -> Option<Self> {
        let steps = i16::from(steps);
        let row = i16::from(self.row) + i16::from(dy) * steps;
        let col = i16::from(self.col) + i16::from(dx) * steps;
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    /// Iterate every square on the board in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            row: u8,
            col: u8,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coord::new(raw.row, raw.col).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "coordinate ({}, {}) is outside the {BOARD_SIZE}x{BOARD_SIZE} board",
                raw.row, raw.col
            ))
        })
    }
}

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// The side that moves first in a fresh game
    pub const FIRST: Player = Player::A;

    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => f.write_str("A"),
            Player::B => f.write_str("B"),
        }
    }
}

/// Piece rule-set identifier
///
/// Serialized with the short tags used on the wire and in ruleset files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    #[serde(rename = "P")]
    Pawn,
    #[serde(rename = "H1")]
    Hero1,
    #[serde(rename = "H2")]
    Hero2,
    #[serde(rename = "H3")]
    Hero3,
}

impl PieceKind {
    pub fn tag(self) -> &'static str {
        match self {
            PieceKind::Pawn => "P",
            PieceKind::Hero1 => "H1",
            PieceKind::Hero2 => "H2",
            PieceKind::Hero3 => "H3",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Hero1 => "Hero1",
            PieceKind::Hero2 => "Hero2",
            PieceKind::Hero3 => "Hero3",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Stable piece identity, e.g. `"A-P2"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PieceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A piece on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub player: Player,
    pub position: Coord,
}

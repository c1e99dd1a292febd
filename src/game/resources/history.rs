//! Move history tracking
//!
//! Maintains the chronological, append-only record of accepted moves. Entries
//! are never mutated or reordered once appended; the only way to drop them is
//! resetting the whole game.

use crate::game::types::{Coord, PieceId, PieceKind, Player};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One accepted move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub piece: PieceId,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub from: Coord,
    pub to: Coord,
    /// Zero-based ordinal within the current game
    pub index: usize,
}

impl MoveRecord {
    /// Compass notation for the move
    ///
    /// `F`/`B` follow the row axis (forward is toward row 0), `L`/`R` the
    /// column axis, and two-letter codes the diagonals. Anything that is not a
    /// straight or diagonal line (the Hero3 leap) is reported as `J`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // Pawn from (1, 0) to (1, 1)
    /// assert_eq!(record.direction(), "R");
    /// ```
    pub fn direction(&self) -> &'static str {
        let d_row = i16::from(self.to.row()) - i16::from(self.from.row());
        let d_col = i16::from(self.to.col()) - i16::from(self.from.col());

        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return "J";
        }

        match (d_row.signum(), d_col.signum()) {
            (-1, 0) => "F",
            (1, 0) => "B",
            (0, -1) => "L",
            (0, 1) => "R",
            (-1, -1) => "FL",
            (-1, 1) => "FR",
            (1, -1) => "BL",
            (1, 1) => "BR",
            _ => "J",
        }
    }

    /// Short form used in move lists, e.g. `A-P2: R`
    pub fn notation(&self) -> String {
        format!("{}: {}", self.piece, self.direction())
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player {} moved {} from {} to {}",
            self.player, self.piece, self.from, self.to
        )
    }
}

/// Complete move history for the current game
///
/// Serialized as a plain list of [`MoveRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Append a move, assigning the next ordinal
    pub(crate) fn record(
        &mut self,
        player: Player,
        piece: PieceId,
        kind: PieceKind,
        from: Coord,
        to: Coord,
    ) -> &MoveRecord {
        let index = self.moves.len();
        self.moves.push(MoveRecord {
            player,
            piece,
            kind,
            from,
            to,
            index,
        });
        &self.moves[index]
    }

    /// Get the most recent move, if any
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Number of moves made in the current game
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MoveRecord> {
        self.moves.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Clear all move history (for starting a new game)
    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }
}

//! Initial placement
//!
//! Player A lines up on column 0, player B mirrors it on column 4. The
//! placement is checked against the catalog when a session is built, so an
//! unknown piece type fails at session start instead of mid-game.

use super::board_state::BoardState;
use super::catalog::PieceCatalog;
use crate::game::error::ConfigError;
use crate::game::types::{Coord, Piece, PieceId, PieceKind, Player};
use serde::{Deserialize, Serialize};

/// Ordered list of starting pieces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Setup {
    placements: Vec<Piece>,
}

impl Default for Setup {
    fn default() -> Self {
        let line = [
            (0, PieceKind::Hero3, "H3"),
            (1, PieceKind::Pawn, "P2"),
            (2, PieceKind::Hero1, "H1"),
            (3, PieceKind::Hero2, "H2"),
            (4, PieceKind::Pawn, "P3"),
        ];

        let placements = [(Player::A, 0), (Player::B, 4)]
            .into_iter()
            .flat_map(|(player, col)| {
                line.iter().filter_map(move |&(row, kind, suffix)| {
                    Some(Piece {
                        id: PieceId::new(format!("{player}-{suffix}")),
                        kind,
                        player,
                        position: Coord::new(row, col)?,
                    })
                })
            })
            .collect();

        Self { placements }
    }
}

impl Setup {
    pub fn new(placements: Vec<Piece>) -> Self {
        Self { placements }
    }

    pub fn placements(&self) -> &[Piece] {
        &self.placements
    }

    /// Build the starting board, rejecting kinds the catalog does not define
    pub fn build(&self, catalog: &PieceCatalog) -> Result<BoardState, ConfigError> {
        if let Some(piece) = self.placements.iter().find(|p| !catalog.contains(p.kind)) {
            return Err(ConfigError::UnknownPieceType {
                id: piece.id.clone(),
                kind: piece.kind,
            });
        }
        BoardState::from_pieces(self.placements.iter().cloned())
    }
}

//! Board state representation
//!
//! The canonical 5×5 grid plus the `id → Piece` mapping. Both halves are
//! private and only ever changed together inside one `&mut self` method, so
//! any observer holding a `&BoardState` sees a consistent position:
//!
//! - every occupied cell `(r, c)` names a piece whose position is `(r, c)`
//! - every mapped piece's cell names exactly that piece

use crate::game::error::ConfigError;
use crate::game::types::{Coord, Piece, PieceId, Player, BOARD_SIZE};
use std::collections::BTreeMap;

const SIZE: usize = BOARD_SIZE as usize;

/// Grid cells, indexed `[row][col]`
pub type Grid = [[Option<PieceId>; SIZE]; SIZE];

/// Represents the authoritative state of the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    grid: Grid,
    pieces: BTreeMap<PieceId, Piece>,
}

impl BoardState {
    /// Build a board from a list of pieces
    ///
    /// Fails on duplicate ids or two pieces sharing a square. Catalog checks
    /// happen one level up, in [`crate::game::rules::Setup::build`].
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Result<Self, ConfigError> {
        let mut board = Self::default();
        for piece in pieces {
            if board.pieces.contains_key(&piece.id) {
                return Err(ConfigError::DuplicatePieceId { id: piece.id });
            }
            if let Some(first) = board.piece_id_at(piece.position) {
                return Err(ConfigError::SquareOccupied {
                    square: piece.position,
                    first: first.clone(),
                    second: piece.id,
                });
            }
            *board.cell_mut(piece.position) = Some(piece.id.clone());
            board.pieces.insert(piece.id.clone(), piece);
        }
        Ok(board)
    }

    pub fn is_empty(&self, pos: Coord) -> bool {
        self.cell(pos).is_none()
    }

    pub fn piece_id_at(&self, pos: Coord) -> Option<&PieceId> {
        self.cell(pos).as_ref()
    }

    pub fn piece_at(&self, pos: Coord) -> Option<&Piece> {
        self.piece_id_at(pos).and_then(|id| self.pieces.get(id))
    }

    /// Owner of the piece on `pos`, if any
    pub fn get_piece_owner(&self, pos: Coord) -> Option<Player> {
        self.piece_at(pos).map(|piece| piece.player)
    }

    pub fn piece(&self, id: &PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn pieces(&self) -> &BTreeMap<PieceId, Piece> {
        &self.pieces
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of pieces `player` still has on the board
    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces.values().filter(|p| p.player == player).count()
    }

    /// Move `id` to `to`, removing whatever stood there
    ///
    /// Returns the removed piece. Legality is the caller's concern; this only
    /// keeps grid and mapping in step. `None` is returned and nothing changes
    /// when `id` is not on the board.
    pub(crate) fn relocate(&mut self, id: &PieceId, to: Coord) -> Option<Option<Piece>> {
        let from = self.pieces.get(id)?.position;

        let captured = match self.cell_mut(to).take() {
            Some(victim) if victim != *id => self.pieces.remove(&victim),
            _ => None,
        };

        *self.cell_mut(from) = None;
        *self.cell_mut(to) = Some(id.clone());
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.position = to;
        }

        Some(captured)
    }

    /// Check the grid/mapping invariant; used by tests and debug assertions
    pub fn is_consistent(&self) -> bool {
        let cells_match = Coord::all().all(|pos| match self.piece_id_at(pos) {
            Some(id) => self.pieces.get(id).is_some_and(|p| p.position == pos),
            None => true,
        });
        let pieces_match = self
            .pieces
            .iter()
            .all(|(id, piece)| &piece.id == id && self.piece_id_at(piece.position) == Some(id));
        cells_match && pieces_match
    }

    fn cell(&self, pos: Coord) -> &Option<PieceId> {
        &self.grid[usize::from(pos.row())][usize::from(pos.col())]
    }

    fn cell_mut(&mut self, pos: Coord) -> &mut Option<PieceId> {
        &mut self.grid[usize::from(pos.row())][usize::from(pos.col())]
    }
}

//! Piece movement rules
//!
//! Computes legal destinations from the catalog geometry. Pure functions with
//! no side effects and no notion of whose turn it is, so the same code serves
//! authoritative validation and client-side move hints.

use super::board_state::BoardState;
use super::catalog::PieceCatalog;
use crate::game::types::{Coord, PieceKind, Player};

/// Get all legal destinations for a piece
///
/// For every offset the piece slides `1..=range` steps. Leaving the board or
/// meeting an own piece ends the slide without a destination; an empty square
/// is a destination and the slide continues; an opponent's square is a
/// capturing destination and ends the slide.
///
/// Returns an empty list when the catalog has no rule for `kind`.
pub fn legal_destinations(
    board: &BoardState,
    catalog: &PieceCatalog,
    origin: Coord,
    kind: PieceKind,
    owner: Player,
) -> Vec<Coord> {
    let Some(rule) = catalog.rules(kind) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    for offset in &rule.offsets {
        for step in 1..=rule.range {
            let Some(candidate) = origin.offset(offset.dx(), offset.dy(), step) else {
                break;
            };

            match board.get_piece_owner(candidate) {
                None => moves.push(candidate),
                Some(occupant) if occupant == owner => break,
                Some(_) => {
                    moves.push(candidate);
                    break;
                }
            }
        }
    }

    moves.sort_unstable();
    moves.dedup();
    moves
}

/// Check if `to` is a legal destination for the given piece
pub fn is_valid_move(
    board: &BoardState,
    catalog: &PieceCatalog,
    origin: Coord,
    to: Coord,
    kind: PieceKind,
    owner: Player,
) -> bool {
    legal_destinations(board, catalog, origin, kind, owner).contains(&to)
}

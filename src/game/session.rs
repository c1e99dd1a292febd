//! Turn & capture controller
//!
//! [`GameSession`] owns one game's board, turn, history and end state, and is
//! the only place they change. A proposal goes through every check before
//! anything is touched, so a rejected proposal leaves the session exactly as
//! it was and an accepted one is applied as a single transition:
//!
//! 1. `NoSuchPiece` - the id is not on the board
//! 2. `NotYourTurn` - the piece's owner is not on move
//! 3. `StalePosition` - `from` differs from the piece's recorded square
//! 4. `IllegalDestination` - `to` is not a legal destination
//! 5. capture, move, append history
//! 6. win check on the non-mover, then turn flip if nobody won

use crate::game::error::{GameResult, MoveRejection};
use crate::game::resources::{CurrentTurn, GameOverState, MoveHistory, MoveRecord};
use crate::game::rules::{legal_destinations, BoardState, PieceCatalog, Setup};
use crate::game::types::{Coord, Piece, PieceId, Player};
use serde::{Deserialize, Serialize};

/// An unvalidated move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveProposal {
    pub id: PieceId,
    pub from: Coord,
    pub to: Coord,
}

impl MoveProposal {
    pub fn new(id: impl Into<PieceId>, from: Coord, to: Coord) -> Self {
        Self {
            id: id.into(),
            from,
            to,
        }
    }
}

/// Result of an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The history entry appended for this move
    pub record: MoveRecord,
    /// Opponent piece removed by the move, if any
    pub captured: Option<Piece>,
    /// Set when the move eliminated the opponent's last piece
    pub winner: Option<Player>,
}

/// Authoritative state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    catalog: PieceCatalog,
    initial: BoardState,
    board: BoardState,
    turn: CurrentTurn,
    history: MoveHistory,
    game_over: GameOverState,
}

impl GameSession {
    /// Build a session from a catalog and a starting placement
    ///
    /// This is where configuration errors surface: an invalid catalog rule or
    /// a placement naming a kind the catalog lacks fails here, before any
    /// move is played.
    pub fn new(catalog: PieceCatalog, setup: &Setup) -> GameResult<Self> {
        catalog.validate()?;
        let initial = setup.build(&catalog)?;
        Ok(Self {
            catalog,
            board: initial.clone(),
            initial,
            turn: CurrentTurn::default(),
            history: MoveHistory::default(),
            game_over: GameOverState::Playing,
        })
    }

    /// Session with the default catalog and placement
    pub fn standard() -> GameResult<Self> {
        Self::new(PieceCatalog::default(), &Setup::default())
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    /// Player to move next
    pub fn current_player(&self) -> Player {
        self.turn.player()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn game_over(&self) -> GameOverState {
        self.game_over
    }

    /// Legal destinations for a piece, ignoring whose turn it is
    ///
    /// Intended for move hints; `None` if the piece is not on the board.
    pub fn legal_destinations_for(&self, id: &PieceId) -> Option<Vec<Coord>> {
        let piece = self.board.piece(id)?;
        Some(legal_destinations(
            &self.board,
            &self.catalog,
            piece.position,
            piece.kind,
            piece.player,
        ))
    }

    /// Convenience wrapper around [`GameSession::apply_move`]
    pub fn propose_move(
        &mut self,
        id: impl Into<PieceId>,
        from: Coord,
        to: Coord,
    ) -> Result<MoveOutcome, MoveRejection> {
        self.apply_move(&MoveProposal::new(id, from, to))
    }

    /// Validate and apply a proposal
    pub fn apply_move(&mut self, proposal: &MoveProposal) -> Result<MoveOutcome, MoveRejection> {
        if self.game_over.is_game_over() {
            return Err(MoveRejection::GameOver);
        }

        let piece = self
            .board
            .piece(&proposal.id)
            .ok_or(MoveRejection::NoSuchPiece)?;

        let mover = self.turn.player();
        if piece.player != mover {
            return Err(MoveRejection::NotYourTurn);
        }

        if piece.position != proposal.from {
            return Err(MoveRejection::StalePosition);
        }

        let kind = piece.kind;
        let legal = legal_destinations(&self.board, &self.catalog, piece.position, kind, mover);
        if !legal.contains(&proposal.to) {
            return Err(MoveRejection::IllegalDestination);
        }

        // Every check passed; from here on the transition runs to completion.
        let captured = self
            .board
            .relocate(&proposal.id, proposal.to)
            .ok_or(MoveRejection::NoSuchPiece)?;

        let record = self
            .history
            .record(mover, proposal.id.clone(), kind, proposal.from, proposal.to)
            .clone();

        // Only the mover can capture, so only the non-mover can be eliminated.
        let winner = (self.board.count_pieces(mover.opponent()) == 0).then_some(mover);
        match winner {
            Some(player) => self.game_over = GameOverState::Won(player),
            None => self.turn.switch(),
        }

        debug_assert!(self.board.is_consistent());

        Ok(MoveOutcome {
            record,
            captured,
            winner,
        })
    }

    /// Restore the starting placement with player A to move
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
        self.turn.reset();
        self.history.clear();
        self.game_over = GameOverState::Playing;
    }
}

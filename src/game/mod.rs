//! Game logic module - authoritative engine for the 5×5 grid game
//!
//! Pure game logic with no networking or rendering, so it can be embedded in
//! the server and in any client that wants local move hints.
//!
//! # Module Organization
//!
//! - `types` - Coordinates, players, piece kinds and piece records
//! - `rules` - Piece catalog, board state, legality engine, starting setup
//! - `resources` - Turn, move history, game-over state and win tally
//! - `session` - Turn & capture controller ([`GameSession`])
//! - `error` - Rejection taxonomy and configuration errors
//!
//! # Example
//!
//! ```rust
//! use gridduel::game::{GameSession, types::{Coord, Player}};
//!
//! let mut session = GameSession::standard().unwrap();
//! let from = Coord::new(1, 0).unwrap();
//! let to = Coord::new(1, 1).unwrap();
//!
//! session.propose_move("A-P2", from, to).unwrap();
//! assert_eq!(session.current_player(), Player::B);
//! ```

pub mod error;
pub mod resources;
pub mod rules;
pub mod session;
pub mod types;

pub use error::{ConfigError, GameError, GameResult, MoveRejection};
pub use session::{GameSession, MoveOutcome, MoveProposal};

//! Per-game state beyond the board itself
//!
//! - `turn` - Whose move it is
//! - `history` - Append-only move record
//! - `game_over` - Win state and the session win tally

pub mod game_over;
pub mod history;
pub mod turn;

pub use game_over::{GameOverState, Scoreboard};
pub use history::{MoveHistory, MoveRecord};
pub use turn::CurrentTurn;

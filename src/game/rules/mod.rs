//! Game rules module - Pure game logic without I/O coupling
//!
//! Implements the piece catalog, the board representation and move
//! validation as pure functions and plain data, so the same code can back the
//! authoritative server and any client that wants to highlight legal squares.
//!
//! # Module Structure
//!
//! - `catalog` - Movement geometry (offsets and range) per piece kind
//! - `board_state` - Grid plus piece mapping, updated as one unit
//! - `piece_moves` - Legal destination generation
//! - `setup` - Starting placement, validated against the catalog

pub mod board_state;
pub mod catalog;
pub mod piece_moves;
pub mod setup;


// Re-export commonly used items
pub use board_state::{BoardState, Grid};
pub use catalog::{MoveRule, Offset, PieceCatalog};
pub use piece_moves::{is_valid_move, legal_destinations};
pub use setup::Setup;

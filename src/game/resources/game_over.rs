//! Game over state tracking
//!
//! The only end condition is elimination: a side with no pieces left loses.
//! Once a winner is recorded the board is frozen until the session resets.

use crate::game::types::Player;
use serde::{Deserialize, Serialize};

/// End state of the current game
///
/// # State Transitions
///
/// ```text
/// Playing → Won(player) → (reset) → Playing
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverState {
    /// Game is still in progress
    #[default]
    Playing,

    /// The named player eliminated every opposing piece
    Won(Player),
}

impl GameOverState {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameOverState::Playing)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOverState::Playing => None,
            GameOverState::Won(player) => Some(*player),
        }
    }

    /// Human-readable result line
    pub fn message(&self) -> String {
        match self {
            GameOverState::Playing => "Game in progress".to_string(),
            GameOverState::Won(player) => format!("Player {player} wins!"),
        }
    }
}

/// Running win tally for one session
///
/// Kept in memory only; it restarts with the process.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
}

impl Scoreboard {
    pub fn record_win(&mut self, winner: Player) {
        match winner {
            Player::A => self.a += 1,
            Player::B => self.b += 1,
        }
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }
}

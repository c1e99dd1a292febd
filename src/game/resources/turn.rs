//! Turn tracking
//!
//! Tracks whose turn it is. The turn only advances through [`CurrentTurn::switch`],
//! which the controller calls once per accepted, non-winning move.

use crate::game::types::Player;
use serde::{Deserialize, Serialize};

/// The player to move next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentTurn {
    player: Player,
}

impl Default for CurrentTurn {
    fn default() -> Self {
        Self {
            player: Player::FIRST,
        }
    }
}

impl CurrentTurn {
    pub fn player(&self) -> Player {
        self.player
    }

    pub(crate) fn switch(&mut self) {
        self.player = self.player.opponent();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

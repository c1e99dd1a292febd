use gridduel::game::resources::{MoveHistory, Scoreboard};
use gridduel::game::rules::Grid;
use gridduel::game::types::{Piece, PieceId, Player};
use gridduel::game::{GameSession, MoveProposal, MoveRejection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors raised while decoding an incoming frame
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Lifecycle of a session on the authority
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Accepting moves
    #[default]
    Active,
    /// A winner has been announced; the board resets after the settle delay
    Concluding,
}

/// Full authoritative state, resent on every change
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    /// 5×5 grid of piece ids, indexed `[row][col]`
    pub board: Grid,
    pub pieces: BTreeMap<PieceId, Piece>,
    pub history: MoveHistory,
    #[serde(rename = "currentPlayer")]
    pub current_player: Player,
    pub phase: SessionPhase,
}

impl GameSnapshot {
    pub fn capture(session: &GameSession, phase: SessionPhase) -> Self {
        Self {
            board: session.board().grid().clone(),
            pieces: session.board().pieces().clone(),
            history: session.history().clone(),
            current_player: session.current_player(),
            phase,
        }
    }
}

/// Game channel, client → authority
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    Move {
        #[serde(rename = "move")]
        proposal: MoveProposal,
    },
}

impl ClientMessage {
    /// Decode a text frame
    ///
    /// Missing fields, unknown message types and off-board coordinates all
    /// fail here, so a malformed proposal never reaches the controller.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Game channel, authority → clients
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Full state; clients replace their view with it
    Update(GameSnapshot),

    /// Sent once after the winning move's update
    GameOver { winner: Player, wins: Scoreboard },

    /// Only sent to the proposer, and only when rejection replies are enabled
    Rejected {
        reason: MoveRejection,
        #[serde(rename = "move")]
        proposal: Option<MoveProposal>,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridduel::game::types::Coord;
    use serde_json::{json, Value};

    #[test]
    fn test_move_message_parses() {
        let text = r#"{"type":"MOVE","move":{"id":"A-P2","from":{"row":1,"col":0},"to":{"row":1,"col":1}}}"#;

        let msg = ClientMessage::parse(text).expect("Should parse");

        let ClientMessage::Move { proposal } = msg;
        assert_eq!(proposal.id, PieceId::from("A-P2"));
        assert_eq!(proposal.from, Coord::new(1, 0).unwrap());
        assert_eq!(proposal.to, Coord::new(1, 1).unwrap());
    }

    #[test]
    fn test_malformed_moves_fail_to_parse() {
        let cases = [
            "not json",
            r#"{"type":"MOVE"}"#,
            r#"{"type":"MOVE","move":{"id":"A-P2","from":{"row":1,"col":0}}}"#,
            r#"{"type":"MOVE","move":{"id":"A-P2","from":{"row":1,"col":0},"to":{"row":9,"col":1}}}"#,
            r#"{"type":"TELEPORT","move":{"id":"A-P2","from":{"row":1,"col":0},"to":{"row":1,"col":1}}}"#,
            r#"{"move":{"id":"A-P2","from":{"row":1,"col":0},"to":{"row":1,"col":1}}}"#,
        ];

        for case in cases {
            assert!(
                matches!(ClientMessage::parse(case), Err(ProtocolError::Malformed(_))),
                "{case} should be rejected"
            );
        }
    }

    #[test]
    fn test_update_wire_shape() {
        let session = GameSession::standard().unwrap();
        let msg = ServerMessage::Update(GameSnapshot::capture(&session, SessionPhase::Active));

        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        assert_eq!(value["type"], "UPDATE");
        assert_eq!(value["board"][1][0], "A-P2");
        assert_eq!(value["board"][2][2], Value::Null);
        assert_eq!(value["pieces"]["A-P2"]["type"], "P");
        assert_eq!(value["pieces"]["A-P2"]["position"], json!({"row": 1, "col": 0}));
        assert_eq!(value["history"], json!([]));
        assert_eq!(value["currentPlayer"], "A");
        assert_eq!(value["phase"], "active");
    }

    #[test]
    fn test_update_decodes_back() {
        let mut session = GameSession::standard().unwrap();
        session
            .propose_move("A-P2", Coord::new(1, 0).unwrap(), Coord::new(1, 1).unwrap())
            .unwrap();
        let snapshot = GameSnapshot::capture(&session, SessionPhase::Active);

        let text = ServerMessage::Update(snapshot.clone()).to_json().unwrap();
        let decoded: ServerMessage = serde_json::from_str(&text).unwrap();

        assert_eq!(decoded, ServerMessage::Update(snapshot));
    }

    #[test]
    fn test_game_over_wire_shape() {
        let mut wins = Scoreboard::default();
        wins.record_win(Player::A);
        let msg = ServerMessage::GameOver {
            winner: Player::A,
            wins,
        };

        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({"type": "GAME_OVER", "winner": "A", "wins": {"A": 1, "B": 0}})
        );
    }

    #[test]
    fn test_rejected_wire_shape() {
        let msg = ServerMessage::Rejected {
            reason: MoveRejection::NotYourTurn,
            proposal: None,
        };

        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

        assert_eq!(value["type"], "REJECTED");
        assert_eq!(value["reason"], "NOT_YOUR_TURN");
        assert_eq!(value["move"], Value::Null);
    }
}

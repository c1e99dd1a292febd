use serde::{Deserialize, Serialize};

/// Chat channel frame, identical in both directions
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatMessage {
    Chat { message: String },
}

impl ChatMessage {
    pub fn new(message: impl Into<String>) -> Self {
        ChatMessage::Chat {
            message: message.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ChatMessage::Chat { message } => message,
        }
    }
}

//! Wire protocol shared by the authority and its clients
//!
//! - `protocol` - Game channel frames (`MOVE`, `UPDATE`, `GAME_OVER`, `REJECTED`)
//! - `chat` - Chat channel frame (`CHAT`)

pub mod chat;
pub mod protocol;

//! Synchronization authority
//!
//! Each session runs as its own tokio task that exclusively owns a
//! [`GameSession`]. Connections talk to it through an unbounded command
//! queue, so proposals are applied strictly one at a time in arrival order and
//! every client's outbound queue receives broadcasts in the same order.
//!
//! ```text
//! Active --(winning move)--> Concluding --(reset delay)--> Active
//! ```
//!
//! A session whose last client leaves while it is `Active` removes itself
//! from the registry and stops, freeing its slot for a new id.

use crate::error::{BackendError, BackendResult};
use gridduel::core::RuleSet;
use gridduel::game::resources::Scoreboard;
use gridduel::game::types::Player;
use gridduel::game::{GameSession, MoveProposal, MoveRejection};
use parking_lot::Mutex;
use rand::Rng;
use shared::protocol::{GameSnapshot, ServerMessage, SessionPhase};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Identity of one connection
pub type ClientId = Uuid;

/// Outbound queue of one connection
pub type Outbox = mpsc::Sender<ServerMessage>;

/// Messages a client may fall behind by before it is disconnected
pub const OUTBOX_CAPACITY: usize = 64;

/// Session used by connections to `/`
pub const DEFAULT_SESSION: &str = "main";

const MAX_SESSION_ID_LEN: usize = 32;

/// A join can race with the session shutting down; retry on a fresh one
const JOIN_ATTEMPTS: usize = 3;

/// Per-session behaviour knobs
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub reset_delay: Duration,
    pub rejection_replies: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_millis(2000),
            rejection_replies: false,
        }
    }
}

/// Messages accepted by a session task
#[derive(Debug)]
pub enum SessionCommand {
    Join {
        client: ClientId,
        outbox: Outbox,
        joined: oneshot::Sender<()>,
    },
    Leave { client: ClientId },
    Propose { client: ClientId, proposal: MoveProposal },
    /// The client sent a frame that could not be decoded
    Malformed { client: ClientId },
}

/// Cheap, cloneable handle to a running session task
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: String,
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Register a connection and wait until the session has sent it the
    /// full state
    ///
    /// Fails with [`BackendError::SessionClosed`] if the session stopped
    /// before handling the join.
    pub async fn join(&self, client: ClientId, outbox: Outbox) -> BackendResult<()> {
        let (joined, ack) = oneshot::channel();
        self.send(SessionCommand::Join {
            client,
            outbox,
            joined,
        })?;
        ack.await
            .map_err(|_| BackendError::SessionClosed(self.id.clone()))
    }

    pub fn leave(&self, client: ClientId) -> BackendResult<()> {
        self.send(SessionCommand::Leave { client })
    }

    pub fn propose(&self, client: ClientId, proposal: MoveProposal) -> BackendResult<()> {
        self.send(SessionCommand::Propose { client, proposal })
    }

    pub fn report_malformed(&self, client: ClientId) -> BackendResult<()> {
        self.send(SessionCommand::Malformed { client })
    }

    fn send(&self, command: SessionCommand) -> BackendResult<()> {
        self.commands
            .send(command)
            .map_err(|_| BackendError::SessionClosed(self.id.clone()))
    }
}

/// Resource to track all active sessions
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    sessions: Mutex<HashMap<String, SessionHandle>>,
    ruleset: RuleSet,
    settings: SessionSettings,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(ruleset: RuleSet, settings: SessionSettings, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                sessions: Mutex::new(HashMap::new()),
                ruleset,
                settings,
                max_sessions,
            }),
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.inner.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.sessions.lock().contains_key(id)
    }

    /// Look up a session, starting it on first use
    ///
    /// Must be called from within a tokio runtime.
    pub fn get_or_create(&self, id: &str) -> BackendResult<SessionHandle> {
        if !is_valid_session_id(id) {
            return Err(BackendError::InvalidSessionId(id.to_string()));
        }

        let mut sessions = self.inner.sessions.lock();
        if let Some(handle) = sessions.get(id) {
            if !handle.is_closed() {
                return Ok(handle.clone());
            }
            sessions.remove(id);
        }

        if sessions.len() >= self.inner.max_sessions {
            return Err(BackendError::SessionLimit(self.inner.max_sessions));
        }

        let game = self.inner.ruleset.new_session()?;
        let (commands, rx) = mpsc::unbounded_channel();
        let handle = SessionHandle {
            id: id.to_string(),
            commands,
        };

        let actor = SessionActor::new(
            id.to_string(),
            game,
            self.inner.settings,
            Arc::downgrade(&self.inner),
        );
        tokio::spawn(actor.run(rx));
        sessions.insert(id.to_string(), handle.clone());

        info!("[SESSION] Created session {}", id);
        Ok(handle)
    }

    /// Check that a connection to `id` could be admitted, without creating
    /// the session
    pub fn check_admission(&self, id: &str) -> BackendResult<()> {
        if !is_valid_session_id(id) {
            return Err(BackendError::InvalidSessionId(id.to_string()));
        }
        let sessions = self.inner.sessions.lock();
        if !sessions.contains_key(id) && sessions.len() >= self.inner.max_sessions {
            return Err(BackendError::SessionLimit(self.inner.max_sessions));
        }
        Ok(())
    }

    /// Join session `id`, creating it if needed
    ///
    /// Retries when the session shuts down between lookup and join.
    pub async fn join(
        &self,
        id: &str,
        client: ClientId,
        outbox: Outbox,
    ) -> BackendResult<SessionHandle> {
        for _ in 0..JOIN_ATTEMPTS {
            let handle = self.get_or_create(id)?;
            match handle.join(client, outbox.clone()).await {
                Ok(()) => return Ok(handle),
                Err(BackendError::SessionClosed(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(BackendError::SessionClosed(id.to_string()))
    }

    /// Pick an unused random session id, if there is room for one more session
    pub fn generate_session_id(&self) -> BackendResult<String> {
        let sessions = self.inner.sessions.lock();
        if sessions.len() >= self.inner.max_sessions {
            return Err(BackendError::SessionLimit(self.inner.max_sessions));
        }
        loop {
            let code = generate_session_code();
            if !sessions.contains_key(&code) {
                return Ok(code);
            }
        }
    }
}

/// `[A-Za-z0-9_-]{1,32}`
pub fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn generate_session_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    (0..8)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// State owned by one session task
struct SessionActor {
    id: String,
    game: GameSession,
    phase: SessionPhase,
    wins: Scoreboard,
    clients: BTreeMap<ClientId, Outbox>,
    reset_at: Option<Instant>,
    settings: SessionSettings,
    registry: Weak<RegistryInner>,
}

impl SessionActor {
    fn new(
        id: String,
        game: GameSession,
        settings: SessionSettings,
        registry: Weak<RegistryInner>,
    ) -> Self {
        Self {
            id,
            game,
            phase: SessionPhase::Active,
            wins: Scoreboard::default(),
            clients: BTreeMap::new(),
            reset_at: None,
            settings,
            registry,
        }
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) {
        loop {
            let deadline = self.reset_at;
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.reset();
                }
            }

            if self.is_idle() && self.evict(&mut commands) {
                break;
            }
        }
        debug!("[SESSION] Session {} stopped", self.id);
    }

    fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Join {
                client,
                outbox,
                joined,
            } => self.join(client, outbox, joined),
            SessionCommand::Leave { client } => {
                if self.clients.remove(&client).is_some() {
                    info!("[SESSION] Client {} left session {}", client, self.id);
                }
            }
            SessionCommand::Propose { client, proposal } => self.propose(client, proposal),
            SessionCommand::Malformed { client } => {
                self.reject(client, MoveRejection::MalformedProposal, None);
            }
        }
    }

    fn join(&mut self, client: ClientId, outbox: Outbox, joined: oneshot::Sender<()>) {
        info!(
            "[SESSION] Client {} joined session {} ({} connected)",
            client,
            self.id,
            self.clients.len() + 1
        );

        let mut sent = outbox.try_send(self.snapshot()).is_ok();
        // A late joiner still learns who won the game on screen
        if let Some(winner) = self.game.game_over().winner() {
            sent &= outbox.try_send(self.game_over_message(winner)).is_ok();
        }
        if sent {
            self.clients.insert(client, outbox);
        }
        let _ = joined.send(());
    }

    fn propose(&mut self, client: ClientId, proposal: MoveProposal) {
        let outcome = match self.game.apply_move(&proposal) {
            Ok(outcome) => outcome,
            Err(reason) => {
                warn!(
                    "[SESSION] Rejected {} {} -> {} from {} in session {}: {}",
                    proposal.id, proposal.from, proposal.to, client, self.id, reason
                );
                self.reject(client, reason, Some(proposal));
                return;
            }
        };

        debug!("[SESSION] {}: {}", self.id, outcome.record);
        if let Some(captured) = &outcome.captured {
            debug!("[SESSION] {}: {} captured", self.id, captured.id);
        }

        if let Some(winner) = outcome.winner {
            self.phase = SessionPhase::Concluding;
            self.wins.record_win(winner);
            self.reset_at = Some(Instant::now() + self.settings.reset_delay);
            info!("[SESSION] Player {} wins session {}", winner, self.id);

            self.broadcast(self.snapshot());
            self.broadcast(self.game_over_message(winner));
        } else {
            self.broadcast(self.snapshot());
        }
    }

    fn reject(&mut self, client: ClientId, reason: MoveRejection, proposal: Option<MoveProposal>) {
        if !self.settings.rejection_replies {
            return;
        }
        if let Some(outbox) = self.clients.get(&client) {
            let _ = outbox.try_send(ServerMessage::Rejected { reason, proposal });
        }
    }

    fn reset(&mut self) {
        self.game.reset();
        self.phase = SessionPhase::Active;
        self.reset_at = None;
        info!("[SESSION] Session {} reset for a new game", self.id);
        self.broadcast(self.snapshot());
    }

    fn snapshot(&self) -> ServerMessage {
        ServerMessage::Update(GameSnapshot::capture(&self.game, self.phase))
    }

    fn game_over_message(&self, winner: Player) -> ServerMessage {
        ServerMessage::GameOver {
            winner,
            wins: self.wins,
        }
    }

    /// Queue `message` for every client
    ///
    /// Clients whose queue is gone or full are dropped; dropping the outbox
    /// closes their connection.
    fn broadcast(&mut self, message: ServerMessage) {
        let id = &self.id;
        self.clients
            .retain(|client, outbox| match outbox.try_send(message.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!("[SESSION] Client {} fell behind in session {}", client, id);
                    false
                }
                Err(TrySendError::Closed(_)) => false,
            });
    }

    fn is_idle(&self) -> bool {
        self.clients.is_empty() && self.phase == SessionPhase::Active
    }

    /// Remove this session from the registry unless commands are waiting
    ///
    /// Holding the registry lock while closing the queue means no new handle
    /// can be handed out in between. Joins already queued are dropped with the
    /// receiver, which fails their acknowledgement so they retry.
    fn evict(&mut self, commands: &mut mpsc::UnboundedReceiver<SessionCommand>) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return true;
        };
        let mut sessions = registry.sessions.lock();
        if !commands.is_empty() {
            return false;
        }
        sessions.remove(&self.id);
        commands.close();
        info!("[SESSION] Session {} closed, no clients left", self.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_validation() {
        assert!(is_valid_session_id("main"));
        assert!(is_valid_session_id("Room_42-b"));
        assert!(!is_valid_session_id(""));
        assert!(!is_valid_session_id("has space"));
        assert!(!is_valid_session_id("../etc"));
        assert!(!is_valid_session_id(&"x".repeat(33)));
    }

    #[test]
    fn test_generated_code_shape() {
        let code = generate_session_code();
        assert_eq!(code.len(), 8, "Session code should be 8 characters");
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(is_valid_session_id(&code));
    }
}

//! Server configuration
//!
//! Read from the environment (after `.env` has been loaded by `main`):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GAME_ADDR` | `0.0.0.0:8081` |
//! | `CHAT_ADDR` | `0.0.0.0:8082` |
//! | `RESET_DELAY_MS` | `2000` |
//! | `MAX_SESSIONS` | `64` |
//! | `REJECTION_REPLIES` | `false` |
//! | `RULESET_PATH` | unset (built-in ruleset) |

use crate::error::{BackendError, BackendResult};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub game_addr: SocketAddr,
    pub chat_addr: SocketAddr,
    /// How long a won game stays on screen before the board resets
    pub reset_delay: Duration,
    pub max_sessions: usize,
    /// Reply to rejected proposals instead of dropping them silently
    pub rejection_replies: bool,
    pub ruleset_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            game_addr: SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 8081),
            chat_addr: SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 8082),
            reset_delay: Duration::from_millis(2000),
            max_sessions: 64,
            rejection_replies: false,
            ruleset_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> BackendResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BackendResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            game_addr: parse_var(&lookup, "GAME_ADDR", defaults.game_addr)?,
            chat_addr: parse_var(&lookup, "CHAT_ADDR", defaults.chat_addr)?,
            reset_delay: Duration::from_millis(parse_var(
                &lookup,
                "RESET_DELAY_MS",
                defaults.reset_delay.as_millis() as u64,
            )?),
            max_sessions: parse_var(&lookup, "MAX_SESSIONS", defaults.max_sessions)?,
            rejection_replies: parse_var(&lookup, "REJECTION_REPLIES", defaults.rejection_replies)?,
            ruleset_path: lookup("RULESET_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> BackendResult<T> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| BackendError::InvalidEnv { key, value }),
        None => Ok(default),
    }
}

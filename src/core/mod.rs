//! Core module - ruleset configuration shared by the server and tools
//!
//! - `ruleset` - JSON ruleset loading and validation ([`RuleSet`])
//! - `error` - [`CoreError`] and the [`CoreResult`] alias

pub mod error;
pub mod ruleset;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use ruleset::RuleSet;

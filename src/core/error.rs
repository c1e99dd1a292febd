//! Error types for core module
//!
//! Provides custom error types for loading and validating rulesets.

use crate::game::ConfigError;
use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Ruleset file I/O error
    #[error("Ruleset I/O error: {0}")]
    RulesetIo(#[from] std::io::Error),

    /// Ruleset serialization/deserialization error
    #[error("Ruleset serialization error: {0}")]
    RulesetSerialization(#[from] serde_json::Error),

    /// Ruleset parsed but describes an unplayable game
    #[error("Ruleset validation failed: {0}")]
    RulesetInvalid(#[from] ConfigError),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

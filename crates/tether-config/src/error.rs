//! Configuration errors.

use std::io;

/// Errors from reading or resolving a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),
    /// The document is not valid JSON or lacks a required table or field.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
    /// A particle names a species the `species` table does not define.
    #[error("particle {particle} has unknown species '{species}'")]
    UnknownSpecies {
        /// The particle key as written.
        particle: String,
        /// The missing species name.
        species: String,
    },
    /// A `particles` key is not an unsigned integer.
    #[error("particle key '{key}' is not a valid particle ID")]
    InvalidParticleId {
        /// The key as written.
        key: String,
    },
    /// A species has a negative or non-finite mass or radius.
    #[error("species '{name}': {reason}")]
    InvalidSpecies {
        /// The species name.
        name: String,
        /// What is wrong.
        reason: String,
    },
    /// A particle's initial position and velocity do not form a state.
    #[error("particle {particle}: {reason}")]
    InvalidInitialState {
        /// The particle.
        particle: u64,
        /// What is wrong.
        reason: String,
    },
    /// An argument to a table operation is out of range.
    #[error("invalid options: {reason}")]
    InvalidOptions {
        /// What is wrong.
        reason: String,
    },
}

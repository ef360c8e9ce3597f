//! Pure line decoders for the state log and the message log.
//!
//! Both logs interleave bare time-marker lines with data lines. The two
//! data grammars live in [`state`] and [`message`]; the pieces they share
//! (time markers, number and vector tokens) live here.
//!
//! Nothing in this module performs I/O or keeps state between calls.

pub mod message;
pub mod state;

use tether_core::{LineError, ParticleId, TimeKey, Vector};

/// Decode a time-marker line.
///
/// A line is a marker when its trimmed text is a finite float.
pub fn parse_time_marker(line: &str) -> Option<TimeKey> {
    TimeKey::parse(line)
}

/// Parse an unsigned integer token.
pub(crate) fn parse_u64(token: &str) -> Result<u64, LineError> {
    token.parse::<u64>().map_err(|_| LineError::BadNumber {
        token: token.to_string(),
    })
}

/// Parse a particle ID token.
pub(crate) fn parse_particle_id(token: &str) -> Result<ParticleId, LineError> {
    parse_u64(token).map(ParticleId)
}

/// Parse whitespace-separated float components.
///
/// The simulator writes a trailing space after every component, so
/// splitting on runs of whitespace rather than single spaces matters.
pub(crate) fn parse_vector(text: &str) -> Result<Vector, LineError> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| LineError::BadNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Why a position/velocity pair is unusable, or `None` when it is fine.
pub(crate) fn dimension_problem(position: &Vector, velocity: &Vector) -> Option<String> {
    if position.len() != velocity.len() {
        return Some(format!(
            "dimension mismatch (pos {}, vel {})",
            position.len(),
            velocity.len()
        ));
    }
    if !(2..=3).contains(&position.len()) {
        return Some(format!("unsupported dimension {}", position.len()));
    }
    None
}

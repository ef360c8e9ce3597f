//! Strongly-typed identifiers and the [`Vector`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a particle across both logs and the model configuration.
///
/// IDs are assigned by the simulator's configuration document and are
/// stable for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A position or velocity vector.
///
/// Logs carry 2-D or 3-D vectors; both fit inline without allocation.
/// The dimension is inferred per record from the number of components.
pub type Vector = SmallVec<[f64; 3]>;

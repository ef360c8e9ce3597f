//! Scanner configuration and validation.
//!
//! [`LoadOptions`] gathers everything a scan needs to know about the log
//! producer: the marker substrings that classify lines, how repeated
//! sub-volume lines under one time are combined, and how large a file the
//! resident loaders may read. [`validate()`](LoadOptions::validate) checks
//! the invariants before any file is opened.

// ── Markers ────────────────────────────────────────────────────────

/// Literal substrings that classify log lines.
///
/// The defaults match the port and model names the simulator writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Present on every state-log line that carries sub-volume state.
    /// Default: `"subV"`.
    pub sub_volume: String,
    /// Present on message-log lines for random impulses.
    /// Default: `"RandomImpulse"`.
    pub impulse: String,
    /// Present on message-log lines emitted by a sub-volume (collisions).
    /// Default: `"SubV"`.
    pub collision: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            sub_volume: "subV".into(),
            impulse: "RandomImpulse".into(),
            collision: "SubV".into(),
        }
    }
}

impl Markers {
    /// Check that no marker is empty.
    ///
    /// An empty marker would match every line.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, value) in [
            ("sub_volume", &self.sub_volume),
            ("impulse", &self.impulse),
            ("collision", &self.collision),
        ] {
            if value.is_empty() {
                return Err(OptionsError::EmptyMarker { name });
            }
        }
        Ok(())
    }
}

// ── IndexPolicy ────────────────────────────────────────────────────

/// How several sub-volume lines under one time marker are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Keep every line; lookups merge them in file order so the result is
    /// the full state across all sub-volumes.
    #[default]
    Aggregate,
    /// Keep only the last line seen for each time (earlier sub-volume
    /// lines under the same marker are overwritten).
    LastWins,
}

// ── LoadOptions ────────────────────────────────────────────────────

/// Default limit for the resident loaders: 256 MiB.
pub const DEFAULT_MAX_RESIDENT_BYTES: u64 = 256 << 20;

/// Options shared by the index, the event stream, and the resident loaders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Line classification markers.
    pub markers: Markers,
    /// Aggregation of repeated sub-volume lines.
    pub policy: IndexPolicy,
    /// Largest file the resident loaders will read into memory.
    /// Default: [`DEFAULT_MAX_RESIDENT_BYTES`].
    pub max_resident_bytes: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            policy: IndexPolicy::default(),
            max_resident_bytes: DEFAULT_MAX_RESIDENT_BYTES,
        }
    }
}

impl LoadOptions {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.markers.validate()?;
        if self.max_resident_bytes == 0 {
            return Err(OptionsError::ZeroResidentLimit);
        }
        Ok(())
    }

    /// Replace the aggregation policy.
    pub fn with_policy(mut self, policy: IndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the resident size limit.
    pub fn with_max_resident_bytes(mut self, limit: u64) -> Self {
        self.max_resident_bytes = limit;
        self
    }
}

// ── OptionsError ───────────────────────────────────────────────────

/// Errors detected by [`LoadOptions::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// A marker substring is empty.
    #[error("marker '{name}' must not be empty")]
    EmptyMarker {
        /// Which marker.
        name: &'static str,
    },
    /// The resident size limit is zero.
    #[error("max_resident_bytes must be at least 1")]
    ZeroResidentLimit,
}

//! Error types for log scanning, lookups, and resampling.
//!
//! Organized by how far a failure reaches: [`LineError`] stays inside one
//! line and is reported as a diagnostic, [`LogError`] ends the operation
//! that hit it, and [`QueryError`] rejects a query before any work starts.

use std::io;
use std::path::PathBuf;

/// A single log line failed its grammar.
///
/// Scanners never abort on a `LineError`: the line is skipped and the
/// failure is recorded as a [`Diagnostic`](crate::Diagnostic).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// A token that must be a number did not decode as one.
    #[error("invalid number {token:?}")]
    BadNumber {
        /// The offending token.
        token: String,
    },
    /// A classified event line named no particles.
    #[error("no particle IDs found")]
    NoParticles,
    /// A state line had no bracket groups at all.
    #[error("no particle groups found")]
    NoGroups,
}

/// Errors that end a scan, lookup, or load.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Reading or seeking the underlying log failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The requested time is not present in the index.
    #[error("time {time} not found in index")]
    NotFound {
        /// The time that was requested.
        time: String,
    },
    /// The file is too large to load into memory.
    ///
    /// Raised by the resident loaders so the operator can switch to the
    /// indexed or streaming path.
    #[error(
        "{} is too large to load into memory: {size_bytes} bytes ({:.2} MB, {:.2} MiB), \
         limit is {limit_bytes} bytes; use the indexed or streaming reader instead",
        .path.display(),
        megabytes(.size_bytes),
        mebibytes(.size_bytes)
    )]
    ResourceTooLarge {
        /// The file that was refused.
        path: PathBuf,
        /// Its size on disk.
        size_bytes: u64,
        /// The configured limit.
        limit_bytes: u64,
    },
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / 1_000_000.0
}

fn mebibytes(bytes: &u64) -> f64 {
    *bytes as f64 / (1u64 << 20) as f64
}

/// A query timeline was rejected before any processing began.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// No query times were supplied.
    #[error("query timeline is empty")]
    Empty,
    /// A query time is not strictly greater than its predecessor.
    #[error("query times must be strictly increasing: {previous} is followed by {next}")]
    NotIncreasing {
        /// The earlier time.
        previous: f64,
        /// The time that failed to increase.
        next: f64,
    },
    /// A bound, step, or explicit time is NaN or infinite.
    #[error("query time values must be finite, got {value}")]
    NonFinite {
        /// The offending value.
        value: f64,
    },
    /// The timeline starts after it ends.
    #[error("start {start} is after end {end}, no states would be produced")]
    StartAfterEnd {
        /// Requested start.
        start: f64,
        /// Requested end.
        end: f64,
    },
    /// The step is zero or negative.
    #[error("step {step} must be positive; states can only be produced forwards in time")]
    NonPositiveStep {
        /// Requested step.
        step: f64,
    },
    /// The step is too small to keep successive times distinct in
    /// floating point at the timeline's magnitude.
    #[error("step {step} is too small to keep query times distinct from {start}")]
    StepTooSmall {
        /// Requested start.
        start: f64,
        /// Requested step.
        step: f64,
    },
}

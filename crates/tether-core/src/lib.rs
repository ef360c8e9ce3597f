//! Core types for tethered particle system logs.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! values shared by the log scanners, the resampler, and the tooling:
//! particle identifiers, recorded times, snapshots, timed events, the
//! error taxonomy, and line-level diagnostics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diagnostic;
pub mod error;
pub mod id;
pub mod snapshot;
pub mod time;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{LineError, LogError, QueryError};
pub use id::{ParticleId, Vector};
pub use snapshot::{EventKind, EventRecord, Snapshot, TimedEvent};
pub use time::TimeKey;

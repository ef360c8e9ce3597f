//! Tether: tools for the logs of a tethered particle simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all tether sub-crates. For most users, adding `tether` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tether::prelude::*;
//!
//! let log = "\
//! 0
//! [SubV_defs::logging_out: {[subV_id: 1, p_id: 1, pos: <0 0 >, vel: <1 0 >]}] generated by model subV
//! ";
//! let events = EventStream::new(log.as_bytes(), Markers::default());
//! let timeline = QueryTimeline::new(0.0, 3.0, 1.0).unwrap();
//! let last = Resampler::new(events, timeline.into())
//!     .unwrap()
//!     .last()
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(last.get(ParticleId(1)).unwrap().as_slice(), &[3.0, 0.0]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tether-core` | IDs, times, snapshots, errors, diagnostics |
//! | [`log`] | `tether-log` | Line grammars, state index, event stream, resident loaders |
//! | [`resample`] | `tether-resample` | Query timelines and the resampler |
//! | [`config`] | `tether-config` | Particle properties from the model configuration |
//! | [`dataset`] | this crate | State, events, and properties opened together |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dataset;

/// Core types, errors, and diagnostics (`tether-core`).
pub use tether_core as types;

/// Log grammars and readers (`tether-log`).
///
/// [`log::StateIndex`] for random access into state logs larger than
/// memory, [`log::EventStream`] for a lazy pass over a message log.
pub use tether_log as log;

/// Resampling onto query times (`tether-resample`).
pub use tether_resample as resample;

/// Model configuration (`tether-config`).
pub use tether_config as config;

pub use dataset::{Dataset, DatasetError, StateLoading, StateSource};

/// Common imports for typical tether usage.
///
/// ```rust
/// use tether::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tether_core::{EventKind, EventRecord, ParticleId, Snapshot, TimeKey, TimedEvent};

    // Errors and diagnostics
    pub use tether_core::{Diagnostic, DiagnosticKind, LogError, QueryError};

    // Logs
    pub use tether_log::{EventStream, IndexPolicy, LoadOptions, Markers, StateIndex};

    // Resampling
    pub use tether_resample::{QueryTimeline, QueryTimes, ResampledFrame, Resampler};

    // Configuration
    pub use tether_config::{ParticleProperties, PropertyTable};

    // Dataset
    pub use crate::dataset::{Dataset, StateLoading};
}

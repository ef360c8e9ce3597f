//! Line grammars, sparse indexing, and event streaming for simulator logs.
//!
//! The simulator writes two line-oriented text logs: a **state log** of
//! per-sub-volume particle snapshots under time-marker lines, and a
//! **message log** of collision and random-impulse events.
//!
//! # Architecture
//!
//! - [`grammar`] decodes single lines; no I/O
//! - [`LogScanner`] reads lines and reports their byte offsets
//! - [`StateIndex`] records time → offset(s) in one pass and serves
//!   point lookups by seeking, so state logs larger than memory stay usable
//! - [`EventStream`] lazily yields [`TimedEvent`](tether_core::TimedEvent)s
//!   from a message log
//! - [`resident`] loads whole logs into memory behind a size guard
//!
//! Lines that fail their grammar are skipped and reported as
//! [`Diagnostic`](tether_core::Diagnostic)s; only I/O failures end a scan.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod events;
pub mod grammar;
pub mod index;
pub mod options;
pub mod resident;
pub mod scanner;

pub use events::{summarize_events, EventStream, MessageSummary};
pub use index::{LineRef, StateIndex, StateLookup};
pub use options::{IndexPolicy, LoadOptions, Markers, OptionsError};
pub use resident::{load_message_summary, load_state_log, parse_state_log, ResidentStates};
pub use scanner::{LogScanner, ScannedLine};

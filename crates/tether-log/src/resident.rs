//! Whole-file loaders for logs small enough to hold in memory.
//!
//! These read an entire log in one pass and keep every decoded value.
//! Before reading, the file size is checked against
//! [`LoadOptions::max_resident_bytes`]; larger files are refused with
//! [`LogError::ResourceTooLarge`] so callers can fall back to
//! [`StateIndex`](crate::StateIndex) or [`EventStream`](crate::EventStream).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use tether_core::{DiagnosticKind, Diagnostics, LogError, ParticleId, Snapshot, TimeKey};

use crate::events::{summarize_events, MessageSummary};
use crate::grammar::{self, state};
use crate::index::merge_snapshots;
use crate::options::{IndexPolicy, LoadOptions};
use crate::scanner::LogScanner;

/// Every snapshot in a state log, keyed by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResidentStates {
    /// Time → snapshots, times in file order.
    pub states: IndexMap<TimeKey, Vec<Snapshot>>,
    /// Lines and groups skipped while parsing.
    pub diagnostics: Diagnostics,
}

impl ResidentStates {
    /// Snapshots recorded at `time`.
    pub fn get(&self, time: &str) -> Option<&[Snapshot]> {
        self.states.get(time).map(Vec::as_slice)
    }

    /// Number of recorded times.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no time was recorded.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Parse a whole state log from `reader`.
///
/// Repeated sub-volume lines under one time are combined according to
/// [`LoadOptions::policy`], giving the same snapshots a
/// [`StateIndex`](crate::StateIndex) lookup would. A data line that fails
/// its grammar is skipped and reported but still counts as the latest line
/// under [`IndexPolicy::LastWins`]; its time still appears, possibly with
/// no snapshots.
pub fn parse_state_log<R: BufRead>(
    reader: R,
    options: &LoadOptions,
) -> Result<ResidentStates, LogError> {
    let mut scanner = LogScanner::new(reader);
    let mut building: IndexMap<TimeKey, IndexMap<ParticleId, Snapshot>> = IndexMap::new();
    let mut diagnostics = Diagnostics::new();
    let mut current: Option<TimeKey> = None;

    while let Some(line) = scanner.next_line()? {
        if let Some(time) = grammar::parse_time_marker(line.text) {
            current = Some(time);
            continue;
        }
        if !state::is_data_line(line.text, &options.markers) {
            continue;
        }
        let Some(time) = &current else {
            diagnostics.push(line.number, DiagnosticKind::OrphanLine, line.text);
            continue;
        };
        let merged = building.entry(time.clone()).or_default();
        if options.policy == IndexPolicy::LastWins {
            merged.clear();
        }
        let parsed = match state::parse_line(line.text, &options.markers) {
            Ok(parsed) => parsed,
            Err(e) => {
                diagnostics.push(
                    line.number,
                    DiagnosticKind::MalformedLine,
                    format!("{e}: {}", line.text),
                );
                continue;
            }
        };
        for rejected in parsed.rejected {
            diagnostics.push(line.number, DiagnosticKind::MalformedGroup, rejected);
        }
        merge_snapshots(merged, parsed.snapshots);
    }

    let states: IndexMap<_, _> = building
        .into_iter()
        .map(|(time, merged)| (time, merged.into_values().collect()))
        .collect();
    tracing::debug!(
        times = states.len(),
        lines = scanner.lines_read(),
        skipped = diagnostics.len(),
        "state log loaded"
    );
    Ok(ResidentStates {
        states,
        diagnostics,
    })
}

/// Load the state log at `path` into memory.
///
/// Fails with [`LogError::ResourceTooLarge`] when the file exceeds
/// [`LoadOptions::max_resident_bytes`].
pub fn load_state_log(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<ResidentStates, LogError> {
    let file = open_within_limit(path.as_ref(), options.max_resident_bytes)?;
    parse_state_log(BufReader::new(file), options)
}

/// Load the first event line under each time from the message log at
/// `path`.
///
/// Subject to the same size guard as [`load_state_log`].
pub fn load_message_summary(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<MessageSummary, LogError> {
    let file = open_within_limit(path.as_ref(), options.max_resident_bytes)?;
    summarize_events(BufReader::new(file), &options.markers)
}

fn open_within_limit(path: &Path, limit_bytes: u64) -> Result<File, LogError> {
    let file = File::open(path)?;
    let size_bytes = file.metadata()?.len();
    if size_bytes > limit_bytes {
        tracing::warn!(
            path = %path.display(),
            size_bytes,
            limit_bytes,
            "refusing to load log into memory"
        );
        return Err(LogError::ResourceTooLarge {
            path: path.to_path_buf(),
            size_bytes,
            limit_bytes,
        });
    }
    Ok(file)
}

//! Sparse time → offset index over a state log.
//!
//! A state log can be far larger than memory. [`StateIndex`] scans it once,
//! remembering only where each time's sub-volume lines start, and serves
//! later lookups by seeking to those offsets and parsing just those lines.
//! Memory is proportional to the number of distinct times, not file size.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use smallvec::SmallVec;
use tether_core::{DiagnosticKind, Diagnostics, LogError, ParticleId, Snapshot, TimeKey};

use crate::grammar::{self, state};
use crate::options::{IndexPolicy, LoadOptions, Markers};
use crate::scanner::{read_one_line, LogScanner};

/// Where one indexed data line starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRef {
    /// Byte offset of the first byte of the line.
    pub offset: u64,
    /// 1-based line number, used in lookup diagnostics.
    pub line: u64,
}

/// The data lines recorded for one time, in file order.
pub type Offsets = SmallVec<[LineRef; 1]>;

/// Snapshots read for one time, with whatever the lookup skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateLookup {
    /// Merged snapshots, in first-sighting order.
    pub snapshots: Vec<Snapshot>,
    /// Lines and groups under this time that failed their grammar.
    pub diagnostics: Diagnostics,
}

/// Time → offset(s) index over a state log.
///
/// Immutable after construction. [`lookup`](Self::lookup) opens a private
/// file handle per call, so one index can be shared across threads.
#[derive(Debug)]
pub struct StateIndex {
    source: Option<PathBuf>,
    entries: IndexMap<TimeKey, Offsets>,
    markers: Markers,
    policy: IndexPolicy,
    diagnostics: Diagnostics,
}

impl StateIndex {
    /// Index the state log at `path`.
    ///
    /// Lookups through [`lookup`](Self::lookup) reopen the same path.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut index = Self::build(BufReader::new(file), options)?;
        index.source = Some(path.to_path_buf());
        Ok(index)
    }

    /// Index a state log read from `reader`.
    ///
    /// Only offsets are recorded; snapshot contents are never parsed here.
    /// An index built this way has no backing path, so lookups go through
    /// [`lookup_in`](Self::lookup_in) with a seekable reader over the same
    /// bytes.
    pub fn build<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Self, LogError> {
        let mut scanner = LogScanner::new(reader);
        let mut entries: IndexMap<TimeKey, Offsets> = IndexMap::new();
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
            let offsets = entries.entry(time.clone()).or_default();
            if options.policy == IndexPolicy::LastWins {
                offsets.clear();
            }
            offsets.push(LineRef {
                offset: line.offset,
                line: line.number,
            });
        }

        tracing::debug!(
            times = entries.len(),
            lines = scanner.lines_read(),
            bytes = scanner.offset(),
            skipped = diagnostics.len(),
            "state log indexed"
        );

        Ok(Self {
            source: None,
            entries,
            markers: options.markers.clone(),
            policy: options.policy,
            diagnostics,
        })
    }

    /// Snapshots recorded at `time`, read from the indexed file.
    ///
    /// Opens a fresh handle on every call. Fails with
    /// [`LogError::NotFound`] when `time` was never recorded. Lines that no
    /// longer parse are skipped; see
    /// [`lookup_with_diagnostics`](Self::lookup_with_diagnostics).
    pub fn lookup(&self, time: &str) -> Result<Vec<Snapshot>, LogError> {
        Ok(self.lookup_with_diagnostics(time)?.snapshots)
    }

    /// Like [`lookup`](Self::lookup), also returning what was skipped.
    pub fn lookup_with_diagnostics(&self, time: &str) -> Result<StateLookup, LogError> {
        let offsets = self.offsets_for(time)?;
        let path = self.source.as_ref().ok_or_else(|| {
            LogError::Io(io::Error::other(
                "index was built from a stream; use lookup_in with a reader",
            ))
        })?;
        let mut reader = BufReader::new(File::open(path)?);
        self.read_offsets(&mut reader, offsets)
    }

    /// Snapshots recorded at `time`, read through a caller-owned reader.
    ///
    /// `reader` must expose the same bytes the index was built from.
    pub fn lookup_in<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        time: &str,
    ) -> Result<Vec<Snapshot>, LogError> {
        Ok(self.lookup_in_with_diagnostics(reader, time)?.snapshots)
    }

    /// Like [`lookup_in`](Self::lookup_in), also returning what was
    /// skipped.
    pub fn lookup_in_with_diagnostics<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        time: &str,
    ) -> Result<StateLookup, LogError> {
        let offsets = self.offsets_for(time)?;
        self.read_offsets(reader, offsets)
    }

    /// Stored line positions for `time`, if it was recorded.
    pub fn get(&self, time: &str) -> Option<&[LineRef]> {
        self.entries.get(time).map(|o| o.as_slice())
    }

    /// True when `time` was recorded.
    pub fn contains(&self, time: &str) -> bool {
        self.entries.contains_key(time)
    }

    /// Recorded times in file order.
    pub fn times(&self) -> impl Iterator<Item = &TimeKey> {
        self.entries.keys()
    }

    /// The full offset table in file order.
    pub fn entries(&self) -> &IndexMap<TimeKey, Offsets> {
        &self.entries
    }

    /// Number of recorded times.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no time was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The backing file, when built with [`open`](Self::open).
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Aggregation policy used at build time.
    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Lines skipped while building.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn offsets_for(&self, time: &str) -> Result<&Offsets, LogError> {
        self.entries.get(time).ok_or_else(|| LogError::NotFound {
            time: time.to_string(),
        })
    }

    fn read_offsets<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        offsets: &Offsets,
    ) -> Result<StateLookup, LogError> {
        let mut merged = IndexMap::new();
        let mut diagnostics = Diagnostics::new();
        for entry in offsets {
            reader.seek(SeekFrom::Start(entry.offset))?;
            let text = read_one_line(reader)?;
            let parsed = match state::parse_line(&text, &self.markers) {
                Ok(parsed) => parsed,
                Err(e) => {
                    diagnostics.push(
                        entry.line,
                        DiagnosticKind::MalformedLine,
                        format!("{e}: {text}"),
                    );
                    continue;
                }
            };
            for rejected in parsed.rejected {
                diagnostics.push(entry.line, DiagnosticKind::MalformedGroup, rejected);
            }
            merge_snapshots(&mut merged, parsed.snapshots);
        }
        Ok(StateLookup {
            snapshots: merged.into_values().collect(),
            diagnostics,
        })
    }
}

/// Fold `snapshots` into `merged`, keyed by particle.
///
/// A particle already present keeps its position in the map and takes
/// the newer values.
pub(crate) fn merge_snapshots(
    merged: &mut IndexMap<ParticleId, Snapshot>,
    snapshots: Vec<Snapshot>,
) {
    for snapshot in snapshots {
        merged.insert(snapshot.particle_id, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = "\
0
State for model tracker is 0
State for model subV_1 is [(p_id:1): pos<0 0 >, vel<1 0 >]
State for model subV_2 is [(p_id:2): pos<5 5 >, vel<0 1 >]
1.5
State for model subV_1 is [(p_id:1): pos<1.5 0 >, vel<1 0 >]
";

    #[test]
    fn aggregate_keeps_every_line() {
        let index = StateIndex::build(LOG.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("0").unwrap().len(), 2);
        assert_eq!(index.get("1.5").unwrap().len(), 1);

        let mut reader = Cursor::new(LOG.as_bytes());
        let at_zero = index.lookup_in(&mut reader, "0").unwrap();
        let ids: Vec<_> = at_zero.iter().map(|s| s.particle_id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn last_wins_overwrites() {
        let options = LoadOptions::default().with_policy(IndexPolicy::LastWins);
        let index = StateIndex::build(LOG.as_bytes(), &options).unwrap();
        let offsets = index.get("0").unwrap();
        assert_eq!(offsets.len(), 1);
        assert_eq!(
            offsets[0],
            LineRef {
                offset: LOG.find("State for model subV_2").unwrap() as u64,
                line: 4,
            }
        );

        let mut reader = Cursor::new(LOG.as_bytes());
        let at_zero = index.lookup_in(&mut reader, "0").unwrap();
        assert_eq!(at_zero.len(), 1);
        assert_eq!(at_zero[0].particle_id, ParticleId(2));
        assert_eq!(at_zero[0].sub_volume.as_deref(), Some("subV_2"));
    }

    #[test]
    fn missing_time_is_not_found() {
        let index = StateIndex::build(LOG.as_bytes(), &LoadOptions::default()).unwrap();
        let mut reader = Cursor::new(LOG.as_bytes());
        let err = index.lookup_in(&mut reader, "2").unwrap_err();
        assert!(matches!(err, LogError::NotFound { ref time } if time == "2"));
        assert!(!index.contains("1.50"));
    }

    #[test]
    fn stream_built_index_needs_reader() {
        let index = StateIndex::build(LOG.as_bytes(), &LoadOptions::default()).unwrap();
        assert!(index.source().is_none());
        assert!(matches!(index.lookup("0"), Err(LogError::Io(_))));
    }

    #[test]
    fn data_before_first_marker_is_orphaned() {
        let log = "State for model subV is [(p_id:1): pos<0 0 >, vel<0 0 >]\n3\n";
        let index = StateIndex::build(log.as_bytes(), &LoadOptions::default()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.diagnostics().count(DiagnosticKind::OrphanLine), 1);
        assert_eq!(index.diagnostics().entries()[0].line, 1);
    }

    #[test]
    fn unparseable_line_is_skipped_on_lookup() {
        let log = "\
0
State for model subV_1 is [(p_id:1): pos<0 0 >, vel<1 0 >][junk]
State for model subV_2 is [(p_id:2): pos<1 bad >, vel<0 1 >]
";
        let index = StateIndex::build(log.as_bytes(), &LoadOptions::default()).unwrap();
        let mut reader = Cursor::new(log.as_bytes());
        let found = index.lookup_in_with_diagnostics(&mut reader, "0").unwrap();
        assert_eq!(found.snapshots.len(), 1);
        assert_eq!(found.snapshots[0].particle_id, ParticleId(1));

        let kinds: Vec<_> = found
            .diagnostics
            .entries()
            .iter()
            .map(|d| (d.line, d.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (2, DiagnosticKind::MalformedGroup),
                (3, DiagnosticKind::MalformedLine),
            ]
        );
        assert!(found.diagnostics.entries()[1].detail.contains("\"bad\""));
    }

    fn at_rest(id: u64, x: f64) -> Snapshot {
        Snapshot::new(ParticleId(id), smallvec::smallvec![x, x], smallvec::smallvec![0.0, 0.0])
    }

    #[test]
    fn duplicate_particle_merges_in_place() {
        let mut merged = IndexMap::new();
        let a = at_rest(1, 0.0);
        let b = at_rest(2, 1.0);
        let a2 = at_rest(1, 9.0);
        merge_snapshots(&mut merged, vec![a, b]);
        merge_snapshots(&mut merged, vec![a2.clone()]);
        let values: Vec<_> = merged.into_values().collect();
        assert_eq!(values[0], a2);
        assert_eq!(values[1].particle_id, ParticleId(2));
    }
}

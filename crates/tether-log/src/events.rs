//! Event streaming over a message log.
//!
//! [`EventStream`] turns a message log into a lazy, forward-only sequence
//! of [`TimedEvent`]s, one per participant with kinematics, in file order.
//! Every occurrence is emitted so the full history is available to the
//! resampler. [`summarize_events`] is the deduplicated view: the first
//! event line under each time.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use tether_core::{DiagnosticKind, Diagnostics, EventRecord, LogError, TimeKey, TimedEvent};

use crate::grammar::{self, message};
use crate::options::Markers;
use crate::scanner::LogScanner;

/// Lazy iterator of [`TimedEvent`]s from a message log.
///
/// Yields `Err` once if the underlying read fails and is fused afterwards.
/// Skipped lines are collected in [`diagnostics`](Self::diagnostics).
///
/// # Examples
///
/// ```
/// use tether_log::{EventStream, Markers};
///
/// let log = "\
/// 0
/// [SubV_defs::logging_out: {[subV_id: 1, p_id: 3, pos: <0 0 >, vel: <1 0 >]}] generated by model subV
/// 2.5
/// [SubV_defs::logging_out: {[subV_id: 1, p_id: 3, pos: <2.5 0 >, vel: <0 1 >]}] generated by model subV
/// ";
/// let events: Vec<_> = EventStream::new(log.as_bytes(), Markers::default())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].time, 2.5);
/// ```
pub struct EventStream<R: BufRead> {
    scanner: LogScanner<R>,
    markers: Markers,
    current_time: Option<f64>,
    pending: VecDeque<TimedEvent>,
    diagnostics: Diagnostics,
    without_kinematics: u64,
    done: bool,
}

impl EventStream<BufReader<File>> {
    /// Stream events from the message log at `path`.
    pub fn open(path: impl AsRef<Path>, markers: Markers) -> Result<Self, LogError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), markers))
    }
}

impl<R: BufRead> EventStream<R> {
    /// Stream events from `reader`.
    pub fn new(reader: R, markers: Markers) -> Self {
        Self {
            scanner: LogScanner::new(reader),
            markers,
            current_time: None,
            pending: VecDeque::new(),
            diagnostics: Diagnostics::new(),
            without_kinematics: 0,
            done: false,
        }
    }

    /// Lines and groups skipped so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Participants skipped because their segment had no position and
    /// velocity.
    pub fn without_kinematics(&self) -> u64 {
        self.without_kinematics
    }

    /// Number of log lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.scanner.lines_read()
    }
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = Result<TimedEvent, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }
            let line = match self.scanner.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.done = true;
                    tracing::debug!(
                        lines = self.scanner.lines_read(),
                        skipped = self.diagnostics.len(),
                        without_kinematics = self.without_kinematics,
                        "message log exhausted"
                    );
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };

            if let Some(time) = grammar::parse_time_marker(line.text) {
                self.current_time = Some(time.value());
                continue;
            }
            let parsed = match message::parse_line(line.text, &self.markers) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(e) => {
                    self.diagnostics.push(
                        line.number,
                        DiagnosticKind::MalformedLine,
                        format!("{e}: {}", line.text),
                    );
                    continue;
                }
            };
            for rejected in parsed.rejected {
                self.diagnostics
                    .push(line.number, DiagnosticKind::MalformedGroup, rejected);
            }
            let Some(time) = self.current_time else {
                self.diagnostics
                    .push(line.number, DiagnosticKind::OrphanLine, line.text);
                continue;
            };
            for participant in parsed.participants {
                match participant.kinematics {
                    Some((position, velocity)) => self.pending.push_back(TimedEvent::new(
                        time,
                        participant.particle_id,
                        position,
                        velocity,
                    )),
                    None => self.without_kinematics += 1,
                }
            }
        }
    }
}

/// First event line recorded under each time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageSummary {
    /// Time → event, in file order.
    pub events: IndexMap<TimeKey, EventRecord>,
    /// Lines skipped while scanning.
    pub diagnostics: Diagnostics,
}

/// Scan a message log and keep the first event line under each time.
///
/// Later event lines under a time that already has an entry are not
/// parsed at all.
pub fn summarize_events<R: BufRead>(
    reader: R,
    markers: &Markers,
) -> Result<MessageSummary, LogError> {
    let mut scanner = LogScanner::new(reader);
    let mut summary = MessageSummary::default();
    let mut current: Option<TimeKey> = None;

    while let Some(line) = scanner.next_line()? {
        if let Some(time) = grammar::parse_time_marker(line.text) {
            current = Some(time);
            continue;
        }
        if let Some(time) = &current {
            if summary.events.contains_key(time) {
                continue;
            }
        }
        let parsed = match message::parse_line(line.text, markers) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                summary.diagnostics.push(
                    line.number,
                    DiagnosticKind::MalformedLine,
                    format!("{e}: {}", line.text),
                );
                continue;
            }
        };
        for rejected in &parsed.rejected {
            summary
                .diagnostics
                .push(line.number, DiagnosticKind::MalformedGroup, rejected.as_str());
        }
        match &current {
            Some(time) => {
                summary.events.insert(time.clone(), parsed.record());
            }
            None => summary
                .diagnostics
                .push(line.number, DiagnosticKind::OrphanLine, line.text),
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::{EventKind, ParticleId};

    const LOG: &str = "\
0
[SubV_defs::logging_out: {[subV_id: 1, p_id: 1, pos: <0 0 >, vel: <1 0 >][subV_id: 1, p_id: 2, pos: <4 0 >, vel: <-1 0 >]}] generated by model subV
[Tracker_defs::response_out: {(p_id:1): [0 0 , is_ri: false]}] generated by model tracker
2
[SubV_defs::collision_out: {[(p_id:1): 2 0 ][(p_id:2): 2 0 ]}] generated by model subV
[SubV_defs::logging_out: {[subV_id: 1, p_id: 1, pos: <2 0 >, vel: <-1 0 >]}] generated by model subV
[SubV_defs::logging_out: {[subV_id: 1, p_id: 2, pos: <2 zero >, vel: <1 0 >]}] generated by model subV
3
[RandomImpulse_defs::impulse_out: {[(p_id:2): 0 1 ]}] generated by model random_impulse
";

    #[test]
    fn emits_every_participant_with_kinematics() {
        let mut stream = EventStream::new(LOG.as_bytes(), Markers::default());
        let events: Vec<_> = stream.by_ref().collect::<Result<_, _>>().unwrap();
        let summary: Vec<_> = events.iter().map(|e| (e.time, e.particle_id.0)).collect();
        assert_eq!(summary, vec![(0.0, 1), (0.0, 2), (2.0, 1)]);
        assert_eq!(events[1].velocity.as_slice(), &[-1.0, 0.0]);

        // Collision and impulse lines have no kinematics.
        assert_eq!(stream.without_kinematics(), 3);
        // The bad number on line 7 skipped that line only.
        assert_eq!(stream.diagnostics().count(DiagnosticKind::MalformedLine), 1);
        assert_eq!(stream.diagnostics().entries()[0].line, 7);
        assert_eq!(stream.lines_read(), 9);
    }

    #[test]
    fn orphan_event_lines_are_reported() {
        let log = "[SubV_defs::logging_out: {[p_id: 1, pos: <0 0 >, vel: <0 0 >]}]\n1\n";
        let mut stream = EventStream::new(log.as_bytes(), Markers::default());
        assert!(stream.next().is_none());
        assert_eq!(stream.diagnostics().count(DiagnosticKind::OrphanLine), 1);
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut stream = EventStream::new("0\n".as_bytes(), Markers::default());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn summary_keeps_first_line_per_time() {
        let summary = summarize_events(LOG.as_bytes(), &Markers::default()).unwrap();
        let times: Vec<_> = summary.events.keys().map(TimeKey::as_str).collect();
        assert_eq!(times, vec!["0", "2", "3"]);
        assert_eq!(
            summary.events["2"],
            EventRecord {
                kind: EventKind::Collision,
                particles: vec![ParticleId(1), ParticleId(2)],
            }
        );
        assert_eq!(summary.events["3"].kind, EventKind::Impulse);
        // The malformed line under time 2 was never parsed.
        assert!(summary.diagnostics.is_empty());
    }
}

//! Line-level diagnostics collected while scanning a log.
//!
//! Scanners skip lines and bracket groups that fail their grammar instead
//! of aborting. Each skip becomes a [`Diagnostic`] so callers decide
//! whether to surface, log, or ignore it. [`Diagnostics::push`] also
//! mirrors every entry to `tracing` at `warn` level.

use std::fmt;

/// Why a line or group was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// One bracket group did not match its pattern; the rest of the line
    /// was kept.
    MalformedGroup,
    /// The whole line failed its grammar and was skipped.
    MalformedLine,
    /// A data or event line appeared before the first time marker.
    OrphanLine,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGroup => write!(f, "malformed group"),
            Self::MalformedLine => write!(f, "malformed line"),
            Self::OrphanLine => write!(f, "line before first time marker"),
        }
    }
}

/// A skipped line or group, with its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the scanned log.
    pub line: u64,
    /// Category of the skip.
    pub kind: DiagnosticKind,
    /// Human-readable detail, usually the offending text.
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.detail)
    }
}

/// Ordered collection of diagnostics from one scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skip and emit it as a `warn` event.
    pub fn push(&mut self, line: u64, kind: DiagnosticKind, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::warn!(line, kind = %kind, detail = %detail, "skipped log content");
        self.entries.push(Diagnostic { line, kind, detail });
    }

    /// All diagnostics in the order they were recorded.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was skipped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Consume the collection, returning the entries.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

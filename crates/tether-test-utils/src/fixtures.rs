//! Instrumented event sources.
//!
//! - [`CountingEvents`] counts how many items a consumer pulled.
//! - [`FailingEvents`] yields an I/O error after N events.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tether_core::{LogError, TimedEvent};

/// Wraps a list of events and counts every `next()` call.
///
/// The counter is shared, so a test can keep a handle after moving the
/// source into the code under test.
pub struct CountingEvents {
    events: std::vec::IntoIter<TimedEvent>,
    pulls: Arc<AtomicUsize>,
}

impl CountingEvents {
    pub fn new(events: Vec<TimedEvent>) -> Self {
        Self {
            events: events.into_iter(),
            pulls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the pull counter.
    pub fn pulls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.pulls)
    }
}

impl Iterator for CountingEvents {
    type Item = Result<TimedEvent, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pulls.fetch_add(1, Ordering::Relaxed);
        self.events.next().map(Ok)
    }
}

/// Yields the given events, then one I/O error, then nothing.
pub struct FailingEvents {
    events: std::vec::IntoIter<TimedEvent>,
    failed: bool,
}

impl FailingEvents {
    pub fn new(events: Vec<TimedEvent>) -> Self {
        Self {
            events: events.into_iter(),
            failed: false,
        }
    }
}

impl Iterator for FailingEvents {
    type Item = Result<TimedEvent, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.events.next() {
            return Some(Ok(event));
        }
        if self.failed {
            return None;
        }
        self.failed = true;
        Some(Err(LogError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "log truncated",
        ))))
    }
}

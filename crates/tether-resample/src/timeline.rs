//! Query times for the resampler.
//!
//! A [`QueryTimeline`] is the usual `start..=end` by `step` grid; an
//! explicit list covers irregular sampling. Both are validated when
//! built, so a [`QueryTimes`] in hand always yields at least one finite
//! time and every time is strictly greater than the one before.

use tether_core::QueryError;

// ── QueryTimeline ──────────────────────────────────────────────────

/// Evenly spaced query times from `start` to `end` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryTimeline {
    start: f64,
    end: f64,
    step: f64,
}

impl QueryTimeline {
    /// Build a timeline.
    ///
    /// Rejects non-finite values, `start > end`, `step <= 0`, and steps
    /// so close to the floating-point spacing at `start` or `end` that
    /// two successive times could round to the same value.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, QueryError> {
        for value in [start, end, step] {
            if !value.is_finite() {
                return Err(QueryError::NonFinite { value });
            }
        }
        if start > end {
            return Err(QueryError::StartAfterEnd { start, end });
        }
        if step <= 0.0 {
            return Err(QueryError::NonPositiveStep { step });
        }
        // Each `start + i·step` carries at most two ulps of rounding.
        let magnitude = start.abs().max(end.abs());
        if step <= 4.0 * (magnitude.next_up() - magnitude) {
            return Err(QueryError::StepTooSmall { start, step });
        }
        Ok(Self { start, end, step })
    }

    /// First query time.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound, included when a step lands on it.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Spacing between query times.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The `index`-th query time, or `None` past `end`.
    ///
    /// Computed as `start + index·step` so long timelines do not drift.
    pub fn time_at(&self, index: u64) -> Option<f64> {
        let t = self.start + index as f64 * self.step;
        (t <= self.end).then_some(t)
    }
}

// ── QueryTimes ─────────────────────────────────────────────────────

/// The times a resampler emits frames at.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryTimes {
    /// An evenly spaced grid.
    Timeline(QueryTimeline),
    /// Caller-chosen times. Must be non-empty, finite, and strictly
    /// increasing; see [`QueryTimes::explicit`].
    Explicit(Vec<f64>),
}

impl QueryTimes {
    /// Validate and wrap an explicit list of times.
    pub fn explicit(times: Vec<f64>) -> Result<Self, QueryError> {
        let times = Self::Explicit(times);
        times.validate()?;
        Ok(times)
    }

    /// Check the ordering and finiteness invariants.
    ///
    /// A [`QueryTimeline`] is valid by construction; an `Explicit` list
    /// built directly is checked here.
    pub fn validate(&self) -> Result<(), QueryError> {
        let Self::Explicit(times) = self else {
            return Ok(());
        };
        let Some(&first) = times.first() else {
            return Err(QueryError::Empty);
        };
        if !first.is_finite() {
            return Err(QueryError::NonFinite { value: first });
        }
        for pair in times.windows(2) {
            let (previous, next) = (pair[0], pair[1]);
            if !next.is_finite() {
                return Err(QueryError::NonFinite { value: next });
            }
            if next <= previous {
                return Err(QueryError::NotIncreasing { previous, next });
            }
        }
        Ok(())
    }

    /// Iterate the times lazily.
    pub fn iter(&self) -> QueryTimesIter {
        self.clone().into_iter()
    }
}

impl From<QueryTimeline> for QueryTimes {
    fn from(timeline: QueryTimeline) -> Self {
        Self::Timeline(timeline)
    }
}

impl IntoIterator for QueryTimes {
    type Item = f64;
    type IntoIter = QueryTimesIter;

    fn into_iter(self) -> QueryTimesIter {
        match self {
            Self::Timeline(timeline) => QueryTimesIter::Timeline { timeline, next: 0 },
            Self::Explicit(times) => QueryTimesIter::Explicit(times.into_iter()),
        }
    }
}

/// Lazy iterator over [`QueryTimes`].
#[derive(Clone, Debug)]
pub enum QueryTimesIter {
    /// Walking a grid by index.
    Timeline {
        /// The grid.
        timeline: QueryTimeline,
        /// Index of the next time to produce.
        next: u64,
    },
    /// Walking an explicit list.
    Explicit(std::vec::IntoIter<f64>),
}

impl Iterator for QueryTimesIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Self::Timeline { timeline, next } => {
                let t = timeline.time_at(*next)?;
                *next += 1;
                Some(t)
            }
            Self::Explicit(times) => times.next(),
        }
    }
}

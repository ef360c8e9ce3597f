//! Sweep-line merge of an event stream with query times.

use indexmap::IndexMap;
use tether_core::{LogError, ParticleId, QueryError, TimedEvent, Vector};

use crate::timeline::{QueryTimes, QueryTimesIter};

/// Every known particle's extrapolated position at one query time.
#[derive(Clone, Debug, PartialEq)]
pub struct ResampledFrame {
    /// The query time.
    pub time: f64,
    /// Positions in first-sighting order. Particles with no event at or
    /// before `time` are absent.
    pub positions: IndexMap<ParticleId, Vector>,
}

impl ResampledFrame {
    /// Position of `id`, if it has been seen.
    pub fn get(&self, id: ParticleId) -> Option<&Vector> {
        self.positions.get(&id)
    }

    /// Number of particles in the frame.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no particle had been seen yet.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Last recorded kinematics of one particle.
#[derive(Clone, Debug)]
struct ParticleState {
    updated_at: f64,
    position: Vector,
    velocity: Vector,
}

impl ParticleState {
    fn extrapolate(&self, time: f64) -> Vector {
        let elapsed = time - self.updated_at;
        self.position
            .iter()
            .zip(&self.velocity)
            .map(|(p, v)| p + v * elapsed)
            .collect()
    }
}

/// Reconstructs particle positions at query times from an event stream.
///
/// Yields one [`ResampledFrame`] per query time. Events at exactly a
/// query time are applied before that frame is emitted. Once the query
/// times run out, no further events are pulled. An error from the event
/// source is yielded once and ends the iteration.
pub struct Resampler<I> {
    events: I,
    times: QueryTimesIter,
    query: Option<f64>,
    held: Option<TimedEvent>,
    states: IndexMap<ParticleId, ParticleState>,
    events_done: bool,
    failed: bool,
    applied: u64,
}

impl<I> Resampler<I>
where
    I: Iterator<Item = Result<TimedEvent, LogError>>,
{
    /// Pair `events` with `query_times`.
    ///
    /// The query times are checked here; on rejection `events` is dropped
    /// without a single item having been pulled.
    pub fn new(events: I, query_times: QueryTimes) -> Result<Self, QueryError> {
        query_times.validate()?;
        let mut times = query_times.into_iter();
        let query = times.next();
        if query.is_none() {
            return Err(QueryError::Empty);
        }
        Ok(Self {
            events,
            times,
            query,
            held: None,
            states: IndexMap::new(),
            events_done: false,
            failed: false,
            applied: 0,
        })
    }

    /// Number of distinct particles seen so far.
    pub fn particles_seen(&self) -> usize {
        self.states.len()
    }

    /// Number of events applied so far.
    pub fn events_applied(&self) -> u64 {
        self.applied
    }

    fn apply(&mut self, event: TimedEvent) {
        self.applied += 1;
        self.states.insert(
            event.particle_id,
            ParticleState {
                updated_at: event.time,
                position: event.position,
                velocity: event.velocity,
            },
        );
    }

    fn frame_at(&self, time: f64) -> ResampledFrame {
        ResampledFrame {
            time,
            positions: self
                .states
                .iter()
                .map(|(&id, state)| (id, state.extrapolate(time)))
                .collect(),
        }
    }
}

impl<I> Iterator for Resampler<I>
where
    I: Iterator<Item = Result<TimedEvent, LogError>>,
{
    type Item = Result<ResampledFrame, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let query = self.query?;
        loop {
            if self.held.is_none() && !self.events_done {
                match self.events.next() {
                    Some(Ok(event)) => self.held = Some(event),
                    Some(Err(e)) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                    None => {
                        self.events_done = true;
                        tracing::debug!(
                            events = self.applied,
                            particles = self.states.len(),
                            "event stream exhausted"
                        );
                    }
                }
            }
            match self.held.take() {
                Some(event) if event.time <= query => self.apply(event),
                held => {
                    self.held = held;
                    break;
                }
            }
        }
        let frame = self.frame_at(query);
        self.query = self.times.next();
        Some(Ok(frame))
    }
}

//! Particle snapshots and discrete events.

use std::fmt;

use crate::id::{ParticleId, Vector};

/// A particle's position and velocity at a recorded time.
///
/// Position and velocity always share a dimension (2 or 3); the log
/// decoders reject records where they disagree.
///
/// # Examples
///
/// ```
/// use smallvec::smallvec;
/// use tether_core::{ParticleId, Snapshot};
///
/// let s = Snapshot::new(ParticleId(4), smallvec![1.0, 2.0], smallvec![0.5, 0.0]);
/// assert_eq!(s.dimension(), 2);
///
/// let half = s.scaled(0.5);
/// assert_eq!(half.position.as_slice(), &[0.5, 1.0]);
/// assert_eq!(half.velocity.as_slice(), &[0.25, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// The particle this snapshot describes.
    pub particle_id: ParticleId,
    /// Position components.
    pub position: Vector,
    /// Velocity components, same dimension as `position`.
    pub velocity: Vector,
    /// Sub-volume that reported this snapshot, when the log names it.
    pub sub_volume: Option<String>,
}

impl Snapshot {
    /// Create an untagged snapshot.
    pub fn new(particle_id: ParticleId, position: Vector, velocity: Vector) -> Self {
        Self {
            particle_id,
            position,
            velocity,
            sub_volume: None,
        }
    }

    /// Attach the reporting sub-volume.
    pub fn with_sub_volume(mut self, sub_volume: impl Into<String>) -> Self {
        self.sub_volume = Some(sub_volume.into());
        self
    }

    /// Number of spatial components.
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Copy with position and velocity multiplied by `factor`.
    ///
    /// Used to map simulation coordinates onto a display area.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            particle_id: self.particle_id,
            position: self.position.iter().map(|x| x * factor).collect(),
            velocity: self.velocity.iter().map(|x| x * factor).collect(),
            sub_volume: self.sub_volume.clone(),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, pos: {:?}, vel: {:?}",
            self.particle_id,
            self.position.as_slice(),
            self.velocity.as_slice()
        )
    }
}

/// Kind of a message-log event line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A random impulse applied to a particle.
    Impulse,
    /// A collision reported by a sub-volume.
    Collision,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impulse => write!(f, "impulse"),
            Self::Collision => write!(f, "collision"),
        }
    }
}

/// One decoded message-log line: its kind and the particles involved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    /// Impulse or collision.
    pub kind: EventKind,
    /// Participant IDs in line order. Never empty.
    pub particles: Vec<ParticleId>,
}

/// A particle's kinematic state reported by the message log at `time`.
///
/// Produced in file order; within one log, times are non-decreasing.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedEvent {
    /// Simulation time of the enclosing time marker.
    pub time: f64,
    /// The particle this event updates.
    pub particle_id: ParticleId,
    /// Position at `time`.
    pub position: Vector,
    /// Velocity from `time` onward.
    pub velocity: Vector,
}

impl TimedEvent {
    /// Create an event.
    pub fn new(time: f64, particle_id: ParticleId, position: Vector, velocity: Vector) -> Self {
        Self {
            time,
            particle_id,
            position,
            velocity,
        }
    }
}

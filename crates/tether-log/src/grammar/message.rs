//! Message-log event lines.
//!
//! Event lines are classified by literal markers and then split into
//! `][`-separated segments, each naming one participant:
//!
//! ```text
//! [SubV_defs::collision_out: {[(p_id:1): 0.5 1.0 ][(p_id:2): 0.0 0.0 ]}] generated by model subV
//! [SubV_defs::logging_out: {[subV_id: 1, p_id: 3, pos: <1 2 >, vel: <0 1 >]}] generated by model subV
//! ```
//!
//! Segments that also carry `pos: <…>` and `vel: <…>` give the
//! participant's kinematic state, which is what the resampler consumes.

use std::sync::LazyLock;

use regex::Regex;
use tether_core::{EventKind, EventRecord, LineError, ParticleId, Vector};

use super::{dimension_problem, parse_particle_id, parse_u64, parse_vector};
use crate::options::Markers;

static PARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p_id:\s*(\d+)").expect("particle pattern is valid"));
static SUB_VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"subV_id:\s*(\d+)").expect("sub-volume pattern is valid"));
static POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pos:?\s*<([^>]*)>").expect("position pattern is valid"));
static VELOCITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vel:?\s*<([^>]*)>").expect("velocity pattern is valid"));

/// One particle named by an event line.
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    /// The particle.
    pub particle_id: ParticleId,
    /// Reporting sub-volume, when the segment names one.
    pub sub_volume: Option<u64>,
    /// Position and velocity, when the segment carries both.
    pub kinematics: Option<(Vector, Vector)>,
}

/// The decoded contents of one message-log event line.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageLine {
    /// Impulse or collision.
    pub kind: EventKind,
    /// Participants in line order. Never empty.
    pub participants: Vec<Participant>,
    /// One description per skipped segment or unusable kinematics.
    pub rejected: Vec<String>,
}

impl MessageLine {
    /// The kind and participant IDs, without kinematics.
    pub fn record(&self) -> EventRecord {
        EventRecord {
            kind: self.kind,
            particles: self.participants.iter().map(|p| p.particle_id).collect(),
        }
    }
}

/// Classify a line by its markers.
///
/// The impulse marker takes precedence over the collision marker.
pub fn classify(line: &str, markers: &Markers) -> Option<EventKind> {
    if line.contains(markers.impulse.as_str()) {
        Some(EventKind::Impulse)
    } else if line.contains(markers.collision.as_str()) {
        Some(EventKind::Collision)
    } else {
        None
    }
}

/// Decode one message-log line.
///
/// Returns `Ok(None)` for lines that are not event lines at all. A
/// classified line that names no particle is an error, as is a number
/// that fails to decode.
///
/// # Examples
///
/// ```
/// use tether_core::{EventKind, ParticleId};
/// use tether_log::grammar::message::parse_line;
/// use tether_log::Markers;
///
/// let markers = Markers::default();
/// let line = "[SubV_defs::collision_out: {[(p_id:1): 0 0 ][(p_id:2): 1 1 ]}] generated by model subV";
/// let event = parse_line(line, &markers).unwrap().unwrap();
/// assert_eq!(event.kind, EventKind::Collision);
/// assert_eq!(event.record().particles, vec![ParticleId(1), ParticleId(2)]);
///
/// assert!(parse_line("[tracker_defs::out: {}] generated by model tracker", &markers)
///     .unwrap()
///     .is_none());
/// ```
pub fn parse_line(line: &str, markers: &Markers) -> Result<Option<MessageLine>, LineError> {
    let Some(kind) = classify(line, markers) else {
        return Ok(None);
    };

    let mut participants = Vec::new();
    let mut rejected = Vec::new();
    for segment in line.trim().split("][") {
        let Some(caps) = PARTICLE.captures(segment) else {
            rejected.push(format!("no match for: {segment}"));
            continue;
        };
        let particle_id = parse_particle_id(&caps[1])?;
        let sub_volume = match SUB_VOLUME.captures(segment) {
            Some(c) => Some(parse_u64(&c[1])?),
            None => None,
        };
        let kinematics = match (POSITION.captures(segment), VELOCITY.captures(segment)) {
            (Some(p), Some(v)) => {
                let position = parse_vector(&p[1])?;
                let velocity = parse_vector(&v[1])?;
                match dimension_problem(&position, &velocity) {
                    Some(problem) => {
                        rejected.push(format!("{problem} for particle {particle_id}"));
                        None
                    }
                    None => Some((position, velocity)),
                }
            }
            (None, None) => None,
            _ => {
                rejected.push(format!("particle {particle_id} has only one of pos/vel"));
                None
            }
        };
        participants.push(Participant {
            particle_id,
            sub_volume,
            kinematics,
        });
    }

    if participants.is_empty() {
        return Err(LineError::NoParticles);
    }
    Ok(Some(MessageLine {
        kind,
        participants,
        rejected,
    }))
}

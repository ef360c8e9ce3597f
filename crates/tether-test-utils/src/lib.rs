//! Sample logs and fixtures for tether development.
//!
//! The sample logs follow the simulator's output layout closely enough to
//! exercise every grammar: sub-volume lines split across models, a
//! non-sub-volume model line to ignore, collision and impulse lines, and
//! logging lines carrying kinematics.
//!
//! [`fixtures`] holds instrumented event sources for resampler tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io::Write;

use smallvec::SmallVec;
use tempfile::NamedTempFile;
use tether_core::{ParticleId, Snapshot, TimedEvent, Vector};

/// State log with three times; time `0` is split over two sub-volumes.
pub const STATE_LOG: &str = "\
0
State for model tracker is {}
State for model subV_1 is [(p_id:1): pos<0.000000 0.000000 >, vel<1.000000 0.000000 >]
State for model subV_2 is [(p_id:2): pos<10.000000 0.000000 >, vel<-1.000000 0.000000 >]
2
State for model tracker is {}
State for model subV_1 is [(p_id:1): pos<2.000000 0.000000 >, vel<-1.000000 0.000000 >][(p_id:2): pos<8.000000 0.000000 >, vel<1.000000 0.000000 >]
3.5
State for model subV_2 is [(p_id:2): pos<9.500000 0.000000 >, vel<0.000000 1.000000 >]
";

/// Message log matching [`STATE_LOG`].
pub const MESSAGE_LOG: &str = "\
0
[SubV_defs::logging_out: {[subV_id: 1, p_id: 1, pos: <0.000000 0.000000 >, vel: <1.000000 0.000000 >]}] generated by model subV_1
[SubV_defs::logging_out: {[subV_id: 2, p_id: 2, pos: <10.000000 0.000000 >, vel: <-1.000000 0.000000 >]}] generated by model subV_2
2
[SubV_defs::collision_out: {[(p_id:1): 2.000000 0.000000 ][(p_id:2): 8.000000 0.000000 ]}] generated by model subV_1
[SubV_defs::logging_out: {[subV_id: 1, p_id: 1, pos: <2.000000 0.000000 >, vel: <-1.000000 0.000000 >][subV_id: 1, p_id: 2, pos: <8.000000 0.000000 >, vel: <1.000000 0.000000 >]}] generated by model subV_1
[Tracker_defs::response_out: {(p_id:1): [2.000000 0.000000 , is_ri: false]}] generated by model tracker
3.5
[RandomImpulse_defs::impulse_out: {[(p_id:2): 0.000000 1.000000 ]}] generated by model random_impulse
[SubV_defs::logging_out: {[subV_id: 2, p_id: 2, pos: <9.500000 0.000000 >, vel: <0.000000 1.000000 >]}] generated by model subV_2
";

/// Particle configuration naming the particles in [`STATE_LOG`].
pub const CONFIG_JSON: &str = r#"{
  "species": {
    "ligand": { "mass": 2.0, "radius": 0.5 },
    "receptor": { "mass": 10.0, "radius": 1.5 }
  },
  "particles": {
    "1": { "species": "ligand", "position": [0.0, 0.0], "velocity": [1.0, 0.0] },
    "2": { "species": "receptor", "position": [10.0, 0.0], "velocity": [-1.0, 0.0] }
  }
}"#;

/// Write `contents` to a fresh temporary file.
pub fn temp_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Build a [`Vector`] from a slice.
pub fn vector(components: &[f64]) -> Vector {
    SmallVec::from_slice(components)
}

/// Build a [`TimedEvent`] from plain values.
pub fn event(time: f64, id: u64, position: &[f64], velocity: &[f64]) -> TimedEvent {
    TimedEvent::new(time, ParticleId(id), vector(position), vector(velocity))
}

/// Build a [`Snapshot`] from plain values.
pub fn snapshot(id: u64, position: &[f64], velocity: &[f64]) -> Snapshot {
    Snapshot::new(ParticleId(id), vector(position), vector(velocity))
}

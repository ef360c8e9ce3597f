//! Synthetic log generators for benchmarks.
//!
//! - [`synthetic_state_log`]: state log with `sub_volumes` lines per time
//! - [`synthetic_message_log`]: message log with one logging line per time
//!
//! Values come from a fixed integer mix of the seed so runs are
//! reproducible without a random number generator.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write;

/// Shape of a generated log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogShape {
    /// Number of time markers.
    pub times: usize,
    /// Particles reported per time.
    pub particles: usize,
    /// Sub-volume lines the particles are split across.
    pub sub_volumes: usize,
}

impl LogShape {
    /// 1000 times, 64 particles, 4 sub-volumes.
    pub fn reference() -> Self {
        Self {
            times: 1000,
            particles: 64,
            sub_volumes: 4,
        }
    }
}

/// Deterministic value in `[-50, 50)` for `(seed, a, b)`.
fn mix(seed: u64, a: usize, b: usize) -> f64 {
    let h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add((a as u64).wrapping_mul(1442695040888963407))
        .wrapping_add(b as u64)
        .rotate_left(17);
    (h % 10_000) as f64 / 100.0 - 50.0
}

/// Build a state log of the given shape.
pub fn synthetic_state_log(shape: LogShape, seed: u64) -> String {
    let mut out = String::new();
    let ids: Vec<usize> = (0..shape.particles).collect();
    let per_line = shape.particles.div_ceil(shape.sub_volumes.max(1)).max(1);
    for t in 0..shape.times {
        let _ = writeln!(out, "{}", t as f64 * 0.25);
        let _ = writeln!(out, "State for model tracker is {{}}");
        for (v, chunk) in ids.chunks(per_line).enumerate() {
            let _ = write!(out, "State for model subV_{v} is ");
            for &p in chunk {
                let _ = write!(
                    out,
                    "[(p_id:{p}): pos<{:.6} {:.6} >, vel<{:.6} {:.6} >]",
                    mix(seed, t, p),
                    mix(seed, p, t),
                    mix(seed ^ 1, t, p) / 50.0,
                    mix(seed ^ 2, t, p) / 50.0,
                );
            }
            out.push('\n');
        }
    }
    out
}

/// Build a message log with one logging line per time, each reporting
/// every particle.
pub fn synthetic_message_log(shape: LogShape, seed: u64) -> String {
    let mut out = String::new();
    for t in 0..shape.times {
        let _ = writeln!(out, "{}", t as f64 * 0.25);
        out.push_str("[SubV_defs::logging_out: {");
        for p in 0..shape.particles {
            let _ = write!(
                out,
                "[subV_id: 0, p_id: {p}, pos: <{:.6} {:.6} >, vel: <{:.6} {:.6} >]",
                mix(seed, t, p),
                mix(seed, p, t),
                mix(seed ^ 1, t, p) / 50.0,
                mix(seed ^ 2, t, p) / 50.0,
            );
        }
        out.push_str("}] generated by model subV_0\n");
    }
    out
}

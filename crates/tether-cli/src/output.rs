//! Line formats written to standard output.
//!
//! One event per line as `[time, p_id, [pos], [vel]]`, one frame per line
//! as `[time, {p_id: [pos], ...}]`. Floats use Rust's shortest round-trip
//! form, so `1` prints as `1.0`.

use std::io::{self, Write};

use tether::prelude::{ResampledFrame, TimedEvent};

/// Write one decoded event.
pub fn write_event<W: Write>(out: &mut W, event: &TimedEvent) -> io::Result<()> {
    writeln!(
        out,
        "[{:?}, {}, {:?}, {:?}]",
        event.time,
        event.particle_id,
        event.position.as_slice(),
        event.velocity.as_slice()
    )
}

/// Write one resampled frame.
pub fn write_frame<W: Write>(out: &mut W, frame: &ResampledFrame) -> io::Result<()> {
    write!(out, "[{:?}, {{", frame.time)?;
    for (i, (id, position)) in frame.positions.iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{id}: {:?}", position.as_slice())?;
    }
    writeln!(out, "}}]")
}

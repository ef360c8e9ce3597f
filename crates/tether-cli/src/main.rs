//! `tether-tools`: decode or resample a simulator message log.
//!
//! ```text
//! tether-tools < messages.txt              # events as [time, p_id, [pos], [vel]]
//! tether-tools messages.txt                # same, reading the file
//! tether-tools messages.txt END            # frames [time, {p_id: [pos]}] for 0..=END step 1
//! tether-tools messages.txt END STEP       # custom step
//! tether-tools messages.txt END STEP START # custom start
//! ```
//!
//! Standard output carries only data. Skipped lines and errors go to
//! standard error through `tracing`; set `RUST_LOG` to see more.

mod output;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tether::prelude::{EventStream, Markers, QueryTimeline, Resampler};
use tracing_subscriber::EnvFilter;

use crate::output::{write_event, write_frame};

/// Decode or resample a simulator message log
#[derive(Debug, Parser)]
#[command(name = "tether-tools", version, allow_negative_numbers = true)]
struct Cli {
    /// Message log to read; standard input when omitted
    file: Option<PathBuf>,

    /// Last query time; switches to resampled frames
    #[arg(requires = "file")]
    end: Option<f64>,

    /// Spacing between query times [default: 1.0]
    #[arg(requires = "end")]
    step: Option<f64>,

    /// First query time [default: 0.0]
    #[arg(requires = "step")]
    start: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tether-tools: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match (cli.file.as_deref(), cli.end) {
        (Some(path), Some(end)) => {
            let start = cli.start.unwrap_or(0.0);
            let step = cli.step.unwrap_or(1.0);
            let timeline =
                QueryTimeline::new(start, end, step).context("invalid query timeline")?;
            resample(path, timeline, &mut out)?;
        }
        // `end` requires `file`, so only the decode forms reach here.
        (path, _) => decode(path, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn resample<W: Write>(path: &Path, timeline: QueryTimeline, out: &mut W) -> Result<()> {
    let events = EventStream::new(open(Some(path))?, Markers::default());
    for frame in Resampler::new(events, timeline.into())? {
        write_frame(out, &frame?)?;
    }
    Ok(())
}

fn decode<W: Write>(path: Option<&Path>, out: &mut W) -> Result<()> {
    let mut events = EventStream::new(open(path)?, Markers::default());
    for event in events.by_ref() {
        write_event(out, &event?)?;
    }
    tracing::debug!(
        lines = events.lines_read(),
        skipped = events.diagnostics().len(),
        without_kinematics = events.without_kinematics(),
        "message log decoded"
    );
    Ok(())
}

fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positionals_fill_in_order() {
        let cli = Cli::try_parse_from(["tether-tools", "log.txt", "4", "0.5"]).unwrap();
        assert_eq!(cli.file.as_deref(), Some(Path::new("log.txt")));
        assert_eq!((cli.end, cli.step, cli.start), (Some(4.0), Some(0.5), None));

        let cli = Cli::try_parse_from(["tether-tools"]).unwrap();
        assert!(cli.file.is_none() && cli.end.is_none());
    }

    #[test]
    fn lone_number_is_a_file_name() {
        let cli = Cli::try_parse_from(["tether-tools", "4"]).unwrap();
        assert_eq!(cli.file.as_deref(), Some(Path::new("4")));
        assert!(cli.end.is_none());
    }
}

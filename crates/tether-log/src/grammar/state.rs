//! State-log data lines.
//!
//! ```text
//! State for model subV is [(p_id:1): pos<0.5 1.0 >, vel<1.0 0.0 >][(p_id:2): pos<…>, vel<…>]
//! ```
//!
//! A data line contains the sub-volume marker followed by bracket groups
//! with no separator between them. Each group is matched against a fixed
//! pattern; groups that do not match are dropped and reported, the rest
//! of the line is kept.

use std::sync::LazyLock;

use regex::Regex;
use tether_core::{LineError, Snapshot};

use super::{dimension_problem, parse_particle_id, parse_vector};
use crate::options::Markers;

static GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(p_id:\s*(?P<id>\d+)\):\s*pos<(?P<pos>[^>]*)>,\s*vel<(?P<vel>[^>]*)>")
        .expect("state group pattern is valid")
});

/// The decoded contents of one state-log data line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateLine {
    /// Name of the reporting sub-volume model, when the line names one.
    pub sub_volume: Option<String>,
    /// Successfully decoded snapshots, in line order.
    pub snapshots: Vec<Snapshot>,
    /// One description per dropped group.
    pub rejected: Vec<String>,
}

/// True when `line` carries sub-volume state.
pub fn is_data_line(line: &str, markers: &Markers) -> bool {
    line.contains(markers.sub_volume.as_str())
}

/// Decode one state-log data line.
///
/// Groups that fail the pattern or carry inconsistent dimensions are
/// listed in [`StateLine::rejected`]. A number that fails to decode
/// inside an otherwise well-formed group fails the whole line.
///
/// # Examples
///
/// ```
/// use tether_log::grammar::state::parse_line;
/// use tether_log::Markers;
///
/// let line = "State for model subV is [(p_id:1): pos<0 0 >, vel<1 0 >][(p_id:2): pos<1 1 >, vel<0 0 >]";
/// let parsed = parse_line(line, &Markers::default()).unwrap();
/// assert_eq!(parsed.snapshots.len(), 2);
/// assert_eq!(parsed.sub_volume.as_deref(), Some("subV"));
/// assert!(parsed.rejected.is_empty());
/// ```
pub fn parse_line(line: &str, markers: &Markers) -> Result<StateLine, LineError> {
    let start = line.find('[').ok_or(LineError::NoGroups)?;
    let sub_volume = sub_volume_name(&line[..start], markers);
    let body = line[start..].trim().trim_matches(['[', ']']);

    let mut parsed = StateLine {
        sub_volume,
        ..StateLine::default()
    };
    if body.trim().is_empty() {
        return Ok(parsed);
    }

    for group in body.split("][") {
        let Some(caps) = GROUP.captures(group) else {
            parsed.rejected.push(format!("no match for: {group}"));
            continue;
        };
        let id = parse_particle_id(&caps["id"])?;
        let position = parse_vector(&caps["pos"])?;
        let velocity = parse_vector(&caps["vel"])?;
        if let Some(problem) = dimension_problem(&position, &velocity) {
            parsed.rejected.push(format!("{problem} in: {group}"));
            continue;
        }
        let mut snapshot = Snapshot::new(id, position, velocity);
        snapshot.sub_volume = parsed.sub_volume.clone();
        parsed.snapshots.push(snapshot);
    }
    Ok(parsed)
}

/// The whitespace-delimited token naming the sub-volume, if any.
fn sub_volume_name(prefix: &str, markers: &Markers) -> Option<String> {
    prefix
        .split_whitespace()
        .find(|token| token.contains(markers.sub_volume.as_str()))
        .map(|token| token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_')))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

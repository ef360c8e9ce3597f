//! Opening a run from files on disk.

use tether::prelude::*;
use tether::{DatasetError, StateSource};
use tether_test_utils::{temp_log, CONFIG_JSON, MESSAGE_LOG, STATE_LOG};

struct Run {
    state: tempfile::NamedTempFile,
    messages: tempfile::NamedTempFile,
    config: tempfile::NamedTempFile,
}

fn sample_run() -> Run {
    Run {
        state: temp_log(STATE_LOG),
        messages: temp_log(MESSAGE_LOG),
        config: temp_log(CONFIG_JSON),
    }
}

fn open(run: &Run, loading: StateLoading) -> Dataset {
    Dataset::open(
        run.state.path(),
        run.messages.path(),
        run.config.path(),
        loading,
    )
    .unwrap()
}

#[test]
fn indexed_and_resident_agree() {
    let run = sample_run();
    let indexed = open(&run, StateLoading::Indexed);
    let resident = open(&run, StateLoading::Resident);
    assert!(matches!(indexed.states(), StateSource::Indexed(_)));
    assert!(matches!(resident.states(), StateSource::Resident(_)));

    let times: Vec<_> = indexed.states().times().iter().map(|t| t.as_str()).collect();
    assert_eq!(times, vec!["0", "2", "3.5"]);
    for time in times {
        assert_eq!(
            indexed.snapshots_at(time).unwrap(),
            resident.snapshots_at(time).unwrap()
        );
    }
    assert!(matches!(
        resident.snapshots_at("7"),
        Err(LogError::NotFound { .. })
    ));
}

#[test]
fn events_and_properties_are_loaded() {
    let run = sample_run();
    let dataset = open(&run, StateLoading::default());
    let at_two = dataset.event_at("2").unwrap();
    assert_eq!(at_two.kind, EventKind::Collision);
    assert_eq!(at_two.particles, vec![ParticleId(1), ParticleId(2)]);
    assert_eq!(dataset.event_at("3.5").unwrap().kind, EventKind::Impulse);
    assert_eq!(dataset.properties().get(ParticleId(1)).unwrap().radius, 0.5);
}

#[test]
fn resident_guard_surfaces_as_log_error() {
    let run = sample_run();
    let options = LoadOptions::default().with_max_resident_bytes(8);
    let err = Dataset::open_with(
        run.state.path(),
        run.messages.path(),
        run.config.path(),
        StateLoading::Resident,
        &options,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DatasetError::Log(LogError::ResourceTooLarge { .. })
    ));
}

#[test]
fn invalid_options_are_rejected_first() {
    let run = sample_run();
    let mut options = LoadOptions::default();
    options.markers.impulse.clear();
    let err = Dataset::open_with(
        "/nonexistent/state.txt",
        run.messages.path(),
        run.config.path(),
        StateLoading::Indexed,
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, DatasetError::Options(_)));
}

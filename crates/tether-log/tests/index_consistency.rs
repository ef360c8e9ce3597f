//! Indexed lookups against the resident parser and the event stream
//! against a file on disk.

use std::sync::Arc;
use std::thread;

use tether_core::{DiagnosticKind, LogError, ParticleId};
use tether_log::{
    load_message_summary, load_state_log, EventStream, IndexPolicy, LoadOptions, Markers,
    StateIndex,
};
use tether_test_utils::{snapshot, temp_log, MESSAGE_LOG, STATE_LOG};

// ── Helpers ─────────────────────────────────────────────────────

fn both_policies() -> [LoadOptions; 2] {
    [
        LoadOptions::default(),
        LoadOptions::default().with_policy(IndexPolicy::LastWins),
    ]
}

// ── State log ───────────────────────────────────────────────────

#[test]
fn lookup_matches_resident_parse() {
    let file = temp_log(STATE_LOG);
    for options in both_policies() {
        let index = StateIndex::open(file.path(), &options).unwrap();
        let resident = load_state_log(file.path(), &options).unwrap();

        let indexed: Vec<_> = index.times().map(|t| t.as_str()).collect();
        let loaded: Vec<_> = resident.states.keys().map(|t| t.as_str()).collect();
        assert_eq!(indexed, loaded);
        assert_eq!(indexed, vec!["0", "2", "3.5"]);

        for time in index.times() {
            let looked_up = index.lookup(time.as_str()).unwrap();
            assert_eq!(
                looked_up.as_slice(),
                resident.get(time.as_str()).unwrap(),
                "time {time} under {:?}",
                options.policy
            );
        }
    }
}

#[test]
fn unparseable_line_is_skipped_the_same_way() {
    let log = "\
0
State for model subV_1 is [(p_id:1): pos<0 0 >, vel<1 0 >]
State for model subV_2 is [(p_id:2): pos<1 bad >, vel<0 1 >]
1
State for model subV_2 is [(p_id:2): pos<1 bad >, vel<0 1 >]
State for model subV_1 is [(p_id:1): pos<1 0 >, vel<1 0 >]
";
    let file = temp_log(log);
    let expected: [(Vec<u64>, Vec<u64>); 2] = [(vec![1], vec![1]), (vec![], vec![1])];
    for (options, (at_zero, at_one)) in both_policies().into_iter().zip(expected) {
        let index = StateIndex::open(file.path(), &options).unwrap();
        let resident = load_state_log(file.path(), &options).unwrap();
        for (time, expected) in [("0", at_zero), ("1", at_one)] {
            let found = index.lookup_with_diagnostics(time).unwrap();
            let ids: Vec<_> = found.snapshots.iter().map(|s| s.particle_id.0).collect();
            assert_eq!(ids, expected, "time {time} under {:?}", options.policy);
            assert_eq!(
                found.snapshots.as_slice(),
                resident.get(time).unwrap(),
                "time {time} under {:?}",
                options.policy
            );
        }
        let skipped = index.lookup_with_diagnostics("0").unwrap().diagnostics;
        assert_eq!(skipped.count(DiagnosticKind::MalformedLine), 1);
        assert_eq!(skipped.entries()[0].line, 3);
        assert_eq!(resident.diagnostics.count(DiagnosticKind::MalformedLine), 2);
    }
}

#[test]
fn aggregate_lookup_spans_sub_volumes() {
    let file = temp_log(STATE_LOG);
    let index = StateIndex::open(file.path(), &LoadOptions::default()).unwrap();
    let at_zero = index.lookup("0").unwrap();
    assert_eq!(
        at_zero,
        vec![
            snapshot(1, &[0.0, 0.0], &[1.0, 0.0]).with_sub_volume("subV_1"),
            snapshot(2, &[10.0, 0.0], &[-1.0, 0.0]).with_sub_volume("subV_2"),
        ]
    );
}

#[test]
fn lookup_uses_exact_time_text() {
    let file = temp_log(STATE_LOG);
    let index = StateIndex::open(file.path(), &LoadOptions::default()).unwrap();
    assert!(index.lookup("3.5").is_ok());
    assert!(matches!(
        index.lookup("3.50"),
        Err(LogError::NotFound { .. })
    ));
}

#[test]
fn index_build_is_deterministic() {
    let a = StateIndex::build(STATE_LOG.as_bytes(), &LoadOptions::default()).unwrap();
    let b = StateIndex::build(STATE_LOG.as_bytes(), &LoadOptions::default()).unwrap();
    assert_eq!(a.entries(), b.entries());
}

#[test]
fn index_is_shared_across_threads() {
    let file = temp_log(STATE_LOG);
    let index = Arc::new(StateIndex::open(file.path(), &LoadOptions::default()).unwrap());

    let handles: Vec<_> = ["0", "2", "3.5", "0", "2", "3.5"]
        .into_iter()
        .map(|time| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.lookup(time).unwrap().len())
        })
        .collect();
    let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![2, 2, 1, 2, 2, 1]);
}

// ── Message log ─────────────────────────────────────────────────

#[test]
fn event_stream_from_file() {
    let file = temp_log(MESSAGE_LOG);
    let mut stream = EventStream::open(file.path(), Markers::default()).unwrap();
    let events: Vec<_> = stream.by_ref().collect::<Result<_, _>>().unwrap();

    let order: Vec<_> = events.iter().map(|e| (e.time, e.particle_id.0)).collect();
    assert_eq!(order, vec![(0.0, 1), (0.0, 2), (2.0, 1), (2.0, 2), (3.5, 2)]);
    assert_eq!(events[4].velocity.as_slice(), &[0.0, 1.0]);
    assert!(stream
        .diagnostics()
        .entries()
        .iter()
        .all(|d| d.kind != DiagnosticKind::MalformedLine));
}

#[test]
fn message_summary_from_file() {
    let file = temp_log(MESSAGE_LOG);
    let summary = load_message_summary(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(summary.events.len(), 3);
    assert_eq!(
        summary.events["2"].particles,
        vec![ParticleId(1), ParticleId(2)]
    );
}

use std::time::Duration;

use mailsweep::session::progress::{batch_layout, eta, format_eta, progress_line, throughput};
use mailsweep::session::SessionStats;
use mailsweep::classifier::{Classification, RuleMatch};

#[test]
fn test_batch_layout_for_partial_last_batch() {
    assert_eq!(batch_layout(1247, 100), (13, 47));
    assert_eq!(batch_layout(1200, 100), (12, 100));
    assert_eq!(batch_layout(7, 100), (1, 7));
    assert_eq!(batch_layout(0, 100), (0, 0));
}

#[test]
fn test_chunks_agree_with_layout() {
    let handles: Vec<u32> = (1..=1247).collect();
    let batches: Vec<_> = handles.chunks(100).collect();

    assert_eq!(batches.len(), 13);
    assert_eq!(batches.last().unwrap().len(), 47);
}

#[test]
fn test_throughput_and_eta() {
    let rate = throughput(200, Duration::from_secs(10)).unwrap();
    assert!((rate - 20.0).abs() < f64::EPSILON);

    let remaining = eta(1000, 200, Duration::from_secs(10)).unwrap();
    assert_eq!(remaining, Duration::from_secs(40));
    assert_eq!(format_eta(Some(remaining)), "0.7m");
}

#[test]
fn test_eta_unknown_without_throughput() {
    assert_eq!(throughput(0, Duration::from_secs(5)), None);
    assert_eq!(throughput(10, Duration::ZERO), None);
    assert_eq!(eta(100, 0, Duration::from_secs(5)), None);
    assert_eq!(format_eta(None), "unknown");

    let line = progress_line(100, 0, Duration::ZERO);
    assert!(line.contains("0/100"));
    assert!(line.contains("ETA: unknown"));
}

#[test]
fn test_stats_keep_sum_invariant() {
    let mut stats = SessionStats::new();
    let delete = Classification::Delete(RuleMatch::pattern("digest"));

    for i in 0..10 {
        if i % 4 == 0 {
            stats.record(&delete);
        } else {
            stats.record(&Classification::Keep);
        }
        assert_eq!(stats.to_delete() + stats.kept(), stats.processed());
    }
    stats.exclude();

    assert_eq!(stats.processed(), 10);
    assert_eq!(stats.to_delete(), 3);
    assert_eq!(stats.kept(), 7);
    assert_eq!(stats.excluded(), 1);
}

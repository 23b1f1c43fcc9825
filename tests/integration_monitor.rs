//! Monitor integration tests
//!
//! Drives the full loop with a scripted prober, an in-memory recorder and a
//! termination request that arrives once the script is used up.

use std::time::Duration;

use netwatch::domain::{OutageEnd, ProbeOutcome, UNTERMINATED_SENTINEL};
use netwatch::monitor::{Monitor, MonitorConfig};
use netwatch::probe::ScriptedProber;
use netwatch::recorder::{CsvRecorder, HEADER, MemoryRecorder};
use netwatch::NetwatchError;

fn ok() -> ProbeOutcome {
    ProbeOutcome::success(Duration::from_millis(8))
}

fn fast() -> MonitorConfig {
    MonitorConfig::new(Duration::from_millis(1), false)
}

/// Run `outcomes`, then deliver a termination request mid-probe
async fn run_until_exhausted(
    outcomes: Vec<ProbeOutcome>,
    recorder: MemoryRecorder,
) -> Result<netwatch::monitor::RunSummary, NetwatchError> {
    let prober = ScriptedProber::new(outcomes);
    let exhausted = prober.exhausted();
    let monitor = Monitor::new(prober, recorder, fast());
    monitor.run(async move { exhausted.notified().await }).await
}

/// Integration test: an outage between two successes is recorded once, closed
#[tokio::test]
async fn test_outage_recorded_on_restoration() {
    let recorder = MemoryRecorder::new();
    let outcomes = vec![ok(), ok(), ProbeOutcome::Failure, ProbeOutcome::Failure, ok()];

    let err = run_until_exhausted(outcomes, recorder.clone()).await.unwrap_err();
    assert!(err.is_interrupted());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    let record = records[0];
    match record.end() {
        OutageEnd::At(end) => assert!(end >= record.start()),
        OutageEnd::Unterminated => panic!("outage should be closed"),
    }
}

/// Integration test: termination while down writes the open outage with the sentinel
#[tokio::test]
async fn test_termination_while_down_flushes_open_outage() {
    let recorder = MemoryRecorder::new();

    let err = run_until_exhausted(vec![ProbeOutcome::Failure], recorder.clone())
        .await
        .unwrap_err();
    assert!(err.is_interrupted());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_unterminated());
    assert_eq!(records[0].to_row()[1], UNTERMINATED_SENTINEL);
}

/// Integration test: termination during the interval wait flushes the open outage
#[tokio::test]
async fn test_termination_mid_sleep_flushes_open_outage() {
    let recorder = MemoryRecorder::new();
    let prober = ScriptedProber::new(vec![ProbeOutcome::Failure, ProbeOutcome::Failure]);
    let config = MonitorConfig::new(Duration::from_secs(30), false);

    let err = Monitor::new(prober, recorder.clone(), config)
        .run(tokio::time::sleep(Duration::from_millis(200)))
        .await
        .unwrap_err();
    assert!(err.is_interrupted());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_unterminated());
}

/// Integration test: termination while up writes nothing and still re-propagates
#[tokio::test]
async fn test_termination_while_up_writes_nothing() {
    let recorder = MemoryRecorder::new();

    let err = run_until_exhausted(vec![ok(), ok(), ok()], recorder.clone())
        .await
        .unwrap_err();
    assert!(err.is_interrupted());
    assert!(recorder.records().is_empty());
    assert_eq!(recorder.headers_written(), 1);
}

/// Integration test: a closed outage followed by an open one gives two rows
#[tokio::test]
async fn test_closed_then_open_outage() {
    let recorder = MemoryRecorder::new();
    let outcomes = vec![
        ProbeOutcome::Failure,
        ok(),
        ok(),
        ProbeOutcome::Failure,
        ProbeOutcome::Failure,
    ];

    run_until_exhausted(outcomes, recorder.clone()).await.unwrap_err();

    let records = recorder.records();
    assert_eq!(records.len(), 2);
    assert!(!records[0].is_unterminated());
    assert!(records[1].is_unterminated());
    assert!(records[1].start() >= records[0].start());
}

/// Integration test: verbose mode does not change what gets recorded
#[tokio::test]
async fn test_verbose_records_same_outages() {
    let recorder = MemoryRecorder::new();
    let prober = ScriptedProber::new(vec![ok(), ProbeOutcome::Failure, ProbeOutcome::Failure, ok(), ok()]);
    let config = MonitorConfig::new(Duration::from_millis(1), true).with_max_ticks(5);

    let summary = Monitor::new(prober, recorder.clone(), config)
        .run(std::future::pending())
        .await
        .unwrap();

    assert_eq!(summary.stats.tick_count, 5);
    assert_eq!(summary.stats.failed_probes, 2);
    assert_eq!(summary.stats.outages_started, 1);
    assert_eq!(summary.stats.outages_recorded, 1);
    assert_eq!(recorder.records().len(), 1);
}

/// Integration test: the CSV file on disk holds header, closed row and open row
#[tokio::test]
async fn test_csv_file_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("connection_data.csv");

    let prober = ScriptedProber::new(vec![ProbeOutcome::Failure, ok(), ProbeOutcome::Failure]);
    let exhausted = prober.exhausted();
    let recorder = CsvRecorder::create(&path, false).unwrap();

    let err = Monitor::new(prober, recorder, fast())
        .run(async move { exhausted.notified().await })
        .await
        .unwrap_err();
    assert!(err.is_interrupted());

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);

    let closed: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(closed.len(), 2);
    assert!(chrono::DateTime::parse_from_rfc3339(closed[0]).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(closed[1]).is_ok());

    let open: Vec<&str> = lines[2].split(',').collect();
    assert!(chrono::DateTime::parse_from_rfc3339(open[0]).is_ok());
    assert_eq!(open[1], "-");
    assert!(chrono::DateTime::parse_from_rfc3339(open[1]).is_err());
}

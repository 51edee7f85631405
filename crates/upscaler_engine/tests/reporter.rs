mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{write_png, CountingEnhancer, PanickingEnhancer};
use tempfile::TempDir;
use upscaler_engine::{
    JobConfig, JobError, JobHandle, JobRunner, ProgressReporter, Report, WORKING_MARKERS,
};

const POLL: Duration = Duration::from_millis(20);

fn valid_config(temp: &TempDir) -> JobConfig {
    JobConfig {
        input_path: Some(write_png(temp.path(), "cat.png", 4, 4)),
        output_path: Some(temp.path().join("out.png")),
    }
}

#[test]
fn sequence_is_finite_and_ends_with_one_terminal_report() {
    let temp = TempDir::new().unwrap();
    let runner = JobRunner::new(
        Arc::new(CountingEnhancer::slow(Duration::from_millis(150))),
        2,
    );
    let handle = JobHandle::spawn(1, runner, valid_config(&temp)).unwrap();

    let mut reports = ProgressReporter::new(POLL).observe(handle);
    let collected: Vec<Report> = reports.by_ref().collect();

    assert!(collected.len() >= 2, "expected heartbeats, got {collected:?}");
    assert_eq!(collected.iter().filter(|r| r.is_terminal()).count(), 1);
    assert!(matches!(collected.last(), Some(Report::Finished(Ok(_)))));
    assert!(reports.next().is_none());
    assert!(reports.next().is_none());
}

#[test]
fn heartbeats_rotate_the_marker() {
    let temp = TempDir::new().unwrap();
    let runner = JobRunner::new(
        Arc::new(CountingEnhancer::slow(Duration::from_millis(200))),
        2,
    );
    let handle = JobHandle::spawn(1, runner, valid_config(&temp)).unwrap();

    let working: Vec<Report> = ProgressReporter::new(POLL)
        .observe(handle)
        .filter(|report| !report.is_terminal())
        .collect();

    for (index, report) in working.iter().enumerate() {
        match report {
            Report::Working { frame, marker, .. } => {
                assert_eq!(*frame, index);
                assert_eq!(*marker, WORKING_MARKERS[index % WORKING_MARKERS.len()]);
                assert_eq!(report.status_text(), format!("Loading {marker}"));
            }
            Report::Finished(_) => unreachable!(),
        }
    }
}

#[test]
fn terminal_report_arrives_within_one_poll_interval() {
    let temp = TempDir::new().unwrap();
    let poll = Duration::from_millis(50);
    let enhancer = Arc::new(CountingEnhancer::slow(Duration::from_millis(120)));
    let runner = JobRunner::new(enhancer.clone(), 2);
    let handle = JobHandle::spawn(1, runner, valid_config(&temp)).unwrap();

    let mut reports = ProgressReporter::new(poll).observe(handle);
    let terminal = reports.find(Report::is_terminal);
    let terminal_at = Instant::now();

    assert!(matches!(terminal, Some(Report::Finished(Ok(_)))));
    let returned_at = enhancer.returned_at().expect("enhancer returned");
    // The write after `enhance` is tiny; the rest is scheduling slack.
    let lag = terminal_at.duration_since(returned_at);
    assert!(lag <= poll + Duration::from_millis(200), "terminal lagged {lag:?}");
}

#[test]
fn runner_panic_becomes_failed_report() {
    let temp = TempDir::new().unwrap();
    let runner = JobRunner::new(Arc::new(PanickingEnhancer), 2);
    let handle = JobHandle::spawn(1, runner, valid_config(&temp)).unwrap();

    let last = ProgressReporter::new(POLL).observe(handle).last();

    assert_eq!(
        last,
        Some(Report::Finished(Err(JobError::Panicked("boom".into()))))
    );
}

#[test]
fn config_error_still_produces_terminal_report() {
    let runner = JobRunner::new(Arc::new(CountingEnhancer::default()), 2);
    let handle = JobHandle::spawn(1, runner, JobConfig::default()).unwrap();

    let reports: Vec<Report> = ProgressReporter::new(POLL).observe(handle).collect();

    assert_eq!(
        reports.last(),
        Some(&Report::Finished(Err(JobError::Config("input path"))))
    );
    assert_eq!(reports.last().unwrap().status_text(), "Failed: no input path selected");
}

#[test]
fn cancel_token_reaches_the_runner() {
    let temp = TempDir::new().unwrap();
    let config = valid_config(&temp);
    let runner = JobRunner::new(
        Arc::new(CountingEnhancer::slow(Duration::from_millis(100))),
        2,
    );
    let handle = JobHandle::spawn(3, runner, config).unwrap();
    assert_eq!(handle.job_id(), 3);

    handle.cancel_token().cancel();
    let result = handle.join();

    // Cancelled at whichever checkpoint came next; the write never happens.
    assert_eq!(result, Err(JobError::Cancelled));
    assert!(!temp.path().join("out.png").exists());
}

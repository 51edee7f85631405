use std::any::Any;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{CancelToken, JobConfig, JobError, JobId, JobRunner, JobSummary, StartError};

pub const WORKING_MARKERS: [char; 4] = ['|', '/', '-', '\\'];

/// A running job: the runner thread plus the token that can stop it.
#[derive(Debug)]
pub struct JobHandle {
    job_id: JobId,
    cancel: CancelToken,
    thread: JoinHandle<Result<JobSummary, JobError>>,
}

impl JobHandle {
    pub fn spawn(job_id: JobId, runner: JobRunner, config: JobConfig) -> Result<Self, StartError> {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let thread = thread::Builder::new()
            .name(format!("upscaler-job-{job_id}"))
            .spawn(move || runner.run(&config, &token))?;
        Ok(Self {
            job_id,
            cancel,
            thread,
        })
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the runner exits. A panic becomes `JobError::Panicked`.
    pub fn join(self) -> Result<JobSummary, JobError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(payload) => Err(JobError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Working {
        frame: usize,
        marker: char,
        elapsed: Duration,
    },
    Finished(Result<JobSummary, JobError>),
}

impl Report {
    pub fn status_text(&self) -> String {
        match self {
            Report::Working { marker, .. } => format!("Loading {marker}"),
            Report::Finished(Ok(_)) => "Done".to_string(),
            Report::Finished(Err(err)) => format!("Failed: {err}"),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Report::Finished(_))
    }
}

/// Synthesizes heartbeats by polling runner liveness at a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReporter {
    poll_interval: Duration,
}

impl ProgressReporter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn observe(&self, handle: JobHandle) -> Reports {
        Reports {
            handle: Some(handle),
            poll_interval: self.poll_interval,
            frame: 0,
            started: Instant::now(),
        }
    }
}

/// Heartbeats while the runner lives, then exactly one `Finished`, then `None`.
#[derive(Debug)]
pub struct Reports {
    handle: Option<JobHandle>,
    poll_interval: Duration,
    frame: usize,
    started: Instant,
}

impl Iterator for Reports {
    type Item = Report;

    fn next(&mut self) -> Option<Report> {
        let handle = self.handle.as_ref()?;
        if self.frame > 0 && !handle.is_finished() {
            thread::sleep(self.poll_interval);
        }
        if handle.is_finished() {
            let handle = self.handle.take()?;
            return Some(Report::Finished(handle.join()));
        }

        let report = Report::Working {
            frame: self.frame,
            marker: WORKING_MARKERS[self.frame % WORKING_MARKERS.len()],
            elapsed: self.started.elapsed(),
        };
        self.frame += 1;
        Some(report)
    }
}

impl std::iter::FusedIterator for Reports {}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}

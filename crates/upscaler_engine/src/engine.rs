use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use engine_logging::{engine_info, engine_warn};

use crate::{
    CancelToken, EngineEvent, EngineSettings, Enhancer, JobConfig, JobHandle, JobId, JobRunner,
    ProgressReporter, Report, Reports, StartError,
};

/// Receives engine events on the reporter thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

struct ActiveJob {
    job_id: JobId,
    cancel: CancelToken,
    finished: Arc<AtomicBool>,
    reporter: JoinHandle<()>,
}

impl ActiveJob {
    fn join_reporter(self) {
        if self.reporter.join().is_err() {
            engine_warn!("Reporter for job {} panicked", self.job_id);
        }
    }
}

/// Owns the loaded enhancer for the lifetime of the process and runs at most
/// one job at a time.
pub struct EngineHandle {
    runner: JobRunner,
    reporter: ProgressReporter,
    sink: Arc<dyn EventSink>,
    active: Mutex<Option<ActiveJob>>,
}

impl EngineHandle {
    pub fn new(
        enhancer: Arc<dyn Enhancer>,
        settings: &EngineSettings,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        engine_info!(
            "Engine ready: {} scale={} poll={:?}",
            enhancer.name(),
            settings.scale,
            settings.poll_interval
        );
        Self {
            runner: JobRunner::new(enhancer, settings.scale),
            reporter: ProgressReporter::new(settings.poll_interval),
            sink,
            active: Mutex::new(None),
        }
    }

    /// Spawns the runner and its reporter. Refuses while a previous job has
    /// not delivered its completion yet.
    pub fn start(&self, job_id: JobId, config: JobConfig) -> Result<(), StartError> {
        let mut active = self.lock_active();
        if let Some(job) = active.as_ref() {
            if !job.finished.load(Ordering::Acquire) {
                return Err(StartError::AlreadyRunning { job_id: job.job_id });
            }
        }

        // The reporter is spawned first and waits for its runner, so a failed
        // spawn never leaves a runner without an observer.
        let finished = Arc::new(AtomicBool::new(false));
        let (handoff, pending) = mpsc::channel::<Reports>();
        let sink = self.sink.clone();
        let done_flag = finished.clone();
        let reporter = thread::Builder::new()
            .name(format!("upscaler-report-{job_id}"))
            .spawn(move || {
                if let Ok(reports) = pending.recv() {
                    forward_reports(job_id, reports, sink.as_ref(), &done_flag);
                }
            })?;

        let handle = match JobHandle::spawn(job_id, self.runner.clone(), config) {
            Ok(handle) => handle,
            Err(err) => {
                drop(handoff);
                let _ = reporter.join();
                return Err(err);
            }
        };
        let cancel = handle.cancel_token();
        if let Err(mpsc::SendError(reports)) = handoff.send(self.reporter.observe(handle)) {
            // Reporter died before taking the job: stop the runner and wait it out.
            cancel.cancel();
            let _ = reports.last();
            let _ = reporter.join();
            return Err(StartError::Spawn(io::Error::other("reporter thread exited")));
        }

        if let Some(previous) = active.take() {
            previous.join_reporter();
        }
        *active = Some(ActiveJob {
            job_id,
            cancel,
            finished,
            reporter,
        });
        engine_info!("Started job {}", job_id);
        Ok(())
    }

    pub fn cancel(&self, job_id: JobId) {
        let active = self.lock_active();
        match active.as_ref() {
            Some(job) if job.job_id == job_id => {
                engine_info!("Cancelling job {}", job_id);
                job.cancel.cancel();
            }
            _ => engine_warn!("Cancel for unknown job {}", job_id),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.lock_active()
            .as_ref()
            .is_some_and(|job| !job.finished.load(Ordering::Acquire))
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveJob>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let active = self.lock_active().take();
        if let Some(job) = active {
            if !job.finished.load(Ordering::Acquire) {
                engine_info!("Stopping job {} before shutdown", job.job_id);
                job.cancel.cancel();
            }
            // Returns once the runner has reached its next checkpoint.
            job.join_reporter();
        }
        engine_info!("Engine shut down");
    }
}

fn forward_reports(
    job_id: JobId,
    reports: impl Iterator<Item = Report>,
    sink: &dyn EventSink,
    finished: &AtomicBool,
) {
    for report in reports {
        match report {
            Report::Working { .. } => sink.emit(EngineEvent::Status {
                job_id,
                text: report.status_text(),
            }),
            Report::Finished(result) => {
                // Mark first so a start triggered by this completion is accepted.
                finished.store(true, Ordering::Release);
                if let Err(err) = &result {
                    engine_warn!("Job {} failed: {}", job_id, err);
                }
                sink.emit(EngineEvent::JobCompleted { job_id, result });
            }
        }
    }
}

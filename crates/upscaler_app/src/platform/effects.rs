use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use upscaler_core::{Config, Effect, FailureReason, JobId, JobResult, Msg};
use upscaler_engine::{
    EngineEvent, EngineHandle, EngineSettings, Enhancer, EventSink, JobConfig, JobError,
    JobSummary, StartError,
};

/// Wakes the UI loop after something was queued for it.
pub(crate) type Waker = Arc<dyn Fn() + Send + Sync>;

/// Everything a background thread wants the UI to see goes through here.
#[derive(Clone)]
pub(crate) struct Inbox {
    msg_tx: mpsc::Sender<Msg>,
    waker: Waker,
}

impl Inbox {
    pub fn new(msg_tx: mpsc::Sender<Msg>, waker: Waker) -> Self {
        Self { msg_tx, waker }
    }

    pub fn send(&self, msg: Msg) {
        if self.msg_tx.send(msg).is_ok() {
            (self.waker)();
        }
    }
}

impl EventSink for Inbox {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::Status { job_id, text } => Msg::JobStatus { job_id, text },
            EngineEvent::JobCompleted { job_id, result } => Msg::JobDone {
                job_id,
                result: map_result(job_id, result),
            },
        };
        self.send(msg);
    }
}

pub(crate) struct EffectRunner {
    engine: EngineHandle,
    inbox: Inbox,
}

impl EffectRunner {
    pub fn new(enhancer: Arc<dyn Enhancer>, settings: &EngineSettings, inbox: Inbox) -> Self {
        let engine = EngineHandle::new(enhancer, settings, Arc::new(inbox.clone()));
        Self { engine, inbox }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob { job_id, config } => self.start_job(job_id, config),
                Effect::CancelJob { job_id } => self.engine.cancel(job_id),
                Effect::ScheduleSettle { job_id, delay } => self.schedule_settle(job_id, delay),
            }
        }
    }

    fn start_job(&self, job_id: JobId, config: Config) {
        engine_info!(
            "StartJob job_id={} input={:?} output={:?}",
            job_id,
            config.input_path,
            config.output_path
        );
        let config = JobConfig {
            input_path: config.input_path,
            output_path: config.output_path,
        };
        if let Err(err) = self.engine.start(job_id, config) {
            // The orchestrator is already Running; it must still see an outcome.
            engine_error!("Could not start job {}: {}", job_id, err);
            let reason = match err {
                StartError::AlreadyRunning { .. } => FailureReason::Engine(err.to_string()),
                StartError::Spawn(_) => FailureReason::Io(err.to_string()),
            };
            self.inbox.send(Msg::JobDone {
                job_id,
                result: Err(reason),
            });
        }
    }

    fn schedule_settle(&self, job_id: JobId, delay: Duration) {
        let inbox = self.inbox.clone();
        let spawned = thread::Builder::new()
            .name(format!("upscaler-settle-{job_id}"))
            .spawn(move || {
                thread::sleep(delay);
                inbox.send(Msg::Settled { job_id });
            });
        if let Err(err) = spawned {
            engine_warn!("Settle timer unavailable ({}); settling job {} now", err, job_id);
            self.inbox.send(Msg::Settled { job_id });
        }
    }
}

fn map_result(job_id: JobId, result: Result<JobSummary, JobError>) -> JobResult {
    match result {
        Ok(summary) => {
            engine_info!(
                "Job {} done: {}x{} -> {}x{} at {:?}",
                job_id,
                summary.source_dimensions.0,
                summary.source_dimensions.1,
                summary.output_dimensions.0,
                summary.output_dimensions.1,
                summary.output_path
            );
            Ok(())
        }
        Err(err) => Err(map_failure(err)),
    }
}

fn map_failure(err: JobError) -> FailureReason {
    match err {
        JobError::Config(_) => FailureReason::Config(err.to_string()),
        JobError::Io { .. } => FailureReason::Io(err.to_string()),
        JobError::Engine(engine_err) => FailureReason::Engine(engine_err.to_string()),
        JobError::Cancelled => FailureReason::Cancelled,
        JobError::Panicked(message) => FailureReason::Panicked(message),
    }
}

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::view_model::AppViewModel;
use crate::{Config, ConfigStore, UiController};

pub type JobId = u64;

/// Outcome of one job as seen by the orchestrator.
pub type JobResult = Result<(), FailureReason>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Config(String),
    Io(String),
    Engine(String),
    Cancelled,
    Panicked(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Config(detail) => write!(f, "{detail}"),
            FailureReason::Io(detail) => write!(f, "I/O error: {detail}"),
            FailureReason::Engine(detail) => write!(f, "engine error: {detail}"),
            FailureReason::Cancelled => write!(f, "cancelled"),
            FailureReason::Panicked(detail) => write!(f, "worker crashed: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed(FailureReason),
}

impl JobState {
    pub fn phase(&self) -> Phase {
        match self {
            JobState::Idle => Phase::Idle,
            JobState::Running => Phase::Running,
            JobState::Succeeded | JobState::Failed(_) => Phase::Settling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// How long a terminal status stays visible before controls come back.
    pub settle_delay: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: OrchestratorSettings,
    config: ConfigStore,
    job_state: JobState,
    /// Id of the job that owns the current Running/Settling phase.
    current_job: Option<JobId>,
    last_job_id: JobId,
    ui: UiController,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: OrchestratorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase(),
            job_state: self.job_state.clone(),
            input_path: self.config.input().map(PathBuf::from),
            output_path: self.config.output().map(PathBuf::from),
            status_text: self.ui.status_text().to_string(),
            controls_enabled: self.ui.controls_enabled(),
        }
    }

    pub fn settings(&self) -> OrchestratorSettings {
        self.settings
    }

    pub fn job_state(&self) -> &JobState {
        &self.job_state
    }

    pub fn phase(&self) -> Phase {
        self.job_state.phase()
    }

    pub fn current_job(&self) -> Option<JobId> {
        self.current_job
    }

    pub fn config_snapshot(&self) -> Config {
        self.config.snapshot()
    }

    /// Returns whether the state changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, path: PathBuf) -> bool {
        let changed = self.config.set_input(path);
        self.dirty |= changed;
        changed
    }

    pub(crate) fn set_output(&mut self, path: PathBuf) -> bool {
        let changed = self.config.set_output(path);
        self.dirty |= changed;
        changed
    }

    /// Idle -> Running. Caller has checked the phase.
    pub(crate) fn begin_job(&mut self) -> JobId {
        let job_id = self.allocate_job_id();
        self.job_state = JobState::Running;
        self.ui.on_job_start();
        self.dirty = true;
        job_id
    }

    /// Idle -> Failed without ever running. Caller has checked the phase.
    pub(crate) fn reject_job(&mut self, reason: FailureReason) -> JobId {
        let job_id = self.allocate_job_id();
        self.finish_job(Err(reason));
        job_id
    }

    pub(crate) fn apply_status(&mut self, job_id: JobId, text: String) -> bool {
        if !self.is_running(job_id) {
            return false;
        }
        self.ui.on_status(text);
        self.dirty = true;
        true
    }

    /// Running -> Succeeded/Failed for the current job only.
    pub(crate) fn apply_done(&mut self, job_id: JobId, result: JobResult) -> bool {
        if !self.is_running(job_id) {
            return false;
        }
        self.finish_job(result);
        true
    }

    /// Settling -> Idle for the current job only.
    pub(crate) fn apply_settled(&mut self, job_id: JobId) -> bool {
        if self.phase() != Phase::Settling || self.current_job != Some(job_id) {
            return false;
        }
        self.job_state = JobState::Idle;
        self.current_job = None;
        self.ui.on_settled();
        self.dirty = true;
        true
    }

    pub(crate) fn is_running(&self, job_id: JobId) -> bool {
        self.phase() == Phase::Running && self.current_job == Some(job_id)
    }

    fn finish_job(&mut self, result: JobResult) {
        self.ui.on_job_end(&result);
        self.job_state = match result {
            Ok(()) => JobState::Succeeded,
            Err(reason) => JobState::Failed(reason),
        };
        self.dirty = true;
    }

    fn allocate_job_id(&mut self) -> JobId {
        self.last_job_id += 1;
        self.current_job = Some(self.last_job_id);
        self.last_job_id
    }
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type JobId = u64;

/// Paths handed to the runner. Either may be unset; the runner rejects that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobConfig {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub output_path: PathBuf,
    pub source_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Synthesized heartbeat while the runner is alive.
    Status { job_id: JobId, text: String },
    /// Emitted exactly once per job, after the last status.
    JobCompleted {
        job_id: JobId,
        result: Result<JobSummary, JobError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unsupported scale factor {0}")]
    UnsupportedScale(u32),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("output of {requested} pixels exceeds the limit of {limit}")]
    ResourceExhausted { requested: u64, limit: u64 },
    #[error("failed to load engine: {0}")]
    Load(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("no {0} selected")]
    Config(&'static str),
    #[error("{}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("cancelled")]
    Cancelled,
    #[error("worker panicked: {0}")]
    Panicked(String),
}

impl JobError {
    pub(crate) fn io(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        JobError::Io {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error("job {job_id} is still running")]
    AlreadyRunning { job_id: JobId },
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked an input image. Cancelled dialogs send nothing.
    InputSelected(PathBuf),
    /// User picked an output path. Cancelled dialogs send nothing.
    OutputSelected(PathBuf),
    /// User clicked Start.
    StartClicked,
    /// User asked to abort the running job.
    CancelRequested,
    /// Heartbeat text from the progress reporter.
    JobStatus { job_id: crate::JobId, text: String },
    /// Runner outcome, delivered once per job.
    JobDone {
        job_id: crate::JobId,
        result: crate::JobResult,
    },
    /// Settle delay for a finished job has elapsed.
    Settled { job_id: crate::JobId },
    /// Fallback for placeholder wiring.
    NoOp,
}

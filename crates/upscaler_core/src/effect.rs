use std::time::Duration;

use crate::{Config, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Spawn the job runner and its progress reporter.
    StartJob { job_id: JobId, config: Config },
    /// Ask the running job to stop at its next checkpoint.
    CancelJob { job_id: JobId },
    /// Deliver `Msg::Settled { job_id }` once `delay` has elapsed.
    ScheduleSettle { job_id: JobId, delay: Duration },
}

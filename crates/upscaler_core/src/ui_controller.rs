use crate::JobResult;

/// Status shown while no job is in flight.
pub const IDLE_STATUS: &str = "Status";
/// Status shown as soon as a job starts, before the first heartbeat.
pub const INITIAL_WORKING_STATUS: &str = "Loading";

/// Control enablement and status text. The orchestrator drives it; the
/// render pass only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiController {
    controls_enabled: bool,
    status_text: String,
}

impl Default for UiController {
    fn default() -> Self {
        Self {
            controls_enabled: true,
            status_text: IDLE_STATUS.to_string(),
        }
    }
}

impl UiController {
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn on_job_start(&mut self) {
        self.controls_enabled = false;
        self.status_text = INITIAL_WORKING_STATUS.to_string();
    }

    /// Updates the status only; enablement is untouched.
    pub fn on_status(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }

    /// Shows the terminal status. Controls stay disabled until
    /// [`UiController::on_settled`].
    pub fn on_job_end(&mut self, outcome: &JobResult) {
        self.controls_enabled = false;
        self.status_text = terminal_status_text(outcome);
    }

    pub fn on_settled(&mut self) {
        self.controls_enabled = true;
        self.status_text = IDLE_STATUS.to_string();
    }
}

pub fn terminal_status_text(outcome: &JobResult) -> String {
    match outcome {
        Ok(()) => "Done".to_string(),
        Err(reason) => format!("Failed: {reason}"),
    }
}

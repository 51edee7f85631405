//! Upscaler core: pure job-orchestration state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod state;
mod ui_controller;
mod update;
mod view_model;

pub use config::{Config, ConfigStore};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, FailureReason, JobId, JobResult, JobState, OrchestratorSettings, Phase};
pub use ui_controller::{terminal_status_text, UiController, IDLE_STATUS, INITIAL_WORKING_STATUS};
pub use update::update;
pub use view_model::AppViewModel;

use std::path::PathBuf;

use crate::{JobState, Phase};

/// Read-only snapshot handed to the render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub job_state: JobState,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub status_text: String,
    pub controls_enabled: bool,
}

impl AppViewModel {
    pub fn input_label(&self) -> String {
        path_label(self.input_path.as_ref(), "No input selected")
    }

    pub fn output_label(&self) -> String {
        path_label(self.output_path.as_ref(), "No output selected")
    }
}

fn path_label(path: Option<&PathBuf>, placeholder: &str) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => placeholder.to_string(),
    }
}

use std::path::{Path, PathBuf};

/// Paths a job runs with. Taken as one value so input and output always
/// come from the same selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl Config {
    pub fn is_complete(&self) -> bool {
        self.input_path.is_some() && self.output_path.is_some()
    }

    /// Name of the first unset field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.input_path.is_none() {
            Some("input path")
        } else if self.output_path.is_none() {
            Some("output path")
        } else {
            None
        }
    }
}

/// Holds the user's current selections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigStore {
    current: Config,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the previous value) for an empty path.
    pub fn set_input(&mut self, path: impl Into<PathBuf>) -> bool {
        store_non_empty(&mut self.current.input_path, path.into())
    }

    /// Returns false (and keeps the previous value) for an empty path.
    pub fn set_output(&mut self, path: impl Into<PathBuf>) -> bool {
        store_non_empty(&mut self.current.output_path, path.into())
    }

    pub fn snapshot(&self) -> Config {
        self.current.clone()
    }

    pub fn input(&self) -> Option<&Path> {
        self.current.input_path.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.current.output_path.as_deref()
    }
}

fn store_non_empty(slot: &mut Option<PathBuf>, path: PathBuf) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }
    *slot = Some(path);
    true
}

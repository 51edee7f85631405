//! Upscaler engine: job runner, progress reporting and effect execution.
mod cancel;
mod engine;
mod enhance;
mod persist;
mod reporter;
mod runner;
mod types;

pub use cancel::CancelToken;
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use enhance::{EngineSettings, Enhancer, LanczosEnhancer, MAX_SCALE};
pub use persist::{
    encodable_format, ensure_output_dir, output_format, AtomicImageWriter, PersistError,
};
pub use reporter::{JobHandle, ProgressReporter, Report, Reports, WORKING_MARKERS};
pub use runner::{decode_input, JobRunner};
pub use types::{EngineError, EngineEvent, JobConfig, JobError, JobId, JobSummary, StartError};

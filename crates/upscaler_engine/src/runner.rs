use std::path::Path;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_info};
use image::DynamicImage;

use crate::{
    encodable_format, AtomicImageWriter, CancelToken, Enhancer, JobConfig, JobError, JobSummary,
};

/// Runs one enhancement job end to end. Holds no UI state; the outcome is
/// only ever observed through the return value.
#[derive(Clone)]
pub struct JobRunner {
    enhancer: Arc<dyn Enhancer>,
    scale: u32,
    writer: AtomicImageWriter,
}

impl JobRunner {
    pub fn new(enhancer: Arc<dyn Enhancer>, scale: u32) -> Self {
        Self {
            enhancer,
            scale,
            writer: AtomicImageWriter,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn run(&self, config: &JobConfig, cancel: &CancelToken) -> Result<JobSummary, JobError> {
        cancel.checkpoint()?;
        let input = config
            .input_path
            .as_deref()
            .ok_or(JobError::Config("input path"))?;
        let output = config
            .output_path
            .as_deref()
            .ok_or(JobError::Config("output path"))?;
        // Caught here rather than after the expensive enhance step.
        encodable_format(output).map_err(|err| JobError::io(output, err))?;

        cancel.checkpoint()?;
        let source = decode_input(input)?;
        let source_dimensions = (source.width(), source.height());
        engine_debug!(
            "Decoded {:?} {}x{}",
            input,
            source_dimensions.0,
            source_dimensions.1
        );

        cancel.checkpoint()?;
        let enhanced = self.enhancer.enhance(&source, self.scale)?;
        let output_dimensions = (enhanced.width(), enhanced.height());

        cancel.checkpoint()?;
        let output_path = self
            .writer
            .write(output, &enhanced)
            .map_err(|err| JobError::io(output, err))?;
        engine_info!(
            "Wrote {:?} {}x{} via {}",
            output_path,
            output_dimensions.0,
            output_dimensions.1,
            self.enhancer.name()
        );

        Ok(JobSummary {
            output_path,
            source_dimensions,
            output_dimensions,
        })
    }
}

/// Decodes the input as RGB; missing and corrupt files are both I/O failures.
pub fn decode_input(path: &Path) -> Result<DynamicImage, JobError> {
    let image = image::open(path).map_err(|err| JobError::io(path, err))?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

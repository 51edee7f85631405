use std::time::Duration;

use engine_logging::engine_info;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::EngineError;

pub const MAX_SCALE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub scale: u32,
    pub poll_interval: Duration,
    pub max_output_pixels: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            scale: 4,
            poll_interval: Duration::from_millis(500),
            max_output_pixels: 256 * 1024 * 1024,
        }
    }
}

/// The enhancement model. Implementations are loaded once per process and
/// shared across jobs.
pub trait Enhancer: Send + Sync {
    fn name(&self) -> &str;
    fn enhance(&self, image: &DynamicImage, scale: u32) -> Result<DynamicImage, EngineError>;
}

/// Lanczos3 resampler standing in for a learned super-resolution model.
#[derive(Debug, Clone)]
pub struct LanczosEnhancer {
    max_output_pixels: u64,
}

impl LanczosEnhancer {
    pub fn load(settings: &EngineSettings) -> Result<Self, EngineError> {
        validate_scale(settings.scale)?;
        if settings.max_output_pixels == 0 {
            return Err(EngineError::Load("max_output_pixels must be positive".into()));
        }
        engine_info!(
            "Loaded lanczos enhancer scale={} max_output_pixels={}",
            settings.scale,
            settings.max_output_pixels
        );
        Ok(Self {
            max_output_pixels: settings.max_output_pixels,
        })
    }
}

impl Enhancer for LanczosEnhancer {
    fn name(&self) -> &str {
        "lanczos3"
    }

    fn enhance(&self, image: &DynamicImage, scale: u32) -> Result<DynamicImage, EngineError> {
        validate_scale(scale)?;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(EngineError::MalformedInput(format!(
                "empty image {width}x{height}"
            )));
        }

        let requested = u64::from(width) * u64::from(height) * u64::from(scale) * u64::from(scale);
        if requested > self.max_output_pixels {
            return Err(EngineError::ResourceExhausted {
                requested,
                limit: self.max_output_pixels,
            });
        }

        // Bounded by max_output_pixels, so each side fits in u32.
        Ok(image.resize_exact(width * scale, height * scale, FilterType::Lanczos3))
    }
}

fn validate_scale(scale: u32) -> Result<(), EngineError> {
    if (1..=MAX_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(EngineError::UnsupportedScale(scale))
    }
}

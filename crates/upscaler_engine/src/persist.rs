use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("no encoder for {0:?} output")]
    UnsupportedFormat(ImageFormat),
    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Format from the target's extension; PNG when the extension is missing or unknown.
pub fn output_format(target: &Path) -> ImageFormat {
    ImageFormat::from_path(target).unwrap_or(ImageFormat::Png)
}

/// Resolves the output format and fails when this build cannot encode it.
pub fn encodable_format(target: &Path) -> Result<ImageFormat, PersistError> {
    let format = output_format(target);
    if format.writing_enabled() {
        Ok(format)
    } else {
        Err(PersistError::UnsupportedFormat(format))
    }
}

/// Writes an encoded image next to its target and renames it into place,
/// so the target is either untouched or complete.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicImageWriter;

impl AtomicImageWriter {
    pub fn write(&self, target: &Path, image: &DynamicImage) -> Result<PathBuf, PersistError> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_output_dir(&dir)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".upscaler-")
            .suffix(".part")
            .tempfile_in(&dir)?;
        encode_into(&mut tmp, image, output_format(target))?;

        // The temp file is removed on drop if persisting fails.
        tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target.to_path_buf())
    }
}

fn encode_into(
    tmp: &mut NamedTempFile,
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<(), PersistError> {
    {
        let mut buffered = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut buffered, format)?;
        buffered.flush()?;
    }
    tmp.as_file().sync_all()?;
    Ok(())
}

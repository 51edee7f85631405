#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};
use std::time::{Duration, Instant};

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use upscaler_engine::{EngineError, Enhancer};

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]))
        .save(&path)
        .unwrap();
    path
}

pub fn leftover_temp_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".part"))
        })
        .collect()
}

fn nearest(image: &DynamicImage, scale: u32) -> DynamicImage {
    image.resize_exact(
        image.width() * scale,
        image.height() * scale,
        FilterType::Nearest,
    )
}

/// Counts calls and optionally sleeps to simulate inference time.
#[derive(Default)]
pub struct CountingEnhancer {
    pub calls: AtomicUsize,
    pub delay: Duration,
    returned_at: Mutex<Option<Instant>>,
}

impl CountingEnhancer {
    pub fn slow(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
            returned_at: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// When the last `enhance` call returned, if any has.
    pub fn returned_at(&self) -> Option<Instant> {
        *self.returned_at.lock().unwrap()
    }
}

impl Enhancer for CountingEnhancer {
    fn name(&self) -> &str {
        "counting"
    }

    fn enhance(&self, image: &DynamicImage, scale: u32) -> Result<DynamicImage, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        let enhanced = nearest(image, scale);
        *self.returned_at.lock().unwrap() = Some(Instant::now());
        Ok(enhanced)
    }
}

pub struct FailingEnhancer;

impl Enhancer for FailingEnhancer {
    fn name(&self) -> &str {
        "failing"
    }

    fn enhance(&self, _image: &DynamicImage, _scale: u32) -> Result<DynamicImage, EngineError> {
        Err(EngineError::Failed("inference exploded".into()))
    }
}

pub struct PanickingEnhancer;

impl Enhancer for PanickingEnhancer {
    fn name(&self) -> &str {
        "panicking"
    }

    fn enhance(&self, _image: &DynamicImage, _scale: u32) -> Result<DynamicImage, EngineError> {
        panic!("boom");
    }
}

/// Blocks inside `enhance` until the test releases it.
pub struct GatedEnhancer {
    pub calls: AtomicUsize,
    gate: Mutex<mpsc::Receiver<()>>,
}

impl GatedEnhancer {
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                calls: AtomicUsize::new(0),
                gate: Mutex::new(rx),
            },
            tx,
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Enhancer for GatedEnhancer {
    fn name(&self) -> &str {
        "gated"
    }

    fn enhance(&self, image: &DynamicImage, scale: u32) -> Result<DynamicImage, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap();
        gate.recv_timeout(Duration::from_secs(10))
            .map_err(|_| EngineError::Failed("gate never opened".into()))?;
        Ok(nearest(image, scale))
    }
}

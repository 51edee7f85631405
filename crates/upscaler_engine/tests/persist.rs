use std::fs;

use image::{DynamicImage, RgbImage};
use tempfile::TempDir;
use upscaler_engine::{ensure_output_dir, output_format, AtomicImageWriter, PersistError};

fn solid(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([1, 2, 3])))
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out.png");

    let first = AtomicImageWriter.write(&target, &solid(2, 2)).unwrap();
    assert_eq!(first, target);
    assert_eq!(image::open(&target).unwrap().width(), 2);

    // Replace existing
    AtomicImageWriter.write(&target, &solid(8, 4)).unwrap();
    let reread = image::open(&target).unwrap();
    assert_eq!((reread.width(), reread.height()), (8, 4));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let result = AtomicImageWriter.write(&file_path.join("out.png"), &solid(2, 2));
    assert!(matches!(result, Err(PersistError::OutputDir(_))));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn failed_encode_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    // Recognised extension without an enabled encoder.
    let target = temp.path().join("out.webp");

    let result = AtomicImageWriter.write(&target, &solid(2, 2));
    assert!(matches!(result, Err(PersistError::Encode(_))));
    assert!(!target.exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn format_follows_extension_with_png_fallback() {
    use image::ImageFormat;
    assert_eq!(output_format("a.jpg".as_ref()), ImageFormat::Jpeg);
    assert_eq!(output_format("a.PNG".as_ref()), ImageFormat::Png);
    assert_eq!(output_format("upscaled".as_ref()), ImageFormat::Png);
}

#[test]
fn encodable_format_rejects_formats_without_an_encoder() {
    use image::ImageFormat;
    use upscaler_engine::encodable_format;

    assert_eq!(encodable_format("a.jpeg".as_ref()).unwrap(), ImageFormat::Jpeg);
    assert_eq!(encodable_format("upscaled".as_ref()).unwrap(), ImageFormat::Png);
    assert!(matches!(
        encodable_format("a.webp".as_ref()),
        Err(PersistError::UnsupportedFormat(ImageFormat::WebP))
    ));
}

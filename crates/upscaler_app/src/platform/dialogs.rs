use std::path::PathBuf;

const IMAGE_FILTER_NAME: &str = "Image Files";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const DEFAULT_OUTPUT_NAME: &str = "upscaled_image.png";
const DEFAULT_EXTENSION: &str = "png";

/// Native open dialog. `None` when the user cancels.
pub(crate) fn choose_input_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Input Image")
        .add_filter(IMAGE_FILTER_NAME, IMAGE_EXTENSIONS)
        .pick_file()
}

/// Native save dialog. `None` when the user cancels.
pub(crate) fn choose_output_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Upscaled Image")
        .add_filter(IMAGE_FILTER_NAME, IMAGE_EXTENSIONS)
        .set_file_name(DEFAULT_OUTPUT_NAME)
        .save_file()
        .map(with_default_extension)
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::with_default_extension;
    use std::path::PathBuf;

    #[test]
    fn bare_names_get_png() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/result")),
            PathBuf::from("/tmp/result.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/result.jpg")),
            PathBuf::from("/tmp/result.jpg")
        );
    }
}

//! Persistence and share sinks for the composite image.
mod data_url;
mod error;

pub use data_url::image_to_data_url;
pub use error::OutputError;

use chrono::{DateTime, Local};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

/// Folder under the platform pictures directory where composites land.
const SAVE_FOLDER: &str = "GeoStamp";

/// Default save directory (`~/Pictures/GeoStamp`), falling back to the
/// home directory and then the working directory.
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SAVE_FOLDER)
}

fn ensure_directory(dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// File name for a composite saved at `taken`, e.g.
/// `photo_20220618_034252.jpg`.
pub fn timestamped_name(prefix: &str, extension: &str, taken: DateTime<Local>) -> String {
    format!("{prefix}_{}.{extension}", taken.format("%Y%m%d_%H%M%S"))
}

/// Writes the image under `dir` with a timestamped name and returns the
/// final path. JPEG output is flattened to RGB first.
pub fn save_image(
    image: &RgbaImage,
    dir: &Path,
    format: ImageFormat,
    taken: DateTime<Local>,
) -> Result<PathBuf, OutputError> {
    ensure_directory(dir)?;

    let (prefix, extension) = match format {
        ImageFormat::Png => ("overlay", "png"),
        _ => ("photo", "jpg"),
    };
    let path = dir.join(timestamped_name(prefix, extension, taken));

    match format {
        ImageFormat::Png => DynamicImage::ImageRgba8(image.clone()).save_with_format(&path, format)?,
        _ => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8())
            .save_with_format(&path, ImageFormat::Jpeg)?,
    }

    info!(path = %path.display(), "image saved");
    Ok(path)
}

/// Hands a saved file to the OS default handler, the desktop analog of
/// the share sheet.
pub fn share_file(path: &Path) -> Result<(), OutputError> {
    open::that(path).map_err(|e| OutputError::Share(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::Rgba;

    fn local_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2022, 6, 18, 3, 42, 52).unwrap()
    }

    #[test]
    fn test_timestamped_name_format() {
        assert_eq!(
            timestamped_name("photo", "jpg", local_timestamp()),
            "photo_20220618_034252.jpg"
        );
    }

    #[test]
    fn test_save_jpeg_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let image = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 255]));

        let path = save_image(&image, &target, ImageFormat::Jpeg, local_timestamp()).unwrap();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("photo_20220618_034252.jpg")
        );
    }

    #[test]
    fn test_save_png_keeps_alpha_capable_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 128]));

        let path = save_image(&image, dir.path(), ImageFormat::Png, local_timestamp()).unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(0, 0).0[3], 128);
    }

    #[test]
    fn test_default_directory_ends_with_save_folder() {
        let dir = default_photo_directory();
        assert_eq!(
            dir.file_name().and_then(|n| n.to_str()),
            Some(SAVE_FOLDER)
        );
    }
}

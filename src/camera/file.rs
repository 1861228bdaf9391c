use crate::camera::{Camera, CameraError, CaptureOptions, Photo};
use async_trait::async_trait;
use mime_guess::MimeGuess;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A camera that "captures" by decoding an image file.
///
/// This is the CLI's stand-in for device camera hardware: the shutter
/// contract is the same, the pixels come from disk. Facing and flash
/// options are accepted and ignored.
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn capture(&self, options: &CaptureOptions) -> Result<Photo, CameraError> {
        let mime = MimeGuess::from_path(&self.path).first_or_octet_stream();
        if mime.type_() != "image" {
            return Err(CameraError::UnsupportedSource(mime.to_string()));
        }

        debug!(
            path = %self.path.display(),
            facing = ?options.facing,
            flash = ?options.flash,
            "capturing from file"
        );
        let image = image::open(&self.path)?.to_rgba8();
        let (width, height) = image.dimensions();

        Ok(Photo {
            image,
            uri: self.path.display().to_string(),
            width,
            height,
            mime_type: mime.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn write_test_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let image = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        image
            .save_with_format(&path, ImageFormat::Png)
            .expect("test image should save");
        path
    }

    #[tokio::test]
    async fn test_capture_decodes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_photo(dir.path(), "shot.png", 64, 48);
        let camera = FileCamera::new(&path);

        let photo = camera.capture(&CaptureOptions::default()).await.unwrap();

        assert_eq!(photo.width, 64);
        assert_eq!(photo.height, 48);
        assert_eq!(photo.mime_type, "image/png");
        assert_eq!(photo.uri, path.display().to_string());
    }

    #[tokio::test]
    async fn test_capture_rejects_non_image_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not pixels").unwrap();
        let camera = FileCamera::new(&path);

        let result = camera.capture(&CaptureOptions::default()).await;

        assert!(matches!(
            result.unwrap_err(),
            CameraError::UnsupportedSource(_)
        ));
    }

    #[tokio::test]
    async fn test_capture_fails_on_corrupt_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, "not a png").unwrap();
        let camera = FileCamera::new(&path);

        let result = camera.capture(&CaptureOptions::default()).await;

        assert!(matches!(result.unwrap_err(), CameraError::Decode(_)));
    }
}

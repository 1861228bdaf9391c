//! The camera collaborator: one capture request, one decoded photo.
mod error;
mod file;

pub use error::CameraError;
pub use file::FileCamera;

use async_trait::async_trait;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Which lens the capture should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    /// The front/back toggle on the capture screen.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

/// Flash behavior during capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlashMode {
    #[default]
    Off,
    Torch,
}

impl FlashMode {
    /// The flash toggle on the capture screen.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::Torch,
            Self::Torch => Self::Off,
        }
    }
}

/// Encoding requested for the captured image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureFormat {
    #[default]
    Jpeg,
    Png,
}

/// Options handed to the camera for a single shutter press.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOptions {
    /// Encoding quality in `[0.0, 1.0]`; only meaningful for lossy formats.
    pub quality: f32,
    pub format: CaptureFormat,
    pub facing: CameraFacing,
    pub flash: FlashMode,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 1.0,
            format: CaptureFormat::default(),
            facing: CameraFacing::default(),
            flash: FlashMode::default(),
        }
    }
}

/// A captured photograph, decoded and ready for compositing.
#[derive(Debug, Clone)]
pub struct Photo {
    pub image: RgbaImage,
    /// Where the pixels came from (a file path for [`FileCamera`]).
    pub uri: String,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
}

/// The camera collaborator. Assumed to succeed once permission is granted;
/// a failure is surfaced as-is with no retry.
#[async_trait]
pub trait Camera: Send + Sync {
    async fn capture(&self, options: &CaptureOptions) -> Result<Photo, CameraError>;
}

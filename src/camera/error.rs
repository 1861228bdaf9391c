use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("permission to access the camera was denied")]
    PermissionDenied,

    #[error("unsupported capture source: {0}")]
    UnsupportedSource(String),

    #[error("failed to decode the captured image")]
    Decode(#[from] image::ImageError),

    #[error("I/O error while capturing: {0}")]
    Io(#[from] std::io::Error),
}

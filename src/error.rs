use thiserror::Error;

/// The primary error type for the geostamp crate.
#[derive(Error, Debug)]
pub enum GeoStampError {
    #[error("Location fetch failed: {0}")]
    Location(#[from] crate::location::LocationError),

    #[error("Camera capture failed: {0}")]
    Camera(#[from] crate::camera::CameraError),

    #[error("Map thumbnail failed: {0}")]
    Map(#[from] crate::map::MapError),

    #[error("Composite rendering failed: {0}")]
    Overlay(#[from] crate::overlay::OverlayError),

    #[error("Saving or sharing failed: {0}")]
    Output(#[from] crate::output::OutputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serializing the outcome failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The capture flow was cancelled")]
    Cancelled,
}

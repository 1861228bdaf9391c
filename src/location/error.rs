use crate::permissions::Capability;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("permission to access {0} was denied")]
    PermissionDenied(Capability),

    #[error("the photo carries no GPS coordinates")]
    MissingGps,

    #[error("exiftool failed to read the photo")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoder initialization failed: {0}")]
    ClientInit(String),

    #[error("the location fetch was cancelled")]
    Cancelled,
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("don't have the required permission: please allow media access, give permission in settings")]
    PermissionDenied,

    #[error("no pictures directory could be resolved on this system")]
    NoPicturesDirectory,

    #[error("I/O error while saving: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode the image")]
    Encode(#[from] image::ImageError),

    #[error("could not hand the image to the system handler: {0}")]
    Share(String),
}

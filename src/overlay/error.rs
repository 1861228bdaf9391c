use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("overlay markup failed to parse: {0}")]
    Svg(String),

    #[error("overlay rasterization failed: {0}")]
    Render(String),

    #[error("failed to encode the map thumbnail for embedding")]
    Encode(#[from] image::ImageError),
}

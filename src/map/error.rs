use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("tile request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tile client initialization failed: {0}")]
    ClientInit(String),

    #[error("tile server answered with status {0}")]
    TileStatus(u16),

    #[error("failed to decode a map tile")]
    TileDecode(#[from] image::ImageError),

    #[error("no map tile could be fetched for the requested viewport")]
    NoTiles,

    #[error("requested thumbnail has a zero dimension")]
    EmptyViewport,
}

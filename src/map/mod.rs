//! Map thumbnail rendering from slippy-map raster tiles.
pub mod error;
mod fetch;
mod thumbnail;
pub mod tile;

pub use error::MapError;
pub use fetch::{HttpTileFetcher, TileFetcher};
pub use thumbnail::render_thumbnail;
pub use tile::TileCoord;

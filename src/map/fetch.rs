use crate::map::error::MapError;
use crate::map::tile::TileCoord;
use async_trait::async_trait;
use tracing::debug;

const OSM_TILE_BASE_URL: &str = "https://tile.openstreetmap.org";
const USER_AGENT: &str = concat!("geostamp/", env!("CARGO_PKG_VERSION"), " (photo-stamper)");

/// The tile-server collaborator: one tile coordinate in, encoded raster
/// bytes out.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>, MapError>;
}

/// Fetches raster tiles from the public OpenStreetMap tile server.
pub struct HttpTileFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTileFetcher {
    pub fn new() -> Result<Self, MapError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MapError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: OSM_TILE_BASE_URL.to_string(),
        })
    }

    /// Points the fetcher at a different tile server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TileFetcher for HttpTileFetcher {
    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>, MapError> {
        let url = format!("{}/{}/{}/{}.png", self.base_url, tile.z, tile.x, tile.y);
        debug!("fetching map tile {url}");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MapError::TileStatus(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

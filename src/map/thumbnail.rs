use crate::map::error::MapError;
use crate::map::fetch::TileFetcher;
use crate::map::tile::{TILE_SIZE, TileCoord, global_pixel, tiles_per_axis};
use image::{RgbaImage, imageops};
use tracing::warn;

/// Stitches a map thumbnail of `size` pixels centered on the coordinates.
///
/// Tiles covering the viewport are fetched one at a time; a tile that
/// fails to arrive or decode is logged and left blank. Only when not a
/// single tile arrives does the whole thumbnail fail.
pub async fn render_thumbnail(
    fetcher: &dyn TileFetcher,
    latitude: f64,
    longitude: f64,
    zoom: u8,
    size: (u32, u32),
) -> Result<RgbaImage, MapError> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        return Err(MapError::EmptyViewport);
    }

    let (center_x, center_y) = global_pixel(latitude, longitude, zoom);
    let left = center_x - f64::from(width) / 2.0;
    let top = center_y - f64::from(height) / 2.0;

    let tile_size = f64::from(TILE_SIZE);
    // Unclamped tile indices of the viewport corners; x wraps and y is
    // range-checked per tile below.
    let first_column = (left / tile_size).floor() as i64;
    let last_column = ((left + f64::from(width)) / tile_size).floor() as i64;
    let first_row = (top / tile_size).floor() as i64;
    let last_row = ((top + f64::from(height)) / tile_size).floor() as i64;

    let tiles = i64::from(tiles_per_axis(zoom));
    let mut canvas = RgbaImage::new(width, height);
    let mut fetched = 0usize;

    for row in first_row..=last_row {
        if row < 0 || row >= tiles {
            continue;
        }
        for column in first_column..=last_column {
            let tile = TileCoord {
                x: column.rem_euclid(tiles) as u32,
                y: row as u32,
                z: zoom,
            };

            let bytes = match fetcher.fetch(tile).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("map tile {tile:?} unavailable: {e}");
                    continue;
                }
            };
            let tile_image = match image::load_from_memory(&bytes) {
                Ok(image) => image.to_rgba8(),
                Err(e) => {
                    warn!("map tile {tile:?} failed to decode: {e}");
                    continue;
                }
            };

            // Tile origin in canvas space.
            let offset_x = column as f64 * tile_size - left;
            let offset_y = row as f64 * tile_size - top;
            imageops::overlay(
                &mut canvas,
                &tile_image,
                offset_x.round() as i64,
                offset_y.round() as i64,
            );
            fetched += 1;
        }
    }

    if fetched == 0 {
        return Err(MapError::NoTiles);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tile::TileCoord;
    use async_trait::async_trait;
    use image::ImageFormat;
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Serves solid-color tiles and records what was asked for.
    struct SolidTiles {
        requests: Mutex<Vec<TileCoord>>,
        fail: bool,
    }

    impl SolidTiles {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl TileFetcher for SolidTiles {
        async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>, MapError> {
            self.requests.lock().unwrap().push(tile);
            if self.fail {
                return Err(MapError::TileStatus(503));
            }
            let tile_image =
                RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, image::Rgba([100, 150, 200, 255]));
            let mut bytes = Cursor::new(Vec::new());
            image::DynamicImage::ImageRgba8(tile_image)
                .write_to(&mut bytes, ImageFormat::Png)
                .unwrap();
            Ok(bytes.into_inner())
        }
    }

    #[tokio::test]
    async fn test_thumbnail_has_requested_size_and_filled_pixels() {
        let fetcher = SolidTiles::new();

        let thumbnail = render_thumbnail(&fetcher, 23.2947586, 85.3237117, 13, (110, 130))
            .await
            .unwrap();

        assert_eq!(thumbnail.dimensions(), (110, 130));
        // Every pixel comes from a solid tile.
        assert_eq!(thumbnail.get_pixel(0, 0).0, [100, 150, 200, 255]);
        assert_eq!(thumbnail.get_pixel(109, 129).0, [100, 150, 200, 255]);
    }

    #[tokio::test]
    async fn test_small_viewport_touches_at_most_four_tiles() {
        let fetcher = SolidTiles::new();

        render_thumbnail(&fetcher, 52.379189, 4.899431, 13, (110, 130))
            .await
            .unwrap();

        let requests = fetcher.requests.lock().unwrap();
        assert!(!requests.is_empty());
        assert!(requests.len() <= 4, "got {} tile requests", requests.len());
        for tile in requests.iter() {
            assert_eq!(tile.z, 13);
        }
    }

    #[tokio::test]
    async fn test_all_tiles_failing_is_an_error() {
        let fetcher = SolidTiles::failing();

        let result = render_thumbnail(&fetcher, 52.379189, 4.899431, 13, (110, 130)).await;

        assert!(matches!(result.unwrap_err(), MapError::NoTiles));
    }

    #[tokio::test]
    async fn test_zero_viewport_is_rejected() {
        let fetcher = SolidTiles::new();

        let result = render_thumbnail(&fetcher, 0.0, 0.0, 13, (0, 130)).await;

        assert!(matches!(result.unwrap_err(), MapError::EmptyViewport));
    }
}

//! Web-Mercator tile arithmetic. Pure functions, no I/O.

use serde::{Deserialize, Serialize};

/// Edge length of a raster tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude bound of the Web-Mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Identifies one raster tile in the slippy-map scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

/// Number of tiles along one axis at the given zoom.
pub fn tiles_per_axis(zoom: u8) -> u32 {
    1u32 << zoom
}

/// Clamps a latitude into the Mercator projection domain.
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
}

/// Projects coordinates to global pixel space at the given zoom, where the
/// world spans `tiles_per_axis(zoom) * TILE_SIZE` pixels on each axis.
pub fn global_pixel(latitude: f64, longitude: f64, zoom: u8) -> (f64, f64) {
    let world = f64::from(tiles_per_axis(zoom) * TILE_SIZE);
    let lat_rad = clamp_latitude(latitude).to_radians();

    let x = (longitude + 180.0) / 360.0 * world;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
    (x, y)
}

/// The tile containing a global pixel. `x` wraps around the antimeridian,
/// `y` is clamped to the projection edge.
pub fn tile_at(pixel_x: f64, pixel_y: f64, zoom: u8) -> TileCoord {
    let tiles = tiles_per_axis(zoom);
    let tile = f64::from(TILE_SIZE);

    let x = (pixel_x / tile).floor() as i64;
    let y = (pixel_y / tile).floor() as i64;

    TileCoord {
        x: x.rem_euclid(i64::from(tiles)) as u32,
        y: y.clamp(0, i64::from(tiles) - 1) as u32,
        z: zoom,
    }
}

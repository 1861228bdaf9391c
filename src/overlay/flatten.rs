//! View flattening: rasterizes the overlay subtree and composites it onto
//! the photo.

use crate::overlay::error::OverlayError;
use crate::overlay::svg::{MAP_HEIGHT, MAP_WIDTH, overlay_scale, overlay_svg};
use crate::structs::LocationRecord;
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, RgbaImage, imageops};
use resvg::usvg;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::sync::{Arc, LazyLock};

static FONTDB: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Whether the overlay is baked into the saved image or kept as its own
/// layer. One renderer, one flag; no parallel screen variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayMode {
    /// Flatten the overlay into the photo (the terminal design).
    #[default]
    Flatten,
    /// Keep the photo untouched and emit the overlay as a transparent
    /// layer of the same dimensions.
    Separate,
}

/// Result of compositing: the image to save, plus the floating overlay
/// layer when [`OverlayMode::Separate`] was requested.
#[derive(Debug, Clone)]
pub struct StampedImage {
    pub image: RgbaImage,
    pub overlay_layer: Option<RgbaImage>,
}

/// The size in pixels the map thumbnail should be rendered at for a photo
/// of this width.
pub fn map_size_for(photo_width: u32) -> (u32, u32) {
    let s = overlay_scale(photo_width);
    ((MAP_WIDTH * s) as u32, (MAP_HEIGHT * s) as u32)
}

/// Renders the overlay for `record` over `photo` according to `mode`.
///
/// The map thumbnail is optional; without it the data panel still
/// renders (the degraded path when tiles are unavailable).
pub fn compose(
    photo: &RgbaImage,
    record: &LocationRecord,
    map: Option<&RgbaImage>,
    mode: OverlayMode,
) -> Result<StampedImage, OverlayError> {
    let (width, height) = photo.dimensions();

    let map_data = map.map(encode_png_base64).transpose()?;
    let svg = overlay_svg(record, map_data.as_deref(), width, height);
    let layer = rasterize_svg(&svg, width, height)?;

    match mode {
        OverlayMode::Flatten => {
            let mut flattened = photo.clone();
            imageops::overlay(&mut flattened, &layer, 0, 0);
            Ok(StampedImage {
                image: flattened,
                overlay_layer: None,
            })
        }
        OverlayMode::Separate => Ok(StampedImage {
            image: photo.clone(),
            overlay_layer: Some(layer),
        }),
    }
}

/// Rasterizes SVG markup to an RGBA image of the given size.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> Result<RgbaImage, OverlayError> {
    let mut options = usvg::Options::default();
    options.fontdb = FONTDB.clone();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| OverlayError::Svg(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| OverlayError::Render("zero-sized pixmap".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // Pixmap pixels are premultiplied; image expects straight alpha.
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| OverlayError::Render("pixel buffer size mismatch".to_string()))
}

fn encode_png_base64(image: &RgbaImage) -> Result<String, OverlayError> {
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image.clone()).write_to(&mut bytes, ImageFormat::Png)?;
    Ok(general_purpose::STANDARD.encode(bytes.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Address, LocationFix};
    use crate::time::CapturedAt;
    use chrono::{TimeZone, Utc};
    use image::Rgba;

    fn record() -> LocationRecord {
        LocationRecord {
            fix: LocationFix::new(
                52.379189,
                4.899431,
                Utc.with_ymd_and_hms(2023, 1, 5, 13, 30, 0).unwrap(),
            ),
            address: Address {
                city: Some("Amsterdam".to_string()),
                region: Some("North Holland".to_string()),
                country: Some("Netherlands".to_string()),
                iso_country_code: Some("NL".to_string()),
                ..Address::default()
            },
            captured_at: CapturedAt {
                date: "1/5/2023".to_string(),
                time: "1:30:00PM".to_string(),
                timezone: Some("Europe/Amsterdam".to_string()),
            },
        }
    }

    fn white_photo(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_rasterize_paints_requested_shapes() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect x="0" y="0" width="10" height="10" fill="#ff0000"/></svg>"##;

        let raster = rasterize_svg(svg, 10, 10).unwrap();

        assert_eq!(raster.dimensions(), (10, 10));
        assert_eq!(raster.get_pixel(5, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_rasterize_rejects_broken_markup() {
        let result = rasterize_svg("<svg", 10, 10);
        assert!(matches!(result.unwrap_err(), OverlayError::Svg(_)));
    }

    #[test]
    fn test_flatten_darkens_the_panel_region() {
        let photo = white_photo(400, 300);

        let stamped = compose(&photo, &record(), None, OverlayMode::Flatten).unwrap();

        assert!(stamped.overlay_layer.is_none());
        assert_eq!(stamped.image.dimensions(), (400, 300));
        // Under the translucent panel the white base must have darkened.
        let panel_pixel = stamped.image.get_pixel(300, 250);
        assert!(panel_pixel.0[0] < 200, "panel pixel: {:?}", panel_pixel);
        // Far from both overlay elements the photo is untouched.
        assert_eq!(stamped.image.get_pixel(200, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_separate_mode_leaves_the_photo_untouched() {
        let photo = white_photo(400, 300);

        let stamped = compose(&photo, &record(), None, OverlayMode::Separate).unwrap();

        assert_eq!(stamped.image, photo);
        let layer = stamped.overlay_layer.expect("separate mode emits a layer");
        assert_eq!(layer.dimensions(), (400, 300));
        // The layer is transparent outside the panel...
        assert_eq!(layer.get_pixel(200, 20).0[3], 0);
        // ...and opaque-ish where the panel sits.
        assert!(layer.get_pixel(300, 250).0[3] > 0);
    }

    #[test]
    fn test_map_thumbnail_is_painted_bottom_left() {
        let photo = white_photo(400, 300);
        let map = RgbaImage::from_pixel(110, 130, Rgba([60, 120, 60, 255]));

        let stamped = compose(&photo, &record(), Some(&map), OverlayMode::Flatten).unwrap();

        // Inside the rounded map rect, away from the marker.
        let map_pixel = stamped.image.get_pixel(30, 190);
        assert!(
            map_pixel.0[1] > map_pixel.0[2],
            "expected greenish map pixel, got {:?}",
            map_pixel
        );
    }

    #[test]
    fn test_map_size_scales_with_photo_width() {
        assert_eq!(map_size_for(390), (110, 130));
        assert_eq!(map_size_for(780), (220, 260));
        // Small photos never shrink the reference layout.
        assert_eq!(map_size_for(100), (110, 130));
    }
}

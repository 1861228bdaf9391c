use crate::output::error::OutputError;
use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Downscales the composite and encodes it as a JPEG data URL, for inline
/// previews without touching disk.
pub fn image_to_data_url(
    image: &RgbaImage,
    thumbnail_max_size: (u32, u32),
) -> Result<String, OutputError> {
    let thumbnail = DynamicImage::ImageRgba8(image.clone())
        .thumbnail(thumbnail_max_size.0, thumbnail_max_size.1);
    let mut bytes = Cursor::new(Vec::new());
    // JPEG has no alpha channel.
    DynamicImage::ImageRgb8(thumbnail.to_rgb8()).write_to(&mut bytes, ImageFormat::Jpeg)?;
    let b64 = general_purpose::STANDARD.encode(bytes.into_inner());
    Ok(format!("data:image/jpeg;base64,{b64}"))
}

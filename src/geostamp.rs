use crate::camera::{Camera, CameraError, CaptureOptions, Photo};
use crate::error::GeoStampError;
use crate::location::{LocationError, LocationProvider, OfflineGeocoder, ReverseGeocode};
use crate::map::{HttpTileFetcher, TileFetcher, render_thumbnail};
use crate::output::{OutputError, default_photo_directory, image_to_data_url, save_image, share_file};
use crate::overlay::{OverlayError, OverlayMode, StampedImage, compose, map_size_for};
use crate::permissions::{Capability, Permissions, StaticPermissions};
use crate::session::{CancelToken, is_cancelled};
use crate::structs::{LocationRecord, StampOutcome};
use crate::time::captured_at;
use bon::bon;
use chrono::{DateTime, Local};
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The main entry point for the capture-and-stamp pipeline.
///
/// Holds the collaborators (permissions, location provider, camera,
/// geocoder, tile fetcher) and the rendering configuration. It is
/// designed to be created once per screen session and driven through the
/// linear flow: fetch location, capture, stamp, save or share.
///
/// Use the builder pattern to construct an instance:
/// ```rust,no_run
/// # use geostamp::{FileCamera, FixedProvider, GeoStamp, GeoStampError};
/// # fn main() -> Result<(), GeoStampError> {
/// let app = GeoStamp::builder()
///     .location_provider(Box::new(FixedProvider::new(23.2947586, 85.3237117)))
///     .camera(Box::new(FileCamera::new("shot.jpg")))
///     .map_zoom(13) // Optionally configure parameters
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct GeoStamp {
    permissions: Box<dyn Permissions>,
    location_provider: Box<dyn LocationProvider>,
    camera: Box<dyn Camera>,
    geocoder: Box<dyn ReverseGeocode>,
    tile_fetcher: Box<dyn TileFetcher>,
    map_zoom: u8,
    include_map: bool,
    thumbnail_max_size: (u32, u32),
    overlay_mode: OverlayMode,
    output_dir: Option<PathBuf>,
}

#[bon]
impl GeoStamp {
    /// Constructs a `GeoStamp` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `location_provider: Box<dyn LocationProvider>` - Where the fix comes from: explicit coordinates ([`crate::FixedProvider`]) or the photo's own GPS tags ([`crate::ExifProvider`]).
    /// * `camera: Box<dyn Camera>` - The capture collaborator; [`crate::FileCamera`] decodes an image file in place of device hardware.
    /// * `permissions: Option<Box<dyn Permissions>>` - The permission prompt fixture. Defaults to granting everything.
    /// * `geocoder: Option<Box<dyn ReverseGeocode>>` - Defaults to the offline embedded-dataset geocoder; [`crate::NominatimGeocoder`] adds street-level detail.
    /// * `tile_fetcher: Option<Box<dyn TileFetcher>>` - Defaults to the public OpenStreetMap tile server.
    /// * `map_zoom: u8` - (Default: `13`) Slippy-map zoom of the thumbnail.
    /// * `include_map: bool` - (Default: `true`) Whether the composite carries a map thumbnail at all.
    /// * `thumbnail_max_size: (u32, u32)` - (Default: `(10, 10)`) Bound for the inline data-URL preview of the composite.
    /// * `overlay_mode: OverlayMode` - (Default: `Flatten`) Bake the overlay into the saved image, or save photo and overlay layer separately.
    /// * `output_dir: Option<PathBuf>` - Save directory. Defaults to `~/Pictures/GeoStamp`.
    ///
    /// # Errors
    ///
    /// Returns an error when the default tile client cannot be
    /// initialized.
    #[builder]
    pub fn new(
        location_provider: Box<dyn LocationProvider>,
        camera: Box<dyn Camera>,
        permissions: Option<Box<dyn Permissions>>,
        geocoder: Option<Box<dyn ReverseGeocode>>,
        tile_fetcher: Option<Box<dyn TileFetcher>>,
        #[builder(default = 13)] map_zoom: u8,
        #[builder(default = true)] include_map: bool,
        #[builder(default = (10, 10))] thumbnail_max_size: (u32, u32),
        #[builder(default)] overlay_mode: OverlayMode,
        output_dir: Option<PathBuf>,
    ) -> Result<Self, GeoStampError> {
        let permissions =
            permissions.unwrap_or_else(|| Box::new(StaticPermissions::allow_all()));
        let geocoder = geocoder.unwrap_or_else(|| Box::new(OfflineGeocoder::new()));
        let tile_fetcher = match tile_fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(HttpTileFetcher::new()?),
        };
        Ok(Self {
            permissions,
            location_provider,
            camera,
            geocoder,
            tile_fetcher,
            map_zoom,
            include_map,
            thumbnail_max_size,
            overlay_mode,
            output_dir,
        })
    }

    /// Resolves the device position into a [`LocationRecord`]:
    /// permission, fix, reverse geocode, localized capture timestamps.
    ///
    /// Each step is awaited in turn; the cancellation token is consulted
    /// between steps so a fetch outliving its screen is discarded.
    ///
    /// # Errors
    ///
    /// * [`LocationError::PermissionDenied`] when the location capability
    ///   is not granted. No coordinates are produced in that case.
    /// * [`LocationError::Cancelled`] when the token fired mid-fetch.
    /// * Whatever the provider or geocoder surfaces.
    pub async fn fetch_location(
        &self,
        cancel: &CancelToken,
    ) -> Result<LocationRecord, LocationError> {
        if !self.permissions.query(Capability::Location).is_granted() {
            return Err(LocationError::PermissionDenied(Capability::Location));
        }

        let fix = self.location_provider.current_fix().await?;
        if is_cancelled(cancel) {
            return Err(LocationError::Cancelled);
        }

        let address = self
            .geocoder
            .reverse(fix.latitude, fix.longitude)
            .await?
            .unwrap_or_default();
        if is_cancelled(cancel) {
            return Err(LocationError::Cancelled);
        }

        let captured_at = captured_at(fix.latitude, fix.longitude, fix.timestamp);
        Ok(LocationRecord {
            fix,
            address,
            captured_at,
        })
    }

    /// One shutter press. Refused before the collaborator is invoked when
    /// the camera capability is denied.
    pub async fn capture(&self, options: &CaptureOptions) -> Result<Photo, CameraError> {
        if !self.permissions.query(Capability::Camera).is_granted() {
            return Err(CameraError::PermissionDenied);
        }
        self.camera.capture(options).await
    }

    /// Renders the location overlay over the photo.
    ///
    /// The map thumbnail is best-effort: when tiles cannot be fetched the
    /// composite is produced without it and a warning is logged.
    pub async fn stamp(
        &self,
        photo: &Photo,
        record: &LocationRecord,
    ) -> Result<StampedImage, OverlayError> {
        let map = if self.include_map {
            let size = map_size_for(photo.width);
            match render_thumbnail(
                self.tile_fetcher.as_ref(),
                record.fix.latitude,
                record.fix.longitude,
                self.map_zoom,
                size,
            )
            .await
            {
                Ok(map) => Some(map),
                Err(e) => {
                    warn!("map thumbnail unavailable, compositing without it: {e}");
                    None
                }
            }
        } else {
            None
        };

        compose(&photo.image, record, map.as_ref(), self.overlay_mode)
    }

    /// Writes the composite (and, in separate mode, the overlay layer)
    /// into the configured pictures directory.
    ///
    /// Refused when the media-library capability is denied; the error
    /// message carries the settings guidance shown to the user.
    pub fn save(
        &self,
        stamped: &StampedImage,
        taken: DateTime<Local>,
    ) -> Result<(PathBuf, Option<PathBuf>), OutputError> {
        if !self.permissions.query(Capability::MediaLibrary).is_granted() {
            return Err(OutputError::PermissionDenied);
        }

        let dir = self
            .output_dir
            .clone()
            .unwrap_or_else(default_photo_directory);
        let photo_path = save_image(&stamped.image, &dir, ImageFormat::Jpeg, taken)?;
        let overlay_path = match &stamped.overlay_layer {
            Some(layer) => Some(save_image(layer, &dir, ImageFormat::Png, taken)?),
            None => None,
        };
        Ok((photo_path, overlay_path))
    }

    /// Hands a saved composite to the OS default handler.
    pub fn share(&self, path: &Path) -> Result<(), OutputError> {
        share_file(path)
    }

    /// Inline data-URL preview of an image, bounded by the configured
    /// thumbnail size.
    pub fn data_url(&self, image: &RgbaImage) -> Result<String, OutputError> {
        image_to_data_url(image, self.thumbnail_max_size)
    }

    /// The whole linear flow: fetch location, capture, stamp, save, and
    /// optionally share. Returns a [`StampOutcome`] describing what was
    /// produced.
    pub async fn run(
        &self,
        options: &CaptureOptions,
        cancel: &CancelToken,
        share: bool,
    ) -> Result<StampOutcome, GeoStampError> {
        let record = self.fetch_location(cancel).await?;
        let photo = self.capture(options).await?;
        if is_cancelled(cancel) {
            return Err(GeoStampError::Cancelled);
        }

        let stamped = self.stamp(&photo, &record).await?;
        if is_cancelled(cancel) {
            return Err(GeoStampError::Cancelled);
        }

        let (photo_path, overlay_path) = self.save(&stamped, Local::now())?;
        let data_url = self.data_url(&stamped.image)?;
        if share {
            self.share(&photo_path)?;
        }

        Ok(StampOutcome {
            record,
            photo_path,
            overlay_path,
            data_url,
        })
    }
}

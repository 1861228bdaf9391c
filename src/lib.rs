//! # GeoStamp
//!
//! Stamp photographs with the place and time they were taken.
//!
//! This crate drives the linear capture flow of a geotagging camera
//! app: request permissions, resolve the device position, reverse-geocode
//! it into an address record, capture a photo, render an address/time
//! panel plus a small map thumbnail over it, and flatten the composition
//! into one image that can be saved or shared.
//!
//! ## Key Features
//!
//! - **Location Records**: A position fix paired with a reverse-geocoded
//!   address (offline embedded dataset, or OSM Nominatim for street-level
//!   detail) and localized capture date/time.
//! - **Capture Collaborators**: Camera, permission prompts, location
//!   providers, and tile servers are narrow traits; every one of them can
//!   be swapped for a fixture.
//! - **Map Thumbnails**: A centered crop stitched from slippy-map raster
//!   tiles at a configurable zoom.
//! - **View Flattening**: The overlay is one SVG subtree rasterized over
//!   the photo; it can also be kept as a separate transparent layer.
//! - **Save & Share**: Timestamped files under the pictures directory,
//!   OS share handoff, and inline data-URL previews.
//!
//! ## Usage
//!
//! Build a [`GeoStamp`] with its collaborators and run the flow:
//!
//! ```rust,no_run
//! use geostamp::{CaptureOptions, FileCamera, FixedProvider, GeoStamp};
//! use geostamp::session::new_cancel_token;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), geostamp::GeoStampError> {
//!     let app = GeoStamp::builder()
//!         .location_provider(Box::new(FixedProvider::new(23.2947586, 85.3237117)))
//!         .camera(Box::new(FileCamera::new("shot.jpg")))
//!         .build()?;
//!
//!     let cancel = new_cancel_token();
//!     let outcome = app.run(&CaptureOptions::default(), &cancel, false).await?;
//!     println!("saved to {}", outcome.photo_path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod camera;
pub mod error;
pub mod geostamp;
pub mod location;
pub mod map;
pub mod output;
pub mod overlay;
pub mod permissions;
pub mod session;
pub mod structs;
pub mod time;

pub use camera::{
    Camera, CameraError, CameraFacing, CaptureFormat, CaptureOptions, FileCamera, FlashMode, Photo,
};
pub use error::GeoStampError;
pub use geostamp::GeoStamp;
pub use location::{
    Address, ExifProvider, FixedProvider, LocationError, LocationFix, LocationProvider,
    NominatimGeocoder, OfflineGeocoder, ReverseGeocode,
};
pub use map::{HttpTileFetcher, MapError, TileCoord, TileFetcher};
pub use output::OutputError;
pub use overlay::{OverlayError, OverlayMode, StampedImage};
pub use permissions::{Capability, PermissionStatus, Permissions, StaticPermissions};
pub use session::{CancelToken, LocationSession, ScreenState};
pub use structs::{LocationRecord, StampOutcome};
pub use time::{CapturedAt, to_12_hour};

//! Location fetch: permission-gated fix acquisition and reverse geocoding.
pub mod error;
mod geocode;
mod nominatim;
mod provider;

pub use error::LocationError;
pub use geocode::{Address, OfflineGeocoder, ReverseGeocode};
pub use nominatim::NominatimGeocoder;
pub use provider::{ExifProvider, FixedProvider, LocationFix, LocationProvider};

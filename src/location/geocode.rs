use crate::location::error::LocationError;
use async_trait::async_trait;
use reverse_geocoder::ReverseGeocoder;
use serde::{Deserialize, Serialize};

/// The reverse-geocoded address record shown on the overlay.
///
/// Every field is optional: a geocoder fills what it knows and rendering
/// treats anything absent as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Place or street-level name (plus code, road).
    pub name: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    /// State or province.
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub iso_country_code: Option<String>,
}

/// The reverse-geocoding collaborator.
///
/// `None` means the service answered but had no record for the
/// coordinates; transport failures surface as errors.
#[async_trait]
pub trait ReverseGeocode: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Address>, LocationError>;
}

/// Reverse geocoding against the embedded place dataset. Deterministic and
/// offline; no street-level detail, so `name` and `postal_code` stay empty.
pub struct OfflineGeocoder {
    geocoder: ReverseGeocoder,
}

impl OfflineGeocoder {
    pub fn new() -> Self {
        Self {
            geocoder: ReverseGeocoder::new(),
        }
    }
}

impl Default for OfflineGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReverseGeocode for OfflineGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Address>, LocationError> {
        let search_result = self.geocoder.search((latitude, longitude));
        let record = search_result.record;
        let country = rust_iso3166::from_alpha2(&record.cc);

        Ok(Some(Address {
            name: None,
            district: non_empty(&record.admin2),
            city: non_empty(&record.name),
            region: non_empty(&record.admin1),
            postal_code: None,
            country: country.map(|c| c.name.to_string()),
            iso_country_code: non_empty(&record.cc),
        }))
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

//! Reverse geocoding against the OSM Nominatim API, for street-level
//! detail the embedded dataset cannot provide.

use crate::location::error::LocationError;
use crate::location::geocode::{Address, ReverseGeocode};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("geostamp/", env!("CARGO_PKG_VERSION"), " (photo-stamper)");

/// Nominatim `/reverse` response structure.
#[derive(Debug, Deserialize)]
pub struct NominatimReverse {
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub address: Option<NominatimAddress>,
}

/// Nominatim address components; the service populates a varying subset.
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub road: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub city_district: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl NominatimAddress {
    /// City, falling back to town or village.
    pub fn get_city(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
    }

    /// District, falling back through suburb and neighbourhood.
    pub fn get_district(&self) -> Option<String> {
        self.city_district
            .clone()
            .or_else(|| self.suburb.clone())
            .or_else(|| self.neighbourhood.clone())
    }
}

/// Reverse geocoder backed by the public Nominatim instance.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, LocationError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LocationError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: NOMINATIM_BASE_URL.to_string(),
        })
    }

    /// Points the geocoder at a different Nominatim instance.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ReverseGeocode for NominatimGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Address>, LocationError> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={latitude}&lon={longitude}&addressdetails=1&accept-language=en",
            self.base_url
        );
        debug!("reverse geocoding {latitude},{longitude} -> {url}");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("nominatim returned status: {}", response.status());
            return Ok(None);
        }

        let result: NominatimReverse = response.json().await?;
        // An out-of-coverage query answers with an error body; every field
        // we model is absent there.
        if result.display_name.is_none() && result.address.is_none() {
            return Ok(None);
        }
        Ok(Some(to_address(result)))
    }
}

fn to_address(response: NominatimReverse) -> Address {
    let components = response.address.unwrap_or_default();
    Address {
        name: response.name.filter(|n| !n.is_empty()).or_else(|| components.road.clone()),
        district: components.get_district(),
        city: components.get_city(),
        region: components.state.clone(),
        postal_code: components.postcode.clone(),
        country: components.country.clone(),
        iso_country_code: components.country_code.as_deref().map(str::to_uppercase),
    }
}

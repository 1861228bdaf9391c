use crate::location::error::LocationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use exiftool::ExifTool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// A single resolved position fix.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters, when the source reports one.
    pub accuracy: Option<f64>,
    /// When the fix was taken, in UTC.
    pub timestamp: DateTime<Utc>,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
            timestamp,
        }
    }
}

/// The geolocation collaborator: one async request, one fix or an error.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_fix(&self) -> Result<LocationFix, LocationError>;
}

/// Serves a fixed position, for explicit coordinates and tests.
#[derive(Debug, Clone)]
pub struct FixedProvider {
    fix: LocationFix,
}

impl FixedProvider {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            fix: LocationFix::new(latitude, longitude, Utc::now()),
        }
    }

    pub fn from_fix(fix: LocationFix) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationProvider for FixedProvider {
    async fn current_fix(&self) -> Result<LocationFix, LocationError> {
        Ok(self.fix.clone())
    }
}

/// Reads the fix from a photo's GPS tags via exiftool's numeric output.
pub struct ExifProvider {
    exiftool: Mutex<ExifTool>,
    photo: PathBuf,
}

impl ExifProvider {
    pub fn new<P: AsRef<Path>>(photo: P) -> Result<Self, LocationError> {
        Ok(Self {
            exiftool: Mutex::new(ExifTool::new()?),
            photo: photo.as_ref().to_path_buf(),
        })
    }

    pub fn with_executable<P: AsRef<Path>>(
        photo: P,
        exiftool_path: &Path,
    ) -> Result<Self, LocationError> {
        Ok(Self {
            exiftool: Mutex::new(ExifTool::with_executable(exiftool_path)?),
            photo: photo.as_ref().to_path_buf(),
        })
    }
}

#[async_trait]
impl LocationProvider for ExifProvider {
    async fn current_fix(&self) -> Result<LocationFix, LocationError> {
        let numeric_exif = self.exiftool.lock().await.json(&self.photo, &["-n"])?;
        fix_from_numeric_exif(&numeric_exif).ok_or(LocationError::MissingGps)
    }
}

/// Pulls a fix out of exiftool `-n` JSON. `None` when either coordinate
/// is missing.
fn fix_from_numeric_exif(numeric_exif: &Value) -> Option<LocationFix> {
    let (Some(latitude), Some(longitude)) = (
        numeric_exif.get("GPSLatitude").and_then(Value::as_f64),
        numeric_exif.get("GPSLongitude").and_then(Value::as_f64),
    ) else {
        return None;
    };
    let altitude = numeric_exif.get("GPSAltitude").and_then(Value::as_f64);
    let accuracy = numeric_exif
        .get("GPSHPositioningError")
        .and_then(Value::as_f64);

    let timestamp = numeric_exif
        .get("GPSDateTime")
        .and_then(Value::as_str)
        .and_then(parse_gps_datetime)
        .unwrap_or_else(Utc::now);

    debug!(latitude, longitude, "fix extracted from GPS tags");
    Some(LocationFix {
        latitude,
        longitude,
        altitude,
        accuracy,
        timestamp,
    })
}

/// Parses the `GPSDateTime` tag, which exiftool renders as UTC with a
/// trailing `Z`.
fn parse_gps_datetime(s: &str) -> Option<DateTime<Utc>> {
    // %.f also matches the empty string, covering both the plain and the
    // subsecond form of the tag.
    chrono::NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S%.fZ")
        .ok()
        .map(|dt| dt.and_utc())
}

use crate::location::{Address, LocationFix};
use crate::time::CapturedAt;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the composite screen needs about where and when the photo
/// was taken.
///
/// Created once per screen session when the location fetch resolves, held
/// in memory for the duration of the capture flow, and discarded with the
/// session. One producer, one consumer, no persistence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub fix: LocationFix,
    pub address: Address,
    pub captured_at: CapturedAt,
}

/// Result of running the full capture flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampOutcome {
    pub record: LocationRecord,
    /// The saved composite (or raw photo in separate-overlay mode).
    pub photo_path: PathBuf,
    /// The separately saved overlay layer, when that mode was requested.
    pub overlay_path: Option<PathBuf>,
    /// Small inline preview of the composite.
    pub data_url: String,
}

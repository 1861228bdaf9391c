//! Builds the localized date/time strings stamped onto the composite.

use crate::time::format::to_12_hour;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use tzf_rs::DefaultFinder;

static FINDER: LazyLock<DefaultFinder> = LazyLock::new(DefaultFinder::new);

/// Wall-clock date and time at the place of capture, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedAt {
    /// Localized calendar date, `M/D/YYYY`.
    pub date: String,
    /// 12-hour wall-clock time with `AM`/`PM` suffix.
    pub time: String,
    /// IANA timezone the strings were evaluated in, `None` when the
    /// coordinates resolved to no zone and UTC was used instead.
    pub timezone: Option<String>,
}

/// Formats `instant` in the timezone of the given coordinates.
///
/// The zone is looked up from the coordinates; when no IANA zone is found
/// there (open ocean, bogus fix) the strings fall back to UTC.
pub fn captured_at(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> CapturedAt {
    let zone = Tz::from_str(FINDER.get_tz_name(longitude, latitude)).ok();

    let (date, time_24) = match zone {
        Some(tz) => {
            let local = instant.with_timezone(&tz);
            (
                local.format("%-m/%-d/%Y").to_string(),
                local.format("%H:%M:%S").to_string(),
            )
        }
        None => (
            instant.format("%-m/%-d/%Y").to_string(),
            instant.format("%H:%M:%S").to_string(),
        ),
    };

    CapturedAt {
        date,
        time: to_12_hour(&time_24),
        timezone: zone.map(|tz| tz.name().to_string()),
    }
}

//! 24-hour to 12-hour clock conversion for the overlay's time stamp.

use regex::Regex;
use std::sync::LazyLock;

// Accepts HH:MM and HH:MM:SS with HH in [00,23] and MM/SS in [00,59].
static RE_24_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)(:[0-5]\d)?$").unwrap()
});

/// Rewrites a 24-hour clock string as a 12-hour one with an `AM`/`PM` suffix.
///
/// `"00:15:30"` becomes `"12:15:30AM"`, `"13:05:00"` becomes `"1:05:00PM"`.
/// Input that does not match the 24-hour pattern is returned unchanged; the
/// conversion fails open rather than erroring.
///
/// Apply exactly once to 24-hour input. The output no longer matches the
/// 24-hour pattern, so re-feeding it passes through unchanged instead of
/// round-tripping.
pub fn to_12_hour(time: &str) -> String {
    let Some(caps) = RE_24_HOUR.captures(time) else {
        return time.to_string();
    };

    // The pattern guarantees a two-digit hour.
    let hour: u32 = caps[1].parse().unwrap_or(0);
    let minutes = &caps[2];
    let seconds = caps.get(3).map_or("", |m| m.as_str());

    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{hour}:{minutes}{seconds}{suffix}")
}

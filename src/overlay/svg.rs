//! Builds the overlay as one SVG subtree: the data panel bottom-right and
//! the map thumbnail bottom-left, sized to the photo.

use crate::structs::LocationRecord;
use std::fmt::Write;

// Reference layout, taken at a 390pt-wide phone screen and scaled up with
// the photo.
const BASE_WIDTH: f32 = 390.0;
const MARGIN: f32 = 5.0;
const CORNER_RADIUS: f32 = 20.0;
const PANEL_WIDTH: f32 = 235.0;
const PANEL_HEIGHT: f32 = 130.0;
pub(crate) const MAP_WIDTH: f32 = 110.0;
pub(crate) const MAP_HEIGHT: f32 = 130.0;
const HEADLINE_SIZE: f32 = 17.0;
const BODY_SIZE: f32 = 13.0;
const PANEL_OPACITY: f32 = 0.55;

/// How much the reference layout is magnified for a photo of this width.
pub fn overlay_scale(photo_width: u32) -> f32 {
    (photo_width as f32 / BASE_WIDTH).max(1.0)
}

/// Escapes text for embedding in SVG markup.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Joins the present parts with commas, skipping anything absent so a
/// missing field never leaves a dangling separator.
fn join_parts(parts: &[Option<&String>]) -> String {
    parts
        .iter()
        .filter_map(|p| p.map(String::as_str))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The six text lines of the data panel, in render order.
pub fn data_lines(record: &LocationRecord) -> [String; 6] {
    let address = &record.address;
    let fix = &record.fix;
    let stamp = &record.captured_at;

    let date_line = format!(
        "{} {} {}",
        stamp.date,
        stamp.time,
        address.iso_country_code.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string();

    [
        join_parts(&[
            address.city.as_ref(),
            address.district.as_ref(),
            address.region.as_ref(),
        ]),
        join_parts(&[
            address.name.as_ref(),
            address.district.as_ref(),
            address.city.as_ref(),
            address.region.as_ref(),
        ]),
        join_parts(&[address.postal_code.as_ref(), address.country.as_ref()]),
        format!("Lat {}", fix.latitude),
        format!("Long {}", fix.longitude),
        date_line,
    ]
}

/// Renders the overlay markup for a photo of the given dimensions.
///
/// `map_png_base64` is the already-encoded map thumbnail; `None` drops the
/// map element and keeps the data panel.
pub fn overlay_svg(
    record: &LocationRecord,
    map_png_base64: Option<&str>,
    width: u32,
    height: u32,
) -> String {
    let s = overlay_scale(width);
    let mut svg = String::new();

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    if let Some(map_data) = map_png_base64 {
        let map_x = MARGIN * s;
        let map_y = height as f32 - (MAP_HEIGHT + MARGIN) * s;
        let map_w = MAP_WIDTH * s;
        let map_h = MAP_HEIGHT * s;
        let _ = write!(
            svg,
            r#"<defs><clipPath id="map-clip"><rect x="{map_x}" y="{map_y}" width="{map_w}" height="{map_h}" rx="{rx}"/></clipPath></defs>"#,
            rx = CORNER_RADIUS * s
        );
        let _ = write!(
            svg,
            r##"<g clip-path="url(#map-clip)"><image x="{map_x}" y="{map_y}" width="{map_w}" height="{map_h}" href="data:image/png;base64,{map_data}"/><circle cx="{cx}" cy="{cy}" r="{r}" fill="#e53935" stroke="#ffffff" stroke-width="{sw}"/></g>"##,
            cx = map_x + map_w / 2.0,
            cy = map_y + map_h / 2.0,
            r = 5.0 * s,
            sw = 1.5 * s,
        );
    }

    let panel_x = width as f32 - (PANEL_WIDTH + MARGIN) * s;
    let panel_y = height as f32 - (PANEL_HEIGHT + MARGIN) * s;
    let _ = write!(
        svg,
        r##"<rect x="{panel_x}" y="{panel_y}" width="{w}" height="{h}" rx="{rx}" fill="#000000" fill-opacity="{PANEL_OPACITY}"/>"##,
        w = PANEL_WIDTH * s,
        h = PANEL_HEIGHT * s,
        rx = CORNER_RADIUS * s,
    );

    let lines = data_lines(record);
    let center_x = panel_x + PANEL_WIDTH * s / 2.0;
    let left_x = panel_x + 12.0 * s;

    // Headline and the two address lines are centered, the rest sits
    // flush left like the original data container.
    let centered = [
        (&lines[0], 26.0, HEADLINE_SIZE, "bold"),
        (&lines[1], 46.0, BODY_SIZE, "normal"),
        (&lines[2], 63.0, BODY_SIZE, "normal"),
    ];
    for (text, offset_y, size, weight) in centered {
        let _ = write!(
            svg,
            r##"<text x="{center_x}" y="{y}" font-family="sans-serif" font-size="{fs}" font-weight="{weight}" fill="#ffffff" text-anchor="middle">{t}</text>"##,
            y = panel_y + offset_y * s,
            fs = size * s,
            t = escape_xml(text),
        );
    }

    let left_aligned = [(&lines[3], 84.0), (&lines[4], 101.0), (&lines[5], 120.0)];
    for (text, offset_y) in left_aligned {
        let _ = write!(
            svg,
            r##"<text x="{left_x}" y="{y}" font-family="sans-serif" font-size="{fs}" fill="#ffffff">{t}</text>"##,
            y = panel_y + offset_y * s,
            fs = BODY_SIZE * s,
            t = escape_xml(text),
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Address, LocationFix};
    use crate::structs::LocationRecord;
    use crate::time::CapturedAt;
    use chrono::{TimeZone, Utc};

    fn record() -> LocationRecord {
        LocationRecord {
            fix: LocationFix::new(
                23.2947586,
                85.3237117,
                Utc.with_ymd_and_hms(2022, 6, 18, 3, 42, 52).unwrap(),
            ),
            address: Address {
                name: Some("78VF+WG9".to_string()),
                district: Some("Hesag".to_string()),
                city: Some("Ranchi".to_string()),
                region: Some("Jharkhand".to_string()),
                postal_code: Some("834003".to_string()),
                country: Some("India".to_string()),
                iso_country_code: Some("IN".to_string()),
            },
            captured_at: CapturedAt {
                date: "6/18/2022".to_string(),
                time: "3:42:52AM".to_string(),
                timezone: Some("Asia/Kolkata".to_string()),
            },
        }
    }

    #[test]
    fn test_data_lines_follow_the_panel_order() {
        let lines = data_lines(&record());

        assert_eq!(lines[0], "Ranchi, Hesag, Jharkhand");
        assert_eq!(lines[1], "78VF+WG9, Hesag, Ranchi, Jharkhand");
        assert_eq!(lines[2], "834003, India");
        assert_eq!(lines[3], "Lat 23.2947586");
        assert_eq!(lines[4], "Long 85.3237117");
        assert_eq!(lines[5], "6/18/2022 3:42:52AM IN");
    }

    #[test]
    fn test_absent_fields_render_as_empty_not_none() {
        let mut record = record();
        record.address.city = None;
        record.address.postal_code = None;
        record.address.iso_country_code = None;

        let lines = data_lines(&record);

        assert_eq!(lines[0], "Hesag, Jharkhand");
        assert_eq!(lines[2], "India");
        assert_eq!(lines[5], "6/18/2022 3:42:52AM");
        let svg = overlay_svg(&record, None, 800, 600);
        assert!(!svg.contains("None"));
    }

    #[test]
    fn test_fully_empty_address_still_renders() {
        let mut record = record();
        record.address = Address::default();

        let lines = data_lines(&record);
        assert_eq!(lines[0], "");
        assert_eq!(lines[2], "");

        let svg = overlay_svg(&record, None, 800, 600);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Lat 23.2947586"));
    }

    #[test]
    fn test_svg_escapes_markup_in_address_text() {
        let mut record = record();
        record.address.city = Some("Foo & <Bar>".to_string());

        let svg = overlay_svg(&record, None, 800, 600);

        assert!(svg.contains("Foo &amp; &lt;Bar&gt;"));
        assert!(!svg.contains("Foo & <Bar>"));
    }

    #[test]
    fn test_map_element_is_optional() {
        let with_map = overlay_svg(&record(), Some("AAAA"), 800, 600);
        let without_map = overlay_svg(&record(), None, 800, 600);

        assert!(with_map.contains("<image"));
        assert!(with_map.contains("data:image/png;base64,AAAA"));
        assert!(!without_map.contains("<image"));
        assert!(without_map.contains("<rect"));
    }

    #[test]
    fn test_scale_never_shrinks_below_reference() {
        assert_eq!(overlay_scale(100), 1.0);
        assert!((overlay_scale(780) - 2.0).abs() < 0.01);
    }
}

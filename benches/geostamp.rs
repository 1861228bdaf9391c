use criterion::{Criterion, criterion_group, criterion_main};
use geostamp::location::{Address, LocationFix};
use geostamp::map::tile::{global_pixel, tile_at};
use geostamp::overlay::overlay_svg;
use geostamp::structs::LocationRecord;
use geostamp::time::{CapturedAt, to_12_hour};
use chrono::{TimeZone, Utc};

fn bench(c: &mut Criterion) {
    c.bench_function("time::to_12_hour", |b| {
        b.iter(|| {
            let _ = to_12_hour("13:05:00");
        });
    });

    c.bench_function("map::tile_at", |b| {
        b.iter(|| {
            let (px, py) = global_pixel(23.2947586, 85.3237117, 13);
            let _ = tile_at(px, py, 13);
        });
    });

    let record = LocationRecord {
        fix: LocationFix::new(
            23.2947586,
            85.3237117,
            Utc.with_ymd_and_hms(2022, 6, 17, 22, 12, 52).unwrap(),
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
    };

    c.bench_function("overlay::overlay_svg", |b| {
        b.iter(|| {
            let _ = overlay_svg(&record, None, 4000, 3000);
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);

use geostamp::session::new_cancel_token;
use geostamp::{CaptureOptions, FileCamera, FixedProvider, GeoStamp};
use std::path::Path;

/// Stamp one photo with a known position and print the outcome.
#[tokio::main]
async fn main() -> Result<(), geostamp::GeoStampError> {
    let photo = Path::new("assets/shot.jpg");

    let app = GeoStamp::builder()
        .location_provider(Box::new(FixedProvider::new(23.2947586, 85.3237117)))
        .camera(Box::new(FileCamera::new(photo)))
        .build()?;

    let cancel = new_cancel_token();
    let outcome = app.run(&CaptureOptions::default(), &cancel, false).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

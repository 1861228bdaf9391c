use clap::Parser;
use geostamp::session::new_cancel_token;
use geostamp::{
    CameraFacing, CaptureFormat, CaptureOptions, ExifProvider, FileCamera, FixedProvider,
    FlashMode, GeoStamp, GeoStampError, LocationProvider, NominatimGeocoder, OverlayMode,
    ReverseGeocode,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "geostamp")]
#[command(about = "Stamp a photo with its capture location, time, and a map thumbnail")]
#[command(version)]
struct Cli {
    /// Photo to stamp (stands in for the device camera)
    photo: PathBuf,

    /// Latitude of the capture position
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the capture position
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Read the position from the photo's own GPS tags
    #[arg(long, conflicts_with = "lat")]
    from_exif: bool,

    /// Map thumbnail zoom level
    #[arg(long, default_value_t = 13)]
    zoom: u8,

    /// Skip the map thumbnail
    #[arg(long)]
    no_map: bool,

    /// Use OSM Nominatim for street-level address detail (needs network)
    #[arg(long)]
    nominatim: bool,

    /// Save the untouched photo plus the overlay as its own layer
    #[arg(long)]
    separate_overlay: bool,

    /// Open the result with the system handler after saving
    #[arg(long)]
    share: bool,

    /// Output directory (default: ~/Pictures/GeoStamp)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Mirror the capture as the front camera would
    #[arg(long)]
    front: bool,

    /// Keep the torch on during capture
    #[arg(long)]
    torch: bool,
}

async fn run(cli: Cli) -> Result<(), GeoStampError> {
    let location_provider: Box<dyn LocationProvider> = match (cli.lat, cli.lon, cli.from_exif) {
        (Some(lat), Some(lon), _) => Box::new(FixedProvider::new(lat, lon)),
        _ => Box::new(ExifProvider::new(&cli.photo)?),
    };

    let geocoder: Option<Box<dyn ReverseGeocode>> = if cli.nominatim {
        Some(Box::new(NominatimGeocoder::new()?))
    } else {
        None
    };

    let app = GeoStamp::builder()
        .location_provider(location_provider)
        .camera(Box::new(FileCamera::new(&cli.photo)))
        .map_zoom(cli.zoom)
        .include_map(!cli.no_map)
        .overlay_mode(if cli.separate_overlay {
            OverlayMode::Separate
        } else {
            OverlayMode::Flatten
        })
        .maybe_geocoder(geocoder)
        .maybe_output_dir(cli.output)
        .build()?;

    let options = CaptureOptions {
        quality: 1.0,
        format: CaptureFormat::Jpeg,
        facing: if cli.front {
            CameraFacing::Front
        } else {
            CameraFacing::Back
        },
        flash: if cli.torch {
            FlashMode::Torch
        } else {
            FlashMode::Off
        },
    };

    let cancel = new_cancel_token();
    let outcome = app.run(&options, &cancel, cli.share).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=geostamp=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

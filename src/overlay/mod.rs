//! Composite rendering: the data panel and map thumbnail as one SVG
//! subtree, flattened onto the photo.
mod error;
mod flatten;
mod svg;

pub use error::OverlayError;
pub use flatten::{OverlayMode, StampedImage, compose, map_size_for, rasterize_svg};
pub use svg::{data_lines, escape_xml, overlay_scale, overlay_svg};

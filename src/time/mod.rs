//! Module for formatting the capture date and time shown on the overlay.
mod format;
mod stamp;
pub use format::to_12_hour;
pub use stamp::{CapturedAt, captured_at};

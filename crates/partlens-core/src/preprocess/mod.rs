//! Image preprocessing before upload.
//!
//! - **file**: in-memory input files and media-type detection
//! - **resize**: bounded downscale and JPEG re-encode

pub mod file;
pub mod resize;

pub use file::{sniff_media_type, ImageFile};
pub use resize::{fit_dimensions, EncodedBlob, Preprocessor};

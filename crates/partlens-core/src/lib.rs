//! Partlens Core - photo preprocessing, detection upload and result rendering.
//!
//! Partlens turns a photo of a mechanical part into a catalog lookup:
//!
//! ```text
//! Image → Validate → Downscale + JPEG → POST /upload → DetectionResult → RenderedView
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use partlens_core::{Config, ImageFile, ScanOutcome, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> partlens_core::Result<()> {
//!     let config = Config::load()?;
//!     let scanner = Scanner::from_config(&config);
//!
//!     let file = ImageFile::from_path("./part.jpg".as_ref())?;
//!     if let ScanOutcome::Rendered(view) = scanner.scan(file).await {
//!         println!("{}", view.description_text());
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod error;
pub mod preprocess;
pub mod render;
pub mod scanner;
pub mod types;
pub mod upload;
pub mod view;

// Re-exports for convenient access
pub use catalog::{normalize_key, PieceCatalog};
pub use config::{Config, Locale, ResizeConfig};
pub use error::{ConfigError, PartlensError, PreprocessError, Result, UploadError};
pub use preprocess::{EncodedBlob, ImageFile, Preprocessor};
pub use render::{ImageView, LineKind, RenderedView, Renderer, Segment, Tone};
pub use scanner::{ScanOutcome, Scanner};
pub use types::{DetectionResult, PartInfo};
pub use upload::{DetectionBackend, HttpBackend};
pub use view::{HtmlView, Notice, ViewPorts};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

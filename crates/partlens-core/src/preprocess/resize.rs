//! Bounded downscale and JPEG re-encode.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, GenericImageView, ImageEncoder};
use std::io::Cursor;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::{LimitsConfig, ResizeConfig};
use crate::error::PreprocessError;

use super::file::ImageFile;

/// JPEG bytes ready for upload.
#[derive(Debug, Clone)]
pub struct EncodedBlob {
    /// Encoded JPEG bytes
    pub bytes: Vec<u8>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Width of the decoded source
    pub source_width: u32,
    /// Height of the decoded source
    pub source_height: u32,
}

impl EncodedBlob {
    /// Media type of every blob this module produces.
    pub const MEDIA_TYPE: &'static str = "image/jpeg";

    /// Whether the source had to be scaled down.
    pub fn was_scaled(&self) -> bool {
        (self.width, self.height) != (self.source_width, self.source_height)
    }
}

/// Compute output dimensions that fit within `max_width` x `max_height`.
///
/// Images already inside the box are returned unchanged; larger ones are
/// scaled by `min(max_w / w, max_h / h)` and rounded, never below 1px. A zero
/// maximum saturates to 1px.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let ratio = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let scaled =
        |side: u32, max: u32| ((side as f64 * ratio).round() as u32).clamp(1, max.max(1));
    (scaled(width, max_width), scaled(height, max_height))
}

/// Turns arbitrary image files into bounded JPEG blobs.
pub struct Preprocessor {
    limits: LimitsConfig,
}

impl Preprocessor {
    /// Create a new preprocessor with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Validate, decode, downscale and re-encode `file` as JPEG.
    ///
    /// Decoding and encoding run on the blocking pool so the caller's task
    /// only suspends.
    pub async fn resize(
        &self,
        file: ImageFile,
        config: &ResizeConfig,
    ) -> Result<EncodedBlob, PreprocessError> {
        file.check(self.limits.max_file_size_mb)?;

        let config = *config;
        let timeout_ms = self.limits.decode_timeout_ms;
        let work = tokio::task::spawn_blocking(move || Self::resize_sync(&file.bytes, &config));

        match timeout(Duration::from_millis(timeout_ms), work).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Ok(Err(e)) => Err(PreprocessError::Encode {
                message: format!("Preprocessing task cancelled: {}", e),
            }),
            Err(_) => Err(PreprocessError::Timeout { timeout_ms }),
        }
    }

    /// Synchronous decode + scale + encode (runs in spawn_blocking).
    pub fn resize_sync(bytes: &[u8], config: &ResizeConfig) -> Result<EncodedBlob, PreprocessError> {
        if config.max_width == 0 || config.max_height == 0 {
            return Err(PreprocessError::InvalidBounds {
                max_width: config.max_width,
                max_height: config.max_height,
            });
        }

        let image = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PreprocessError::Decode {
                message: format!("Cannot detect image format: {}", e),
            })?
            .decode()
            .map_err(|e| PreprocessError::Decode {
                message: e.to_string(),
            })?;

        let (source_width, source_height) = image.dimensions();
        let (width, height) =
            fit_dimensions(source_width, source_height, config.max_width, config.max_height);
        tracing::debug!(
            "Resize {}x{} -> {}x{} (quality {})",
            source_width,
            source_height,
            width,
            height,
            config.jpeg_quality()
        );

        // JPEG has no alpha channel
        let rgb = image.to_rgb8();
        let surface = if (width, height) == (source_width, source_height) {
            rgb
        } else {
            image::imageops::resize(&rgb, width, height, FilterType::Triangle)
        };

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality())
            .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| PreprocessError::Encode {
                message: e.to_string(),
            })?;

        if buffer.is_empty() {
            return Err(PreprocessError::Encode {
                message: "Encoder produced no output".to_string(),
            });
        }

        Ok(EncodedBlob {
            bytes: buffer,
            width,
            height,
            source_width,
            source_height,
        })
    }
}

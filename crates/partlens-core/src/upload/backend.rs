//! Detection backend trait.

use async_trait::async_trait;

use crate::error::UploadError;
use crate::preprocess::EncodedBlob;
use crate::types::DetectionResult;

/// Anything that can turn an uploaded JPEG into a detection result.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the scanner holds a `Box<dyn DetectionBackend>`).
#[async_trait]
pub trait DetectionBackend: Send + Sync {
    /// Backend name for logging (e.g., "http").
    fn name(&self) -> &str;

    /// Send the blob and return the parsed detection.
    async fn detect(&self, blob: &EncodedBlob) -> Result<DetectionResult, UploadError>;
}

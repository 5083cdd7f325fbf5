//! Input files and media-type detection.

use std::path::Path;

use crate::error::{PartlensError, PreprocessError};

/// An image file picked or dropped by the user, held in memory.
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. "image/png"
    pub media_type: String,
}

impl ImageFile {
    /// Wrap bytes with an explicitly declared media type.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }

    /// Wrap bytes and derive the media type from their content.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let media_type = sniff_media_type(&bytes)
            .unwrap_or("application/octet-stream")
            .to_string();
        Self { bytes, media_type }
    }

    /// Read a file from disk.
    ///
    /// The media type comes from the file's magic bytes, falling back to its
    /// extension when the content is not recognized.
    pub fn from_path(path: &Path) -> Result<Self, PartlensError> {
        let bytes = std::fs::read(path)?;
        let media_type = sniff_media_type(&bytes)
            .or_else(|| media_type_from_extension(path))
            .unwrap_or("application/octet-stream")
            .to_string();
        tracing::debug!("Read {:?} ({} bytes, {})", path, bytes.len(), media_type);
        Ok(Self { bytes, media_type })
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// Reject non-image input and files over the size cap.
    pub fn check(&self, max_file_size_mb: u64) -> Result<(), PreprocessError> {
        if !self.is_image() {
            return Err(PreprocessError::InvalidInput {
                media_type: self.media_type.clone(),
            });
        }
        let max_bytes = max_file_size_mb.saturating_mul(1024 * 1024);
        let len = self.bytes.len() as u64;
        if len > max_bytes {
            return Err(PreprocessError::FileTooLarge {
                size_mb: len / (1024 * 1024),
                max_mb: max_file_size_mb,
            });
        }
        Ok(())
    }
}

/// Detect the media type from the leading bytes of an image.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }

    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some("image/png");
    }
    if bytes.starts_with(b"GIF8") {
        return Some("image/gif");
    }
    if bytes.starts_with(b"RIFF") && bytes.len() >= 12 && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"BM") {
        return Some("image/bmp");
    }
    // TIFF: II (little-endian) or MM (big-endian) followed by version 42
    if bytes.starts_with(&[b'I', b'I', 0x2A, 0x00]) || bytes.starts_with(&[b'M', b'M', 0x00, 0x2A])
    {
        return Some("image/tiff");
    }
    // HEIC/HEIF/AVIF: ftyp box at offset 4
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return match &bytes[8..12] {
            b"avif" | b"avis" => Some("image/avif"),
            _ => Some("image/heic"),
        };
    }

    None
}

fn media_type_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "avif" => Some("image/avif"),
        "heic" | "heif" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(
            sniff_media_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_sniff_png() {
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(sniff_media_type(&header), Some("image/png"));
    }

    #[test]
    fn test_sniff_webp_requires_tag() {
        let webp = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P'];
        assert_eq!(sniff_media_type(&webp), Some("image/webp"));

        let wav = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'A', b'V', b'E'];
        assert_eq!(sniff_media_type(&wav), None);
    }

    #[test]
    fn test_sniff_tiff_requires_version() {
        assert_eq!(
            sniff_media_type(&[b'I', b'I', 0x2A, 0x00]),
            Some("image/tiff")
        );
        assert_eq!(sniff_media_type(&[b'I', b'I', 0x00, 0x00]), None);
    }

    #[test]
    fn test_sniff_rejects_text_and_short_input() {
        assert_eq!(sniff_media_type(b"hello world"), None);
        assert_eq!(sniff_media_type(&[0xFF, 0xD8]), None);
    }

    #[test]
    fn test_from_path_falls_back_to_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.PNG");
        std::fs::write(&path, b"not really a png").unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.media_type, "image/png");
    }

    #[test]
    fn test_from_path_unknown_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"inventory notes").unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert!(!file.is_image());
        assert!(matches!(
            file.check(16),
            Err(PreprocessError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_check_rejects_oversized_file() {
        let file = ImageFile::new(vec![0u8; 2 * 1024 * 1024 + 1], "image/jpeg");
        let err = file.check(2).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::FileTooLarge {
                size_mb: 2,
                max_mb: 2
            }
        ));
    }
}

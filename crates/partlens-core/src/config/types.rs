//! Sub-configuration structs with defaults matching the detection backend.

use serde::{Deserialize, Serialize};

/// Detection backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Base URL of the detection service
    pub base_url: String,

    /// Upload route, joined onto `base_url`
    pub path: String,

    /// Multipart field carrying the photo
    pub field_name: String,

    /// File name sent with the multipart part
    pub file_name: String,

    /// Per-request timeout in milliseconds (unset = wait for the transport)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5052".to_string(),
            path: "/upload".to_string(),
            field_name: "photo".to_string(),
            file_name: "photo.jpg".to_string(),
            timeout_ms: None,
        }
    }
}

impl UploadConfig {
    /// Full upload URL (`base_url` + `path`, exactly one slash between them).
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Client-side downscale settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Maximum output width in pixels
    pub max_width: u32,

    /// Maximum output height in pixels
    pub max_height: u32,

    /// JPEG quality in (0, 1]
    pub quality: f32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 800,
            quality: 0.7,
        }
    }
}

impl ResizeConfig {
    /// Quality clamped into (0, 1].
    ///
    /// Non-finite or non-positive values fall back to the default quality.
    pub fn clamped_quality(&self) -> f32 {
        if !self.quality.is_finite() || self.quality <= 0.0 {
            return Self::default().quality;
        }
        self.quality.min(1.0)
    }

    /// Quality on the 1..=100 scale the JPEG encoder expects.
    pub fn jpeg_quality(&self) -> u8 {
        (self.clamped_quality() * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Resource limits applied before and during preprocessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum input file size in megabytes
    pub max_file_size_mb: u64,

    /// Decode + encode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 16,
            decode_timeout_ms: 5000,
        }
    }
}

/// Label language for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-br", alias = "pt_br", alias = "pt")]
    PtBr,
}

/// Result rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Label language
    pub locale: Locale,

    /// Relative path prefix the backend uses for served assets
    pub static_prefix: String,

    /// Query parameter name for the cache-buster
    pub cache_buster_param: String,

    /// How long error notices stay up, in milliseconds
    pub notice_ttl_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            static_prefix: "static/".to_string(),
            cache_buster_param: "cb".to_string(),
            notice_ttl_ms: 5000,
        }
    }
}

/// One user-supplied catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntryConfig {
    /// Piece key as the detector names it (normalized on load)
    pub key: String,
    /// Inventory code, e.g. "02RV-0512"
    pub code: String,
    /// Human-readable part name
    pub name: String,
}

/// Extra catalog entries layered over the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub entries: Vec<CatalogEntryConfig>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty, json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_single_slash() {
        let mut config = UploadConfig::default();
        assert_eq!(config.endpoint(), "http://localhost:5052/upload");

        config.base_url = "http://parts.local/".to_string();
        config.path = "upload".to_string();
        assert_eq!(config.endpoint(), "http://parts.local/upload");
    }

    #[test]
    fn test_quality_clamped_into_unit_interval() {
        let mut config = ResizeConfig::default();
        assert_eq!(config.jpeg_quality(), 70);

        config.quality = 3.0;
        assert_eq!(config.clamped_quality(), 1.0);
        assert_eq!(config.jpeg_quality(), 100);

        config.quality = 0.0;
        assert_eq!(config.clamped_quality(), 0.7);

        config.quality = f32::NAN;
        assert_eq!(config.clamped_quality(), 0.7);

        config.quality = 0.001;
        assert_eq!(config.jpeg_quality(), 1);
    }

    #[test]
    fn test_locale_parses_aliases() {
        #[derive(Deserialize)]
        struct Wrap {
            locale: Locale,
        }
        let w: Wrap = toml::from_str("locale = \"pt-br\"").unwrap();
        assert_eq!(w.locale, Locale::PtBr);
        let w: Wrap = toml::from_str("locale = \"en\"").unwrap();
        assert_eq!(w.locale, Locale::En);
    }
}

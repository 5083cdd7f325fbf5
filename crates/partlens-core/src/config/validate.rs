//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.upload.base_url.starts_with("http://")
            || self.upload.base_url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationError(
                "upload.base_url must start with http:// or https://".into(),
            ));
        }
        if self.upload.field_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "upload.field_name must not be empty".into(),
            ));
        }
        if self.upload.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "upload.timeout_ms must be > 0 when set".into(),
            ));
        }
        if self.resize.max_width == 0 {
            return Err(ConfigError::ValidationError(
                "resize.max_width must be > 0".into(),
            ));
        }
        if self.resize.max_height == 0 {
            return Err(ConfigError::ValidationError(
                "resize.max_height must be > 0".into(),
            ));
        }
        if !(self.resize.quality > 0.0 && self.resize.quality <= 1.0) {
            return Err(ConfigError::ValidationError(
                "resize.quality must be in (0.0, 1.0]".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.render.cache_buster_param.is_empty() {
            return Err(ConfigError::ValidationError(
                "render.cache_buster_param must not be empty".into(),
            ));
        }
        if let Some(entry) = self.catalog.entries.iter().find(|e| e.key.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "catalog entry with code '{}' has an empty key",
                entry.code
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogEntryConfig;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut config = Config::default();
        config.resize.max_height = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_height"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let mut config = Config::default();
        config.resize.quality = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("resize.quality"));

        config.resize.quality = 0.0;
        assert!(config.validate().is_err());

        config.resize.quality = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.upload.base_url = "ftp://parts".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.upload.timeout_ms = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));

        config.upload.timeout_ms = None;
        config.limits.decode_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("decode_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_blank_catalog_key() {
        let mut config = Config::default();
        config.catalog.entries.push(CatalogEntryConfig {
            key: "  ".to_string(),
            code: "02RV-0001".to_string(),
            name: "X".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("02RV-0001"));
    }
}

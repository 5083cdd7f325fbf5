//! Classification of `result_image` values into displayable sources.

use crate::config::RenderConfig;

/// Header used when the backend sends bare base64.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// What kind of reference the backend sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Already a `data:` URI
    DataUri(&'a str),
    /// `http://`, `https://` or root-relative URL
    Url(&'a str),
    /// Relative path under the backend's static prefix
    StaticAsset(&'a str),
    /// Anything else, assumed to be base64 JPEG content
    RawBase64(&'a str),
}

/// Turns backend image references into `src` values.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    static_prefix: String,
    cache_buster_param: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl ImageResolver {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            static_prefix: config.static_prefix.clone(),
            cache_buster_param: config.cache_buster_param.clone(),
        }
    }

    pub fn classify<'a>(&self, raw: &'a str) -> ImageSource<'a> {
        if raw.starts_with("data:") {
            ImageSource::DataUri(raw)
        } else if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with('/')
        {
            ImageSource::Url(raw)
        } else if !self.static_prefix.is_empty() && raw.starts_with(&self.static_prefix) {
            ImageSource::StaticAsset(raw)
        } else {
            ImageSource::RawBase64(raw)
        }
    }

    /// Resolve `raw` to an image `src`.
    ///
    /// URL forms get `{param}={now_ms}` appended so an overwritten result
    /// file is fetched again; data URIs are left alone.
    pub fn resolve(&self, raw: &str, now_ms: u64) -> String {
        match self.classify(raw) {
            ImageSource::DataUri(uri) => uri.to_string(),
            ImageSource::RawBase64(data) => format!("{JPEG_DATA_URI_PREFIX}{data}"),
            ImageSource::Url(url) => self.bust(url, now_ms),
            ImageSource::StaticAsset(path) => self.bust(&format!("/{path}"), now_ms),
        }
    }

    fn bust(&self, url: &str, now_ms: u64) -> String {
        let sep = if url.contains('?') { '&' } else { '?' };
        format!("{url}{sep}{}={now_ms}", self.cache_buster_param)
    }
}

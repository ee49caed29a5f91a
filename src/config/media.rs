//! Media configuration for product images.
//!
//! Product rows store image paths relative to the media root. The media base
//! URL is prepended when building links, see [`crate::core::media`].

/// Default base URL for product images
pub const DEFAULT_MEDIA_URL: &str = "/images/";

/// Where product images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    /// URL prefix joined with the stored image path
    pub base_url: String,
}

impl MediaConfig {
    /// Creates a media config with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `MEDIA_URL` from the environment, falling back to [`DEFAULT_MEDIA_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string()))
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_URL)
    }
}

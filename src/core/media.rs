//! Product image URL resolution.
//!
//! Images are stored as paths relative to the media root. Resolution joins
//! the configured media base URL with that path, and distinguishes a product
//! without an image (`Ok(None)`) from a stored path that cannot be served.

use crate::{
    config::media::MediaConfig,
    entities::product,
    errors::{Error, Result},
};
use tracing::warn;

fn resolution_error(path: &str, reason: &str) -> Error {
    Error::ImageResolution {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Joins a media base URL and a relative image path.
///
/// # Errors
/// Returns [`Error::ImageResolution`] if the base URL is blank, or the path is
/// blank, absolute, or walks out of the media root with `..`.
pub fn resolve_image_path(media: &MediaConfig, path: &str) -> Result<String> {
    let base = media.base_url.trim();
    if base.is_empty() {
        return Err(resolution_error(path, "media base URL is not configured"));
    }

    let relative = path.trim();
    if relative.is_empty() {
        return Err(resolution_error(path, "image path is blank"));
    }
    if relative.starts_with('/') || relative.starts_with('\\') || relative.contains("://") {
        return Err(resolution_error(path, "image path must be relative"));
    }
    if relative.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(resolution_error(path, "image path leaves the media root"));
    }

    Ok(format!("{}/{}", base.trim_end_matches('/'), relative))
}

/// The product's image URL, `None` if the product has no image.
///
/// # Errors
/// Returns [`Error::ImageResolution`] if the stored path cannot be resolved.
pub fn image_url(product: &product::Model, media: &MediaConfig) -> Result<Option<String>> {
    product
        .image
        .as_deref()
        .map(|path| resolve_image_path(media, path))
        .transpose()
}

/// The product's image URL, or an empty string when there is none or it cannot be resolved.
///
/// Intended for display code where a broken image should simply not render.
#[must_use]
pub fn image_url_or_empty(product: &product::Model, media: &MediaConfig) -> String {
    match image_url(product, media) {
        Ok(url) => url.unwrap_or_default(),
        Err(e) => {
            warn!("Product {} has an unusable image: {e}", product.id);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn product_with_image(image: Option<&str>) -> product::Model {
        product::Model {
            id: 1,
            name: "Poster".to_string(),
            price: 12.0,
            digital: false,
            image: image.map(ToString::to_string),
        }
    }

    #[test]
    fn test_no_image_is_none() {
        let product = product_with_image(None);
        assert_eq!(image_url(&product, &MediaConfig::default()).unwrap(), None);
        assert_eq!(image_url_or_empty(&product, &MediaConfig::default()), "");
    }

    #[test]
    fn test_image_joined_with_base_url() {
        let product = product_with_image(Some("posters/space.png"));

        let url = image_url(&product, &MediaConfig::default()).unwrap();
        assert_eq!(url.as_deref(), Some("/images/posters/space.png"));

        let cdn = MediaConfig::new("https://cdn.example.com/media");
        assert_eq!(
            image_url_or_empty(&product, &cdn),
            "https://cdn.example.com/media/posters/space.png"
        );
    }

    #[test]
    fn test_unresolvable_images() {
        let media = MediaConfig::default();
        for bad in ["../secrets.txt", "a/../../b.png", "/etc/passwd", "   ", "http://evil/x.png"] {
            let product = product_with_image(Some(bad));
            assert!(
                matches!(image_url(&product, &media), Err(Error::ImageResolution { .. })),
                "{bad} should not resolve"
            );
            assert_eq!(image_url_or_empty(&product, &media), "");
        }
    }

    #[test]
    fn test_blank_base_url() {
        let product = product_with_image(Some("a.png"));
        let result = image_url(&product, &MediaConfig::new(""));
        assert!(matches!(result, Err(Error::ImageResolution { .. })));
    }
}

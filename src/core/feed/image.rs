//! Image URL size limiting

use url::Url;

/// Default maximum image width in pixels
pub const DEFAULT_IMAGE_MAX_WIDTH: u32 = 1024;

/// Default maximum image height in pixels
pub const DEFAULT_IMAGE_MAX_HEIGHT: u32 = 1024;

/// Maximum dimensions for exported image URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSizeLimit {
    pub width: u32,
    pub height: u32,
}

impl ImageSizeLimit {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Apply the limit to an image URL
    pub fn apply(&self, url: &str) -> String {
        limit_size_in_image_url(url, self.width, self.height)
    }
}

impl Default for ImageSizeLimit {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_MAX_WIDTH, DEFAULT_IMAGE_MAX_HEIGHT)
    }
}

/// Set `width` and `height` query parameters on an image URL
///
/// Existing `width`/`height` parameters are replaced, other parameters are
/// kept in order. A string that does not parse as an absolute URL is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use catalog_feed::core::feed::limit_size_in_image_url;
///
/// let url = limit_size_in_image_url("https://example.com/content/images/product/1.jpg", 1024, 1024);
/// assert_eq!(url, "https://example.com/content/images/product/1.jpg?width=1024&height=1024");
/// ```
pub fn limit_size_in_image_url(url: &str, width: u32, height: u32) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        tracing::debug!(url = %url, "Image URL is not absolute, size limit not applied");
        return url.to_string();
    };

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "width" && key != "height")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        for (key, value) in &kept {
            query.append_pair(key, value);
        }
        query.append_pair("width", &width.to_string());
        query.append_pair("height", &height.to_string());
    }

    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_adds_dimensions() {
        assert_eq!(
            limit_size_in_image_url("https://example.com/a.jpg", 640, 480),
            "https://example.com/a.jpg?width=640&height=480"
        );
    }

    #[test]
    fn test_limit_replaces_existing_dimensions() {
        assert_eq!(
            limit_size_in_image_url("https://example.com/a.jpg?v=2&width=5000", 1024, 1024),
            "https://example.com/a.jpg?v=2&width=1024&height=1024"
        );
    }

    #[test]
    fn test_relative_url_unchanged() {
        assert_eq!(limit_size_in_image_url("/a.jpg", 10, 10), "/a.jpg");
    }

    #[test]
    fn test_default_limit() {
        let limit = ImageSizeLimit::default();
        assert_eq!(limit.width, 1024);
        assert_eq!(limit.height, 1024);
    }
}

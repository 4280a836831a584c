//! Result type alias for the feed exporter

use super::errors::FeedError;

/// Result type alias for feed operations
///
/// # Examples
///
/// ```
/// use catalog_feed::domain::result::Result;
/// use catalog_feed::domain::errors::FeedError;
///
/// fn failing_function() -> Result<()> {
///     Err(FeedError::Validation("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, FeedError>;

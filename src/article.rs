//! Extraction output.
//!
//! This module defines [`ExtractionResult`], the record produced once per
//! extraction call.
//!
//! ## Example
//!
//! ```rust
//! use readability_extract::extract;
//!
//! let html = r#"<html><head><title>My Article</title></head><body><p>Content...</p></body></html>"#;
//! let result = extract(html, "https://example.com/news/").unwrap();
//!
//! println!("Title: {}", result.title);
//! if result.has_content() {
//!     println!("HTML: {}", result.content);
//!     println!("Text: {}", result.summary);
//! }
//! for image in &result.image_list {
//!     println!("Image: {}", image);
//! }
//! ```

use serde::{Deserialize, Serialize};

/// The title, article body and resources extracted from one document.
///
/// When no article could be located the result is still returned: `content`
/// and `summary` are empty while `title` and `cover` carry whatever the
/// document head provided.
///
/// ## Serialization
///
/// ```rust
/// use readability_extract::extract;
///
/// let result = extract("<html><title>T</title></html>", "").unwrap();
/// let json = serde_json::to_string_pretty(&result).unwrap();
/// assert!(json.contains("\"title\": \"T\""));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Text of the `<title>` element, trimmed. Falls back to `og:title`.
    pub title: String,

    /// Cleaned HTML of the article container.
    ///
    /// Relative URLs are absolute and `<br>` runs are collapsed to one `<br />`.
    pub content: String,

    /// Plain text of the article paragraphs, one paragraph per line.
    pub summary: String,

    /// Absolute URL of the `og:image` / `itemprop="image"` cover, or empty.
    pub cover: String,

    /// Absolute URLs of the article images in document order. Duplicates are kept.
    pub image_list: Vec<String>,
}

impl ExtractionResult {
    /// Whether an article body was found.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

//! Main Readability struct and parse implementation.
//!
//! This module contains the primary [`Readability`] struct which runs the
//! extraction pipeline over one document.
//!
//! ## Example
//!
//! ```rust,no_run
//! use readability_extract::Readability;
//!
//! let html = std::fs::read_to_string("article.html").unwrap();
//! let url = "https://example.com/article";
//!
//! let readability = Readability::new(&html, Some(url), None)?;
//! let article = readability.parse()?;
//!
//! println!("Title: {}", article.title);
//! println!("Images: {:?}", article.image_list);
//! std::fs::write("output.html", &article.content)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    article::ExtractionResult,
    cleaner,
    content_extractor::grab_article,
    dom::Document,
    error::{ExtractError, Result},
    metadata::{get_cover, get_title},
    options::ExtractorOptions,
    post_processor::{fix_relative_uris, get_content, get_summary},
    utils::BaseUrl,
};
use tracing::debug;

/// The main Readability parser.
///
/// Construct it with [`Readability::new()`], then call
/// [`parse()`](Readability::parse) to obtain an [`ExtractionResult`]. The
/// instance owns its document, so `parse` consumes it.
///
/// ## Example
///
/// ```rust
/// use readability_extract::Readability;
///
/// let body = "Plenty of words in this paragraph, enough to be scored as prose. ".repeat(3);
/// let html = format!(
///     "<html><head><title>Article Title</title></head><body><div><p>{body}</p></div></body></html>"
/// );
///
/// let article = Readability::new(&html, None, None)?.parse()?;
/// assert_eq!(article.title, "Article Title");
/// assert!(article.has_content());
/// # Ok::<(), readability_extract::ExtractError>(())
/// ```
///
/// ## With Custom Options
///
/// ```rust,no_run
/// use readability_extract::{ExtractorOptions, Readability};
///
/// let html = "<html>...</html>";
///
/// let options = ExtractorOptions::builder()
///     .min_paragraph_length(40)
///     .max_elems_to_parse(10_000)
///     .build();
///
/// let readability = Readability::new(html, None, Some(options))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Readability {
    document: Document,

    /// Base URL for resolving relative links
    base: BaseUrl,

    options: ExtractorOptions,
}

impl Readability {
    /// Parses `html` and prepares it for extraction.
    ///
    /// # Arguments
    /// * `html` - The HTML content to parse
    /// * `url` - Optional page URL for resolving relative links; an unusable
    ///   value falls back to `http` with an empty host
    /// * `options` - Optional configuration options
    ///
    /// # Errors
    /// [`ExtractError::EmptyDocument`] for blank input,
    /// [`ExtractError::MaxElementsExceeded`] when the document is larger than
    /// [`ExtractorOptions::max_elems_to_parse`] allows.
    pub fn new(html: &str, url: Option<&str>, options: Option<ExtractorOptions>) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }

        let options = options.unwrap_or_default();
        let document = Document::parse(html)?;

        if options.max_elems_to_parse > 0 {
            let count = document.descendant_elements(document.root()).len();
            if count > options.max_elems_to_parse {
                return Err(ExtractError::MaxElementsExceeded(count));
            }
        }

        Ok(Self {
            document,
            base: BaseUrl::parse(url),
            options,
        })
    }

    /// Runs the extraction.
    ///
    /// A page without any qualifying paragraph is not an error: the result
    /// keeps the title and cover with empty content and summary.
    pub fn parse(mut self) -> Result<ExtractionResult> {
        let doc = &mut self.document;

        let mut result = ExtractionResult {
            title: get_title(doc),
            cover: get_cover(doc, &self.base),
            ..Default::default()
        };

        cleaner::prep_document(doc, &self.options);

        let Some(article) = grab_article(doc, &self.options) else {
            debug!(title = %result.title, "no article candidate found");
            return Ok(result);
        };

        cleaner::clean_article(doc, &article, &self.options);
        result.image_list = fix_relative_uris(doc, article.root, &self.base);
        result.content = get_content(doc, article.root)?;
        result.summary = get_summary(doc, article.root);

        debug!(
            content_len = result.content.len(),
            images = result.image_list.len(),
            "extracted article"
        );
        Ok(result)
    }
}

/// Extracts the article from `html` with default options.
///
/// `base_url` is the page address used to absolutize links and image sources.
pub fn extract(html: &str, base_url: &str) -> Result<ExtractionResult> {
    Readability::new(html, Some(base_url), None)?.parse()
}

//! # readability-extract
//!
//! Heuristic reader-mode extraction: pull the main article out of an arbitrary
//! HTML page.
//!
//! ## Overview
//!
//! Given a page and its URL, the extractor returns the page title, the article
//! body as a cleaned HTML fragment, a plain-text summary, a cover image URL and
//! the list of images found in the article. Navigation, ads, sidebars, scripts
//! and similar boilerplate are discarded.
//!
//! ## Key Features
//!
//! - **Content Extraction**: scores paragraph containers and keeps the best one
//!   with its related siblings
//! - **Cleaning**: drops non-video embeds, lone headings, link-heavy lists, forms and tables
//! - **URL Resolution**: rewrites image, link and embed URLs to absolute form
//! - **Cover Detection**: reads `og:image` and `itemprop="image"` meta tags
//! - **Customizable Options**: paragraph threshold, video allowlist, element limit
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use readability_extract::extract;
//!
//! let html = r#"<html><body><article><h1>Title</h1><p>Content...</p></article></body></html>"#;
//!
//! let article = extract(html, "https://example.com/article").unwrap();
//! println!("Title: {}", article.title);
//! println!("Content: {}", article.content);
//! println!("Cover: {}", article.cover);
//! ```
//!
//! ## Advanced Usage
//!
//! ### Custom Options
//!
//! ```rust,no_run
//! use readability_extract::{ExtractorOptions, Readability};
//! use regex::Regex;
//!
//! let html = "<html>...</html>";
//!
//! let options = ExtractorOptions::builder()
//!     .min_paragraph_length(40)
//!     .allowed_video_regex(Regex::new(r"(?i)//(www\.)?example\.tv/").unwrap())
//!     .build();
//!
//! let readability = Readability::new(html, Some("https://example.com/"), Some(options)).unwrap();
//! let article = readability.parse().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use readability_extract::{extract, ExtractError};
//!
//! match extract("", "https://example.com/") {
//!     Ok(article) if article.has_content() => println!("Success!"),
//!     Ok(_) => println!("No article found"),
//!     Err(ExtractError::EmptyDocument) => eprintln!("Nothing to parse"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ## Algorithm
//!
//! Metadata is read from the untouched document first. Scripts, styles,
//! comments and elements whose `id` or `class` look like boilerplate are then
//! removed, and `<br>` runs and loose `<div>`s are normalized into paragraphs.
//! Each paragraph long enough to be prose adds to the score of its parent and
//! grandparent. The highest scorer, discounted by its link density, becomes the
//! article together with those siblings that score well or read like prose.
//! The article is cleaned, its URLs are made absolute, and it is serialized.

mod article;
mod cleaner;
mod constants;
mod content_extractor;
mod dom;
mod dom_utils;
mod error;
mod metadata;
mod options;
mod post_processor;
mod readability;
mod scoring;
mod utils;

// Public exports
pub use article::ExtractionResult;
pub use error::{ExtractError, Result};
pub use options::{ExtractorOptions, ExtractorOptionsBuilder};
pub use readability::{extract, Readability};

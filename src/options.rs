//! Configuration options for article extraction.
//!
//! This module provides [`ExtractorOptions`] and [`ExtractorOptionsBuilder`]
//! for configuring the behavior of the extraction pipeline.
//!
//! ## Example
//!
//! ```rust
//! use readability_extract::{ExtractorOptions, Readability};
//!
//! let html = "<html><body><article><p>Content...</p></article></body></html>";
//!
//! // Using default options
//! let readability = Readability::new(html, None, None).unwrap();
//!
//! // Using builder for custom options
//! let options = ExtractorOptions::builder()
//!     .min_paragraph_length(40)
//!     .strip_presentational_attributes(false)
//!     .build();
//!
//! let readability = Readability::new(html, None, Some(options)).unwrap();
//! ```

use crate::constants::DEFAULT_MIN_PARAGRAPH_LENGTH;
use regex::Regex;

/// Configuration options for the extractor.
///
/// The defaults reproduce the tuned heuristics exactly; changing them trades
/// fidelity for recall or precision on particular sites.
///
/// ## Creating Options
///
/// ### Using Default
///
/// ```rust
/// use readability_extract::ExtractorOptions;
///
/// let options = ExtractorOptions::default();
/// ```
///
/// ### Using Builder
///
/// ```rust
/// use readability_extract::ExtractorOptions;
///
/// let options = ExtractorOptions::builder()
///     .max_elems_to_parse(50_000)
///     .strip_unlikely_candidates(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    /// Maximum number of elements to parse.
    ///
    /// Documents with more elements are rejected with
    /// [`ExtractError::MaxElementsExceeded`](crate::ExtractError::MaxElementsExceeded)
    /// before any processing happens. Set to 0 to disable the limit.
    ///
    /// Default: `0` (no limit)
    pub max_elems_to_parse: usize,

    /// Minimum text length, in characters, for a `<p>` to contribute to
    /// candidate scoring. Shorter paragraphs are ignored entirely.
    ///
    /// Default: `25`
    pub min_paragraph_length: usize,

    /// Remove elements whose `id`/`class` looks like boilerplate (comments,
    /// sidebars, menus, ...) during preprocessing.
    ///
    /// `<input>`, `<time>` and `<button>` are removed regardless.
    ///
    /// Default: `true`
    pub strip_unlikely_candidates: bool,

    /// Strip `width`, `height`, `border` and inline mouse handlers from the
    /// extracted article.
    ///
    /// Default: `true`
    pub strip_presentational_attributes: bool,

    /// Custom regex for allowed video URLs.
    ///
    /// Replaces the built-in video host allowlist used to keep `<iframe>`,
    /// `<object>` and `<embed>` elements.
    ///
    /// Default: `None` (uses built-in regexes)
    ///
    /// ## Example
    ///
    /// ```rust
    /// use readability_extract::ExtractorOptions;
    /// use regex::Regex;
    ///
    /// let video_regex = Regex::new(r"(?i)myvideoplatform\.com").unwrap();
    /// let options = ExtractorOptions::builder()
    ///     .allowed_video_regex(video_regex)
    ///     .build();
    /// ```
    pub allowed_video_regex: Option<Regex>,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            max_elems_to_parse: 0,
            min_paragraph_length: DEFAULT_MIN_PARAGRAPH_LENGTH,
            strip_unlikely_candidates: true,
            strip_presentational_attributes: true,
            allowed_video_regex: None,
        }
    }
}

impl ExtractorOptions {
    /// Creates a new builder for ExtractorOptions
    pub fn builder() -> ExtractorOptionsBuilder {
        ExtractorOptionsBuilder::default()
    }
}

/// Builder for [`ExtractorOptions`].
#[derive(Default)]
pub struct ExtractorOptionsBuilder {
    max_elems_to_parse: Option<usize>,
    min_paragraph_length: Option<usize>,
    strip_unlikely_candidates: Option<bool>,
    strip_presentational_attributes: Option<bool>,
    allowed_video_regex: Option<Regex>,
}

impl ExtractorOptionsBuilder {
    /// Set maximum number of elements to parse
    pub fn max_elems_to_parse(mut self, max: usize) -> Self {
        self.max_elems_to_parse = Some(max);
        self
    }

    /// Set the minimum paragraph length considered by the scorer
    pub fn min_paragraph_length(mut self, length: usize) -> Self {
        self.min_paragraph_length = Some(length);
        self
    }

    /// Enable or disable the id/class boilerplate filter
    pub fn strip_unlikely_candidates(mut self, strip: bool) -> Self {
        self.strip_unlikely_candidates = Some(strip);
        self
    }

    /// Enable or disable presentational attribute stripping
    pub fn strip_presentational_attributes(mut self, strip: bool) -> Self {
        self.strip_presentational_attributes = Some(strip);
        self
    }

    /// Set allowed video regex
    pub fn allowed_video_regex(mut self, regex: Regex) -> Self {
        self.allowed_video_regex = Some(regex);
        self
    }

    /// Build the ExtractorOptions
    pub fn build(self) -> ExtractorOptions {
        let defaults = ExtractorOptions::default();
        ExtractorOptions {
            max_elems_to_parse: self
                .max_elems_to_parse
                .unwrap_or(defaults.max_elems_to_parse),
            min_paragraph_length: self
                .min_paragraph_length
                .unwrap_or(defaults.min_paragraph_length),
            strip_unlikely_candidates: self
                .strip_unlikely_candidates
                .unwrap_or(defaults.strip_unlikely_candidates),
            strip_presentational_attributes: self
                .strip_presentational_attributes
                .unwrap_or(defaults.strip_presentational_attributes),
            allowed_video_regex: self.allowed_video_regex.or(defaults.allowed_video_regex),
        }
    }
}

//! Error types for the extraction library.

use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting an article.
///
/// Finding no article is not an error: [`Readability::parse`](crate::Readability::parse)
/// returns an [`ExtractionResult`](crate::ExtractionResult) with empty content instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The input contained no markup at all
    #[error("Empty HTML document")]
    EmptyDocument,

    /// Failed to parse HTML document
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Maximum element limit exceeded
    #[error("Maximum element limit exceeded: {0}")]
    MaxElementsExceeded(usize),

    /// Writing the article HTML failed
    #[error("Failed to serialize article: {0}")]
    Serialize(#[from] std::io::Error),
}

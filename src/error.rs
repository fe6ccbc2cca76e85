use thiserror::Error;

/// Failures of the documentation extractor. Missing elements are not errors:
/// extraction degrades to empty fields instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network, DNS, or HTTP-status failure while retrieving the page.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A CSS selector could not be compiled.
    #[error("parse failed: {0}")]
    Parse(String),

    /// The in-flight fetch was cancelled.
    #[error("fetch cancelled")]
    Cancelled,
}

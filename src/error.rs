//! Error types for the bridge pipeline

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a plot to an image
///
/// The pipeline is strictly sequential, so each variant also tells the caller
/// how far the conversion got: a `Render` error means no fetch was attempted,
/// a `Fetch` error means no decode was attempted.
#[derive(Error, Debug)]
pub enum Error {
    /// The plot description could not be serialized to JSON text
    #[error("Failed to serialize plot description: {0}")]
    Serialize(String),

    /// The native render call failed
    #[error("Render failed: {0}")]
    Render(String),

    /// The locator is not a URI the fetch layer understands
    #[error("Unsupported locator: {0}")]
    Locator(String),

    /// The locator could not be opened or read
    #[error("Failed to fetch locator: {0}")]
    Fetch(String),

    /// The fetched bytes are not a valid PNG
    #[error("Failed to decode PNG: {0}")]
    Decode(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

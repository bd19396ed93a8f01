//! Error types for the pageflow library.

use std::io;
use thiserror::Error;

/// Result type alias for pageflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document pagination.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input payloads.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document input payload could not be read at all.
    ///
    /// This is fatal for the conversion: no partial pages are returned.
    #[error("Malformed document input: {0}")]
    MalformedInput(String),

    /// The layout configuration cannot produce any valid placement
    /// (zero usable height, zero characters per line, and so on).
    #[error("Invalid layout configuration: {0}")]
    InvalidLayout(String),

    /// An image's dimensions could not be determined from its bytes.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// Error serializing the paginated output.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

//! Typed failures surfaced by the detection and redaction pipelines.

use thiserror::Error;

/// Pipeline error taxonomy.
///
/// Every failure propagates to the caller on the first attempt; the
/// pipelines are deterministic, so nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed detection parameters or color value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A pixel buffer could not be produced from input bytes.
    ///
    /// Owned by the image codec collaborator, surfaced unchanged.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The OCR collaborator reported an error.
    #[error("glyph locator failed: {0}")]
    Collaborator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
